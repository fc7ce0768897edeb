// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod author;
pub mod book;
pub mod loan;
pub mod reader;
pub mod section;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use author::{validate_author, Author};
pub use book::{validate_book, Book, BookKind, EditionType, LiteraryGenre};
pub use loan::{validate_loan, Loan};
pub use reader::{validate_reader, Reader};
pub use section::{validate_section, Section};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Book \"{title}\" is not available")]
    BookUnavailable { title: String },

    #[error(
        "Reader card {card_number} needs {required} completed loans to borrow a special edition, has {closed}"
    )]
    NotEligible {
        card_number: u32,
        required: u32,
        closed: u32,
    },

    #[error("No active loan links reader {reader_id} to book {book_id}")]
    LoanNotFound { reader_id: Uuid, book_id: Uuid },

    #[error("{kind} {id} is not registered in the catalog")]
    NotRegistered { kind: &'static str, id: Uuid },

    #[error("Removal blocked: {0}")]
    RemovalBlocked(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Shared field checks used by the per-entity validators.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: u32) -> DomainResult<()> {
    if value == 0 {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be a positive number",
            field
        )));
    }
    Ok(())
}
