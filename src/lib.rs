// src/lib.rs
// BookHub - Local-first library catalog and lending manager
//
// Architecture:
// - Domain-centric: entities and their invariants live in `domain`
// - The catalog aggregate owns every lending/availability rule
// - Repositories are dumb SQLite mappers behind injected trait objects
// - Services coordinate catalog, store, and events; sinks subscribe
// - Explicit: no implicit behavior, no magic

// ============================================================================
// MODULES
// ============================================================================

pub mod audit;
pub mod catalog;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_author,
    validate_book,
    validate_loan,
    validate_reader,
    validate_section,
    Author,
    Book,
    BookKind,
    EditionType,
    LiteraryGenre,
    Loan,
    Reader,
    Section,
};

// ============================================================================
// PUBLIC API - Catalog
// ============================================================================

pub use catalog::{LendingPolicy, Library, LibraryStatistics};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};
pub use domain::{DomainError, DomainResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    AuthorRegistered,
    AuthorRemoved,
    BookAdded,
    BookBorrowed,
    BookRemoved,
    BookReturned,
    DomainEvent,
    EventBus,
    ReaderRegistered,
    ReaderRemoved,
    SectionRegistered,
    SectionRemoved,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    create_connection_pool, create_connection_pool_at, initialize_database, ConnectionPool,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AuthorRepository,
    BookRepository,
    LoanRepository,
    ReaderRepository,
    SectionRepository,
    SqliteAuthorRepository,
    SqliteBookRepository,
    SqliteLoanRepository,
    SqliteReaderRepository,
    SqliteSectionRepository,
};

// ============================================================================
// PUBLIC API - Services & Audit
// ============================================================================

pub use audit::{register_audit_handlers, AuditTrail};
pub use services::LibraryService;
