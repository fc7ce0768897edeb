use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

/// One lending of one book to one reader.
///
/// A loan is active from creation until the return finalizes it; closed
/// loans stay in the catalog history forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Borrowing reader (must be registered)
    pub reader_id: Uuid,

    /// Borrowed book (must be registered)
    pub book_id: Uuid,

    /// Day the loan was opened
    pub loan_date: NaiveDate,

    /// Day the book is expected back
    pub due_date: NaiveDate,

    /// True until the book is returned
    pub active: bool,
}

impl Loan {
    pub fn new(
        reader_id: Uuid,
        book_id: Uuid,
        loan_date: NaiveDate,
        due_date: NaiveDate,
    ) -> DomainResult<Self> {
        let loan = Self {
            id: Uuid::new_v4(),
            reader_id,
            book_id,
            loan_date,
            due_date,
            active: true,
        };
        super::invariants::validate_loan(&loan)?;
        Ok(loan)
    }

    /// Finalize the loan; it moves from the active set into history.
    pub fn close(&mut self) {
        self.active = false;
    }
}
