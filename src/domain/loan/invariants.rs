use super::entity::Loan;
use crate::domain::{DomainError, DomainResult};

/// Validates all Loan invariants
///
/// The due date may equal the loan date (same-day return window) but never
/// precede it.
pub fn validate_loan(loan: &Loan) -> DomainResult<()> {
    if loan.due_date < loan.loan_date {
        return Err(DomainError::InvariantViolation(format!(
            "loan.due_date {} cannot precede loan.loan_date {}",
            loan.due_date, loan.loan_date
        )));
    }
    Ok(())
}
