pub mod entity;
pub mod invariants;

pub use entity::Loan;
pub use invariants::validate_loan;
