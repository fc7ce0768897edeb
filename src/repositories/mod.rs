// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only, always parameterized

pub mod author_repository;
pub mod book_repository;
pub mod loan_repository;
pub mod reader_repository;
pub mod section_repository;

pub use author_repository::{AuthorRepository, SqliteAuthorRepository};
pub use book_repository::{BookRepository, SqliteBookRepository};
pub use loan_repository::{LoanRepository, SqliteLoanRepository};
pub use reader_repository::{ReaderRepository, SqliteReaderRepository};
pub use section_repository::{SectionRepository, SqliteSectionRepository};

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use book_repository::MockBookRepository;
#[cfg(test)]
pub use loan_repository::MockLoanRepository;
#[cfg(test)]
pub use reader_repository::MockReaderRepository;
#[cfg(test)]
pub use section_repository::MockSectionRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::db::{create_connection_pool_at, initialize_database, ConnectionPool};

    /// Pool over a throwaway database file; keep the TempDir alive for the
    /// duration of the test.
    pub fn test_pool() -> (tempfile::TempDir, Arc<ConnectionPool>) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool_at(&dir.path().join("test.db")).unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        (dir, Arc::new(pool))
    }
}
