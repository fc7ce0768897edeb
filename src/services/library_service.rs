// src/services/library_service.rs
//
// The lending desk: every catalog mutation flows through here so the
// in-memory aggregate, the SQLite store, and the event bus stay in step.
//
// Rule checks happen in the catalog BEFORE anything is persisted; a
// repository failure after that point leaves the store one write behind the
// in-memory view, which the next `load` reconciles from the store's side.
// Mutations take `&mut self`, so one service instance serializes them.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::catalog::{LendingPolicy, Library, LibraryStatistics};
use crate::domain::{
    validate_author, validate_book, validate_reader, validate_section, Author, Book, Reader,
    Section,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    AuthorRegistered, AuthorRemoved, BookAdded, BookBorrowed, BookRemoved, BookReturned, EventBus,
    ReaderRegistered, ReaderRemoved, SectionRegistered, SectionRemoved,
};
use crate::repositories::{
    AuthorRepository, BookRepository, LoanRepository, ReaderRepository, SectionRepository,
};

pub struct LibraryService {
    author_repo: Arc<dyn AuthorRepository>,
    section_repo: Arc<dyn SectionRepository>,
    book_repo: Arc<dyn BookRepository>,
    reader_repo: Arc<dyn ReaderRepository>,
    loan_repo: Arc<dyn LoanRepository>,
    event_bus: Arc<EventBus>,
    library: Library,
}

impl LibraryService {
    pub fn new(
        author_repo: Arc<dyn AuthorRepository>,
        section_repo: Arc<dyn SectionRepository>,
        book_repo: Arc<dyn BookRepository>,
        reader_repo: Arc<dyn ReaderRepository>,
        loan_repo: Arc<dyn LoanRepository>,
        event_bus: Arc<EventBus>,
        policy: LendingPolicy,
    ) -> Self {
        Self {
            author_repo,
            section_repo,
            book_repo,
            reader_repo,
            loan_repo,
            event_bus,
            library: Library::new(policy),
        }
    }

    /// Rebuild the in-memory catalog from the store. Loans come last so the
    /// active ones can re-flag availability and borrowed lists.
    pub fn load(&mut self) -> AppResult<()> {
        let mut library = Library::new(self.library.policy());

        for author in self.author_repo.list_all()? {
            library.add_author(author);
        }
        for section in self.section_repo.list_all()? {
            library.add_section(section);
        }
        for book in self.book_repo.list_all()? {
            library.add_book(book)?;
        }
        for reader in self.reader_repo.list_all()? {
            library.register_reader(reader)?;
        }
        for loan in self.loan_repo.list_all()? {
            library.restore_loan(loan)?;
        }

        let stats = library.statistics();
        log::info!(
            "catalog loaded: {} books, {} readers, {} active loans",
            stats.total_books,
            stats.total_readers,
            stats.active_loans
        );
        self.library = library;
        Ok(())
    }

    /// Read access to the catalog and its queries.
    pub fn library(&self) -> &Library {
        &self.library
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn register_author(&mut self, author: Author) -> AppResult<()> {
        validate_author(&author).map_err(AppError::Domain)?;
        let event = AuthorRegistered::new(author.id, author.display_name());
        self.library.add_author(author.clone());
        self.author_repo.save(&author)?;
        self.event_bus.emit(event);
        Ok(())
    }

    pub fn register_section(&mut self, section: Section) -> AppResult<()> {
        validate_section(&section).map_err(AppError::Domain)?;
        let event = SectionRegistered::new(section.id, section.name.clone());
        self.library.add_section(section.clone());
        self.section_repo.save(&section)?;
        self.event_bus.emit(event);
        Ok(())
    }

    pub fn add_book(&mut self, book: Book) -> AppResult<()> {
        validate_book(&book).map_err(AppError::Domain)?;
        let event = BookAdded::new(book.id, book.title.clone());
        self.library.add_book(book.clone())?;
        self.book_repo.save(&book)?;
        self.event_bus.emit(event);
        Ok(())
    }

    pub fn register_reader(&mut self, reader: Reader) -> AppResult<()> {
        validate_reader(&reader).map_err(AppError::Domain)?;
        let event = ReaderRegistered::new(reader.id, reader.card_number);
        self.library.register_reader(reader.clone())?;
        self.reader_repo.save(&reader)?;
        self.event_bus.emit(event);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    pub fn update_book(&mut self, book: Book) -> AppResult<()> {
        validate_book(&book).map_err(AppError::Domain)?;
        self.library.update_book(book.clone())?;
        // The catalog owns the availability flag; persist its version.
        let stored = self.library.book(book.id).ok_or(AppError::NotFound)?.clone();
        self.book_repo.save(&stored)?;
        Ok(())
    }

    pub fn update_reader(&mut self, reader: Reader) -> AppResult<()> {
        validate_reader(&reader).map_err(AppError::Domain)?;
        self.library.update_reader(reader.clone())?;
        let stored = self
            .library
            .reader(reader.id)
            .ok_or(AppError::NotFound)?
            .clone();
        self.reader_repo.save(&stored)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    pub fn remove_book(&mut self, book_id: Uuid) -> AppResult<()> {
        self.library.remove_book(book_id)?;
        self.book_repo.delete(book_id)?;
        self.event_bus.emit(BookRemoved::new(book_id));
        Ok(())
    }

    pub fn remove_author(&mut self, author_id: Uuid) -> AppResult<()> {
        let owned: Vec<Uuid> = self
            .library
            .books_by_author(author_id)
            .iter()
            .map(|b| b.id)
            .collect();
        self.library.remove_author(author_id)?;
        for book_id in &owned {
            self.book_repo.delete(*book_id)?;
        }
        self.author_repo.delete(author_id)?;
        self.event_bus
            .emit(AuthorRemoved::new(author_id, owned.len()));
        Ok(())
    }

    pub fn remove_reader(&mut self, reader_id: Uuid) -> AppResult<()> {
        self.library.remove_reader(reader_id)?;
        self.reader_repo.delete(reader_id)?;
        self.event_bus.emit(ReaderRemoved::new(reader_id));
        Ok(())
    }

    pub fn remove_section(&mut self, section_id: Uuid) -> AppResult<()> {
        self.library.remove_section(section_id)?;
        self.section_repo.delete(section_id)?;
        self.event_bus.emit(SectionRemoved::new(section_id));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lending
    // ------------------------------------------------------------------

    pub fn borrow_book(
        &mut self,
        reader_id: Uuid,
        book_id: Uuid,
        due_date: NaiveDate,
    ) -> AppResult<Uuid> {
        let loan_id = self.library.borrow(reader_id, book_id, due_date)?;

        let loan = self.library.loan(loan_id).ok_or(AppError::NotFound)?.clone();
        let book = self.library.book(book_id).ok_or(AppError::NotFound)?.clone();
        self.loan_repo.save(&loan)?;
        self.book_repo.save(&book)?;

        self.event_bus
            .emit(BookBorrowed::new(loan_id, reader_id, book_id));
        Ok(loan_id)
    }

    pub fn return_book(&mut self, reader_id: Uuid, book_id: Uuid) -> AppResult<Uuid> {
        let loan_id = self.library.return_book(reader_id, book_id)?;

        let loan = self.library.loan(loan_id).ok_or(AppError::NotFound)?.clone();
        let book = self.library.book(book_id).ok_or(AppError::NotFound)?.clone();
        self.loan_repo.save(&loan)?;
        self.book_repo.save(&book)?;

        self.event_bus
            .emit(BookReturned::new(loan_id, reader_id, book_id));
        Ok(loan_id)
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    pub fn statistics(&self) -> LibraryStatistics {
        self.library.statistics()
    }

    /// Row count straight from the store, independent of the loaded catalog.
    pub fn count_stored_books(&self) -> AppResult<i64> {
        self.book_repo.count()
    }

    /// Row count straight from the store, independent of the loaded catalog.
    pub fn count_stored_readers(&self) -> AppResult<i64> {
        self.reader_repo.count()
    }
}
