// src/catalog/library.rs
//
// The Library aggregate: books, authors, sections, readers, loans, and the
// rules that tie them together. Callers that expose this as a shared service
// must serialize mutations behind a single lock; the aggregate itself is
// strictly single-threaded.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::LendingPolicy;
use crate::domain::{Author, Book, DomainError, DomainResult, Loan, Reader, Section};

/// Point-in-time counters over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStatistics {
    pub total_books: usize,
    pub total_readers: usize,
    pub active_loans: usize,
}

pub struct Library {
    authors: HashMap<Uuid, Author>,
    sections: Vec<Section>,
    /// Master list, kept sorted by title (case-insensitive) after every insert
    books: Vec<Book>,
    /// Author -> book ids, in insertion order
    books_by_author: HashMap<Uuid, Vec<Uuid>>,
    readers: HashMap<Uuid, Reader>,
    /// Full loan history; active loans are the entries with `active == true`
    loans: Vec<Loan>,
    policy: LendingPolicy,
}

impl Library {
    pub fn new(policy: LendingPolicy) -> Self {
        Self {
            authors: HashMap::new(),
            sections: Vec::new(),
            books: Vec::new(),
            books_by_author: HashMap::new(),
            readers: HashMap::new(),
            loans: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> LendingPolicy {
        self.policy
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register an author. Re-registering a known author is a no-op.
    pub fn add_author(&mut self, author: Author) {
        if self.authors.contains_key(&author.id) {
            return;
        }
        self.books_by_author.entry(author.id).or_default();
        self.authors.insert(author.id, author);
    }

    /// Register a section. Sections compare by (name, location), so adding
    /// an equal section again is a no-op.
    pub fn add_section(&mut self, section: Section) {
        if !self.sections.contains(&section) {
            self.sections.push(section);
        }
    }

    /// Add a book to the master list and index it under its author.
    /// The author and section must both be registered already.
    pub fn add_book(&mut self, book: Book) -> DomainResult<()> {
        if self.books.iter().any(|b| b.id == book.id) {
            return Ok(());
        }
        if !self.authors.contains_key(&book.author_id) {
            return Err(DomainError::NotRegistered {
                kind: "author",
                id: book.author_id,
            });
        }
        if !self.sections.iter().any(|s| s.id == book.section_id) {
            return Err(DomainError::NotRegistered {
                kind: "section",
                id: book.section_id,
            });
        }

        self.books_by_author
            .entry(book.author_id)
            .or_default()
            .push(book.id);
        self.books.push(book);
        self.sort_books();
        Ok(())
    }

    /// Register a reader. Re-registering the same reader is a no-op; a
    /// different reader reusing a card number is rejected.
    pub fn register_reader(&mut self, reader: Reader) -> DomainResult<()> {
        if self.readers.contains_key(&reader.id) {
            return Ok(());
        }
        if self
            .readers
            .values()
            .any(|r| r.card_number == reader.card_number)
        {
            return Err(DomainError::InvariantViolation(format!(
                "reader.card_number {} is already registered",
                reader.card_number
            )));
        }
        self.readers.insert(reader.id, reader);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Remove a book. Blocked while an active loan references it; closed
    /// loans stay in history even after the book is gone.
    pub fn remove_book(&mut self, book_id: Uuid) -> DomainResult<()> {
        let book = self.book(book_id).ok_or(DomainError::NotRegistered {
            kind: "book",
            id: book_id,
        })?;
        if self.loans.iter().any(|l| l.book_id == book_id && l.active) {
            return Err(DomainError::RemovalBlocked(format!(
                "book \"{}\" is currently on loan",
                book.title
            )));
        }
        let author_id = book.author_id;
        self.books.retain(|b| b.id != book_id);
        if let Some(ids) = self.books_by_author.get_mut(&author_id) {
            ids.retain(|id| *id != book_id);
        }
        Ok(())
    }

    /// Remove an author together with every book indexed under them.
    /// Blocked when any of those books is on loan; nothing is removed then.
    pub fn remove_author(&mut self, author_id: Uuid) -> DomainResult<()> {
        if !self.authors.contains_key(&author_id) {
            return Err(DomainError::NotRegistered {
                kind: "author",
                id: author_id,
            });
        }
        let owned: Vec<Uuid> = self
            .books_by_author
            .get(&author_id)
            .cloned()
            .unwrap_or_default();
        for book_id in &owned {
            if self.loans.iter().any(|l| l.book_id == *book_id && l.active) {
                return Err(DomainError::RemovalBlocked(format!(
                    "a book by author {} is currently on loan",
                    author_id
                )));
            }
        }
        self.books.retain(|b| b.author_id != author_id);
        self.books_by_author.remove(&author_id);
        self.authors.remove(&author_id);
        Ok(())
    }

    /// Remove a reader. Blocked while the reader still holds books.
    pub fn remove_reader(&mut self, reader_id: Uuid) -> DomainResult<()> {
        let reader = self.readers.get(&reader_id).ok_or(DomainError::NotRegistered {
            kind: "reader",
            id: reader_id,
        })?;
        if !reader.borrowed_books.is_empty() {
            return Err(DomainError::RemovalBlocked(format!(
                "reader card {} still has {} book(s) on loan",
                reader.card_number,
                reader.borrowed_books.len()
            )));
        }
        self.readers.remove(&reader_id);
        Ok(())
    }

    /// Remove a section. Blocked while any book still shelves there.
    pub fn remove_section(&mut self, section_id: Uuid) -> DomainResult<()> {
        if !self.sections.iter().any(|s| s.id == section_id) {
            return Err(DomainError::NotRegistered {
                kind: "section",
                id: section_id,
            });
        }
        if self.books.iter().any(|b| b.section_id == section_id) {
            return Err(DomainError::RemovalBlocked(format!(
                "section {} still shelves books",
                section_id
            )));
        }
        self.sections.retain(|s| s.id != section_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Replace a book's metadata in place. Availability is owned by the
    /// lending workflow and survives the update.
    pub fn update_book(&mut self, mut book: Book) -> DomainResult<()> {
        let existing = self
            .books
            .iter()
            .find(|b| b.id == book.id)
            .ok_or(DomainError::NotRegistered {
                kind: "book",
                id: book.id,
            })?;
        if !self.authors.contains_key(&book.author_id) {
            return Err(DomainError::NotRegistered {
                kind: "author",
                id: book.author_id,
            });
        }
        if !self.sections.iter().any(|s| s.id == book.section_id) {
            return Err(DomainError::NotRegistered {
                kind: "section",
                id: book.section_id,
            });
        }
        book.available = existing.available;
        let old_author = existing.author_id;
        if old_author != book.author_id {
            if let Some(ids) = self.books_by_author.get_mut(&old_author) {
                ids.retain(|id| *id != book.id);
            }
            self.books_by_author
                .entry(book.author_id)
                .or_default()
                .push(book.id);
        }
        let slot = self
            .books
            .iter_mut()
            .find(|b| b.id == book.id)
            .expect("book checked above");
        *slot = book;
        self.sort_books();
        Ok(())
    }

    /// Replace a reader's metadata in place. The borrowed list is owned by
    /// the lending workflow and survives the update.
    pub fn update_reader(&mut self, mut reader: Reader) -> DomainResult<()> {
        let existing = self.readers.get(&reader.id).ok_or(DomainError::NotRegistered {
            kind: "reader",
            id: reader.id,
        })?;
        if self
            .readers
            .values()
            .any(|r| r.id != reader.id && r.card_number == reader.card_number)
        {
            return Err(DomainError::InvariantViolation(format!(
                "reader.card_number {} is already registered",
                reader.card_number
            )));
        }
        reader.borrowed_books = existing.borrowed_books.clone();
        self.readers.insert(reader.id, reader);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lending workflow
    // ------------------------------------------------------------------

    /// Borrow a book: availability gate, special-edition eligibility gate,
    /// then loan creation dated today. Returns the new loan id. On any
    /// failure the catalog is left exactly as it was.
    pub fn borrow(
        &mut self,
        reader_id: Uuid,
        book_id: Uuid,
        due_date: NaiveDate,
    ) -> DomainResult<Uuid> {
        let reader = self.readers.get(&reader_id).ok_or(DomainError::NotRegistered {
            kind: "reader",
            id: reader_id,
        })?;
        let book = self.book(book_id).ok_or(DomainError::NotRegistered {
            kind: "book",
            id: book_id,
        })?;
        if !book.available {
            return Err(DomainError::BookUnavailable {
                title: book.title.clone(),
            });
        }
        if book.is_special_edition() {
            let closed = self.closed_loan_count(reader_id) as u32;
            let required = self.policy.special_edition_threshold;
            if closed < required {
                return Err(DomainError::NotEligible {
                    card_number: reader.card_number,
                    required,
                    closed,
                });
            }
        }
        let loan = Loan::new(reader_id, book_id, Utc::now().date_naive(), due_date)?;
        let loan_id = loan.id;

        // All gates passed; now mutate.
        self.set_availability(book_id, false);
        self.readers
            .get_mut(&reader_id)
            .expect("reader checked above")
            .borrowed_books
            .push(book_id);
        self.loans.push(loan);
        Ok(loan_id)
    }

    /// Return a book: exactly one active loan must match the (reader, book)
    /// pair. Closes it, restores availability, and updates the borrowed
    /// list. Returns the closed loan id.
    pub fn return_book(&mut self, reader_id: Uuid, book_id: Uuid) -> DomainResult<Uuid> {
        if !self.readers.contains_key(&reader_id) {
            return Err(DomainError::NotRegistered {
                kind: "reader",
                id: reader_id,
            });
        }
        let matching: Vec<usize> = self
            .loans
            .iter()
            .enumerate()
            .filter(|(_, l)| l.reader_id == reader_id && l.book_id == book_id && l.active)
            .map(|(i, _)| i)
            .collect();
        let index = match matching.as_slice() {
            [] => return Err(DomainError::LoanNotFound { reader_id, book_id }),
            [index] => *index,
            // The availability gate makes this unreachable; guard anyway.
            _ => {
                return Err(DomainError::InvariantViolation(format!(
                    "{} active loans for reader {} and book {}",
                    matching.len(),
                    reader_id,
                    book_id
                )))
            }
        };
        let loan_id = self.loans[index].id;
        self.loans[index].close();
        self.set_availability(book_id, true);
        self.readers
            .get_mut(&reader_id)
            .expect("reader checked above")
            .borrowed_books
            .retain(|id| *id != book_id);
        Ok(loan_id)
    }

    /// Completed loans for a reader; the special-edition gate counts these.
    pub fn closed_loan_count(&self, reader_id: Uuid) -> usize {
        self.loans
            .iter()
            .filter(|l| l.reader_id == reader_id && !l.active)
            .count()
    }

    /// Re-attach a loan loaded from storage. Active loans pull the book out
    /// of circulation and onto the reader's borrowed list; closed loans go
    /// straight to history, even when their reader or book has since been
    /// removed from the catalog.
    pub fn restore_loan(&mut self, loan: Loan) -> DomainResult<()> {
        if loan.active {
            if !self.readers.contains_key(&loan.reader_id) {
                return Err(DomainError::NotRegistered {
                    kind: "reader",
                    id: loan.reader_id,
                });
            }
            if self.book(loan.book_id).is_none() {
                return Err(DomainError::NotRegistered {
                    kind: "book",
                    id: loan.book_id,
                });
            }
            self.set_availability(loan.book_id, false);
            let reader = self
                .readers
                .get_mut(&loan.reader_id)
                .expect("reader checked above");
            if !reader.borrowed_books.contains(&loan.book_id) {
                reader.borrowed_books.push(loan.book_id);
            }
        }
        self.loans.push(loan);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Master list, sorted by title case-insensitively.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, book_id: Uuid) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    pub fn author(&self, author_id: Uuid) -> Option<&Author> {
        self.authors.get(&author_id)
    }

    pub fn reader(&self, reader_id: Uuid) -> Option<&Reader> {
        self.readers.get(&reader_id)
    }

    pub fn reader_by_card(&self, card_number: u32) -> Option<&Reader> {
        self.readers.values().find(|r| r.card_number == card_number)
    }

    /// Registered readers, ordered by card number.
    pub fn readers(&self) -> Vec<&Reader> {
        let mut readers: Vec<&Reader> = self.readers.values().collect();
        readers.sort_by_key(|r| r.card_number);
        readers
    }

    /// Registered sections, in registration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections at least one book shelves in.
    pub fn sections_in_use(&self) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| self.books.iter().any(|b| b.section_id == s.id))
            .collect()
    }

    /// Books indexed under one author, in the order they were added.
    pub fn books_by_author(&self, author_id: Uuid) -> Vec<&Book> {
        self.books_by_author
            .get(&author_id)
            .map(|ids| ids.iter().filter_map(|id| self.book(*id)).collect())
            .unwrap_or_default()
    }

    /// Every author with their books, ordered by author family name.
    pub fn books_grouped_by_author(&self) -> Vec<(&Author, Vec<&Book>)> {
        let mut grouped: Vec<(&Author, Vec<&Book>)> = self
            .authors
            .values()
            .map(|a| (a, self.books_by_author(a.id)))
            .collect();
        grouped.sort_by(|(a, _), (b, _)| {
            a.family_name
                .to_lowercase()
                .cmp(&b.family_name.to_lowercase())
        });
        grouped
    }

    /// Full loan history, oldest first, closed loans included.
    pub fn loan_history(&self) -> &[Loan] {
        &self.loans
    }

    pub fn loan(&self, loan_id: Uuid) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == loan_id)
    }

    pub fn loan_history_for_reader(&self, reader_id: Uuid) -> Vec<&Loan> {
        self.loans
            .iter()
            .filter(|l| l.reader_id == reader_id)
            .collect()
    }

    pub fn active_loans(&self) -> Vec<&Loan> {
        self.loans.iter().filter(|l| l.active).collect()
    }

    pub fn active_loan_for(&self, reader_id: Uuid, book_id: Uuid) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|l| l.reader_id == reader_id && l.book_id == book_id && l.active)
    }

    pub fn statistics(&self) -> LibraryStatistics {
        LibraryStatistics {
            total_books: self.books.len(),
            total_readers: self.readers.len(),
            active_loans: self.loans.iter().filter(|l| l.active).count(),
        }
    }

    /// Exact title match, case-insensitive.
    pub fn search_by_title(&self, title: &str) -> Vec<&Book> {
        let needle = title.to_lowercase();
        self.books
            .iter()
            .filter(|b| b.title.to_lowercase() == needle)
            .collect()
    }

    /// All books whose author has the given family name, case-insensitive.
    pub fn search_by_author_family_name(&self, family_name: &str) -> Vec<&Book> {
        let needle = family_name.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                self.authors
                    .get(&b.author_id)
                    .is_some_and(|a| a.family_name.to_lowercase() == needle)
            })
            .collect()
    }

    pub fn search_by_year(&self, year: u32) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.publication_year == year)
            .collect()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn set_availability(&mut self, book_id: Uuid, available: bool) {
        if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
            book.available = available;
        }
    }

    /// Stable sort keeps equal titles in insertion order.
    fn sort_books(&mut self) {
        self.books
            .sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(LendingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EditionType, LiteraryGenre};
    use chrono::Duration;

    fn due_in(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    struct Fixture {
        library: Library,
        author: Uuid,
        section: Uuid,
    }

    fn fixture_with_policy(policy: LendingPolicy) -> Fixture {
        let mut library = Library::new(policy);
        let author = Author::new("Mihai", "Eminescu", "Romanian").unwrap();
        let section = Section::new("Poetry", "Floor 1").unwrap();
        let author_id = author.id;
        let section_id = section.id;
        library.add_author(author);
        library.add_section(section);
        Fixture {
            library,
            author: author_id,
            section: section_id,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_policy(LendingPolicy::default())
    }

    fn add_book(fx: &mut Fixture, title: &str) -> Uuid {
        let book = Book::new(title, fx.author, fx.section, 1883).unwrap();
        let id = book.id;
        fx.library.add_book(book).unwrap();
        id
    }

    fn add_reader(fx: &mut Fixture, card: u32) -> Uuid {
        let reader = Reader::new("Andrei", "Popescu", card, "parola").unwrap();
        let id = reader.id;
        fx.library.register_reader(reader).unwrap();
        id
    }

    #[test]
    fn test_books_stay_sorted_for_any_insertion_order() {
        let mut fx = fixture();
        for title in ["zebra", "Amintiri", "luceafarul", "Balta", "amintiri II"] {
            add_book(&mut fx, title);
        }
        let titles: Vec<&str> = fx.library.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Amintiri", "amintiri II", "Balta", "luceafarul", "zebra"]
        );
    }

    #[test]
    fn test_add_book_requires_registered_author_and_section() {
        let mut fx = fixture();
        let stray = Book::new("Orphan", Uuid::new_v4(), fx.section, 1900).unwrap();
        assert!(matches!(
            fx.library.add_book(stray),
            Err(DomainError::NotRegistered { kind: "author", .. })
        ));
        let shelfless = Book::new("Shelfless", fx.author, Uuid::new_v4(), 1900).unwrap();
        assert!(matches!(
            fx.library.add_book(shelfless),
            Err(DomainError::NotRegistered { kind: "section", .. })
        ));
    }

    #[test]
    fn test_register_reader_is_idempotent_but_cards_are_unique() {
        let mut fx = fixture();
        let reader = Reader::new("Maria", "Ionescu", 2, "parola").unwrap();
        fx.library.register_reader(reader.clone()).unwrap();
        fx.library.register_reader(reader).unwrap();
        assert_eq!(fx.library.readers().len(), 1);

        let clash = Reader::new("Ion", "Popa", 2, "parola").unwrap();
        assert!(fx.library.register_reader(clash).is_err());
    }

    #[test]
    fn test_borrow_then_return_round_trip() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let reader_id = add_reader(&mut fx, 1);

        fx.library.borrow(reader_id, book_id, due_in(14)).unwrap();
        assert!(!fx.library.book(book_id).unwrap().available);
        assert!(fx.library.reader(reader_id).unwrap().has_borrowed(book_id));
        assert_eq!(fx.library.active_loans().len(), 1);

        fx.library.return_book(reader_id, book_id).unwrap();
        assert!(fx.library.book(book_id).unwrap().available);
        assert!(!fx.library.reader(reader_id).unwrap().has_borrowed(book_id));
        assert!(fx.library.active_loans().is_empty());

        let history = fx.library.loan_history_for_reader(reader_id);
        assert_eq!(history.len(), 1);
        assert!(!history[0].active);
    }

    #[test]
    fn test_borrowing_an_unavailable_book_fails_and_changes_nothing() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let first = add_reader(&mut fx, 1);
        let second = add_reader(&mut fx, 2);

        fx.library.borrow(first, book_id, due_in(14)).unwrap();
        let result = fx.library.borrow(second, book_id, due_in(7));
        assert!(matches!(result, Err(DomainError::BookUnavailable { .. })));
        assert_eq!(fx.library.active_loans().len(), 1);
        assert!(fx.library.reader(second).unwrap().borrowed_books.is_empty());
    }

    #[test]
    fn test_return_without_matching_loan_fails() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let reader_id = add_reader(&mut fx, 1);
        assert!(matches!(
            fx.library.return_book(reader_id, book_id),
            Err(DomainError::LoanNotFound { .. })
        ));
    }

    #[test]
    fn test_special_edition_gate_counts_closed_loans() {
        let mut fx = fixture_with_policy(LendingPolicy::new(1));
        let plain = add_book(&mut fx, "Amintiri din copilarie");
        let special = Book::special_edition(
            "Poezii",
            fx.author,
            fx.section,
            1883,
            EditionType::Hardcover,
            100,
        )
        .unwrap();
        let special_id = special.id;
        fx.library.add_book(special).unwrap();
        let reader_id = add_reader(&mut fx, 1);

        // Zero closed loans: rejected.
        let refused = fx.library.borrow(reader_id, special_id, due_in(14));
        assert!(matches!(
            refused,
            Err(DomainError::NotEligible {
                required: 1,
                closed: 0,
                ..
            })
        ));

        // One full borrow/return cycle of an ordinary book unlocks the gate.
        fx.library.borrow(reader_id, plain, due_in(14)).unwrap();
        fx.library.return_book(reader_id, plain).unwrap();
        assert_eq!(fx.library.closed_loan_count(reader_id), 1);
        fx.library.borrow(reader_id, special_id, due_in(14)).unwrap();
    }

    #[test]
    fn test_active_loans_do_not_count_toward_eligibility() {
        let mut fx = fixture_with_policy(LendingPolicy::new(1));
        let plain = add_book(&mut fx, "Amintiri din copilarie");
        let special = Book::special_edition(
            "Poezii",
            fx.author,
            fx.section,
            1883,
            EditionType::Paperback,
            10,
        )
        .unwrap();
        let special_id = special.id;
        fx.library.add_book(special).unwrap();
        let reader_id = add_reader(&mut fx, 1);

        fx.library.borrow(reader_id, plain, due_in(14)).unwrap();
        let refused = fx.library.borrow(reader_id, special_id, due_in(14));
        assert!(matches!(refused, Err(DomainError::NotEligible { .. })));
    }

    #[test]
    fn test_remove_author_cascades_to_books() {
        let mut fx = fixture();
        add_book(&mut fx, "Luceafarul");
        add_book(&mut fx, "Poezii");
        let other = Author::new("Ion", "Creanga", "Romanian").unwrap();
        let other_id = other.id;
        fx.library.add_author(other);
        let kept = Book::new("Amintiri", other_id, fx.section, 1890).unwrap();
        let kept_id = kept.id;
        fx.library.add_book(kept).unwrap();

        fx.library.remove_author(fx.author).unwrap();
        assert!(fx.library.author(fx.author).is_none());
        assert!(fx.library.books().iter().all(|b| b.author_id != fx.author));
        assert!(fx.library.book(kept_id).is_some());
    }

    #[test]
    fn test_remove_author_blocked_while_book_on_loan() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let reader_id = add_reader(&mut fx, 1);
        fx.library.borrow(reader_id, book_id, due_in(14)).unwrap();

        assert!(matches!(
            fx.library.remove_author(fx.author),
            Err(DomainError::RemovalBlocked(_))
        ));
        // Nothing was removed.
        assert!(fx.library.author(fx.author).is_some());
        assert!(fx.library.book(book_id).is_some());
    }

    #[test]
    fn test_remove_reader_blocked_while_holding_books() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let reader_id = add_reader(&mut fx, 1);
        fx.library.borrow(reader_id, book_id, due_in(14)).unwrap();
        assert!(fx.library.remove_reader(reader_id).is_err());

        fx.library.return_book(reader_id, book_id).unwrap();
        fx.library.remove_reader(reader_id).unwrap();
        assert!(fx.library.reader(reader_id).is_none());
    }

    #[test]
    fn test_remove_section_blocked_while_shelving_books() {
        let mut fx = fixture();
        add_book(&mut fx, "Luceafarul");
        assert!(fx.library.remove_section(fx.section).is_err());
    }

    #[test]
    fn test_searches() {
        let mut fx = fixture();
        add_book(&mut fx, "Luceafarul");
        let novel = Book::novel(
            "Scrisoarea pierduta",
            fx.author,
            fx.section,
            1884,
            LiteraryGenre::Comedy,
            600,
        )
        .unwrap();
        fx.library.add_book(novel).unwrap();

        assert_eq!(fx.library.search_by_title("LUCEAFARUL").len(), 1);
        assert_eq!(fx.library.search_by_title("missing").len(), 0);
        assert_eq!(fx.library.search_by_author_family_name("eminescu").len(), 2);
        assert_eq!(fx.library.search_by_year(1884).len(), 1);
    }

    #[test]
    fn test_sections_in_use_lists_only_referenced_sections() {
        let mut fx = fixture();
        let spare = Section::new("Prose", "Floor 2").unwrap();
        fx.library.add_section(spare);
        add_book(&mut fx, "Luceafarul");

        assert_eq!(fx.library.sections().len(), 2);
        let in_use = fx.library.sections_in_use();
        assert_eq!(in_use.len(), 1);
        assert_eq!(in_use[0].name, "Poetry");
    }

    #[test]
    fn test_statistics_counts() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        add_book(&mut fx, "Poezii");
        let reader_id = add_reader(&mut fx, 1);
        fx.library.borrow(reader_id, book_id, due_in(14)).unwrap();

        let stats = fx.library.statistics();
        assert_eq!(stats.total_books, 2);
        assert_eq!(stats.total_readers, 1);
        assert_eq!(stats.active_loans, 1);
    }

    #[test]
    fn test_restore_loan_rebuilds_lending_state() {
        let mut fx = fixture();
        let book_id = add_book(&mut fx, "Luceafarul");
        let reader_id = add_reader(&mut fx, 1);

        let today = Utc::now().date_naive();
        let open = Loan::new(reader_id, book_id, today, due_in(14)).unwrap();
        let mut closed = Loan::new(reader_id, book_id, today, due_in(14)).unwrap();
        closed.close();

        fx.library.restore_loan(closed).unwrap();
        assert!(fx.library.book(book_id).unwrap().available);
        fx.library.restore_loan(open).unwrap();
        assert!(!fx.library.book(book_id).unwrap().available);
        assert!(fx.library.reader(reader_id).unwrap().has_borrowed(book_id));
        assert_eq!(fx.library.closed_loan_count(reader_id), 1);
    }
}
