use super::entity::{Book, BookKind};
use crate::domain::{require_non_empty, require_positive, DomainResult};

/// Validates all Book invariants
///
/// 1. Title cannot be empty
/// 2. Publication year is positive
/// 3. Novel page counts and special-edition copy counts are positive
/// 4. Identity (UUID) is immutable
pub fn validate_book(book: &Book) -> DomainResult<()> {
    require_non_empty("book.title", &book.title)?;
    require_positive("book.publication_year", book.publication_year)?;
    match &book.kind {
        BookKind::Standard => {}
        BookKind::Novel { page_count, .. } => {
            require_positive("book.page_count", *page_count)?;
        }
        BookKind::SpecialEdition { copy_count, .. } => {
            require_positive("book.copy_count", *copy_count)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{EditionType, LiteraryGenre};
    use uuid::Uuid;

    #[test]
    fn test_new_book_is_available() {
        let book = Book::new("Luceafarul", Uuid::new_v4(), Uuid::new_v4(), 1883).unwrap();
        assert!(book.available);
        assert!(!book.is_special_edition());
    }

    #[test]
    fn test_empty_title_fails() {
        assert!(Book::new("  ", Uuid::new_v4(), Uuid::new_v4(), 1883).is_err());
    }

    #[test]
    fn test_zero_year_fails() {
        assert!(Book::new("Luceafarul", Uuid::new_v4(), Uuid::new_v4(), 0).is_err());
    }

    #[test]
    fn test_novel_requires_positive_page_count() {
        let result = Book::novel(
            "The Lost Letter",
            Uuid::new_v4(),
            Uuid::new_v4(),
            1884,
            LiteraryGenre::Comedy,
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_special_edition_requires_positive_copies() {
        let result = Book::special_edition(
            "Poems",
            Uuid::new_v4(),
            Uuid::new_v4(),
            1883,
            EditionType::Hardcover,
            0,
        );
        assert!(result.is_err());

        let ok = Book::special_edition(
            "Poems",
            Uuid::new_v4(),
            Uuid::new_v4(),
            1883,
            EditionType::Anniversary,
            100,
        )
        .unwrap();
        assert!(ok.is_special_edition());
    }
}
