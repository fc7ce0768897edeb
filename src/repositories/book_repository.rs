// src/repositories/book_repository.rs
//
// Book persistence.
//
// The `kind` column discriminates the three variants on read-back; the
// variant-specific columns are NULL for every other kind.

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Book, BookKind, EditionType, LiteraryGenre};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait BookRepository: Send + Sync {
    fn save(&self, book: &Book) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
    fn list_all(&self) -> AppResult<Vec<Book>>;
    fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    fn count(&self) -> AppResult<i64>;
}

pub struct SqliteBookRepository {
    pool: Arc<ConnectionPool>,
}

const BOOK_COLUMNS: &str = "id, title, author_id, section_id, publication_year, available, \
                            kind, genre, page_count, edition, copy_count";

impl SqliteBookRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_book(row: &Row) -> Result<Book, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let author_str: String = row.get("author_id")?;
        let author_id = Uuid::parse_str(&author_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let section_str: String = row.get("section_id")?;
        let section_id = Uuid::parse_str(&section_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let publication_year: i64 = row.get("publication_year")?;

        let kind_str: String = row.get("kind")?;
        let kind = match kind_str.as_str() {
            "STANDARD" => BookKind::Standard,
            "NOVEL" => {
                let genre_str: Option<String> = row.get("genre")?;
                let genre = match genre_str.as_deref() {
                    Some("Drama") => LiteraryGenre::Drama,
                    Some("Comedy") => LiteraryGenre::Comedy,
                    Some("SF") => LiteraryGenre::SF,
                    _ => return Err(rusqlite::Error::InvalidQuery),
                };
                let page_count: Option<i64> = row.get("page_count")?;
                let page_count = page_count.ok_or(rusqlite::Error::InvalidQuery)?;
                BookKind::Novel {
                    genre,
                    page_count: page_count as u32,
                }
            }
            "SPECIAL_EDITION" => {
                let edition_str: Option<String> = row.get("edition")?;
                let edition = match edition_str.as_deref() {
                    Some("Hardcover") => EditionType::Hardcover,
                    Some("Paperback") => EditionType::Paperback,
                    Some("Anniversary") => EditionType::Anniversary,
                    _ => return Err(rusqlite::Error::InvalidQuery),
                };
                let copy_count: Option<i64> = row.get("copy_count")?;
                let copy_count = copy_count.ok_or(rusqlite::Error::InvalidQuery)?;
                BookKind::SpecialEdition {
                    edition,
                    copy_count: copy_count as u32,
                }
            }
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        Ok(Book {
            id,
            title: row.get("title")?,
            author_id,
            section_id,
            publication_year: publication_year as u32,
            available: row.get("available")?,
            kind,
        })
    }
}

impl BookRepository for SqliteBookRepository {
    fn save(&self, book: &Book) -> AppResult<()> {
        let conn = self.pool.get()?;

        let (kind, genre, page_count, edition, copy_count): (
            &str,
            Option<String>,
            Option<i64>,
            Option<String>,
            Option<i64>,
        ) = match &book.kind {
            BookKind::Standard => ("STANDARD", None, None, None, None),
            BookKind::Novel { genre, page_count } => (
                "NOVEL",
                Some(genre.to_string()),
                Some(*page_count as i64),
                None,
                None,
            ),
            BookKind::SpecialEdition { edition, copy_count } => (
                "SPECIAL_EDITION",
                None,
                None,
                Some(edition.to_string()),
                Some(*copy_count as i64),
            ),
        };

        conn.execute(
            "INSERT OR REPLACE INTO books (
                id, title, author_id, section_id, publication_year, available,
                kind, genre, page_count, edition, copy_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                book.id.to_string(),
                book.title,
                book.author_id.to_string(),
                book.section_id.to_string(),
                book.publication_year as i64,
                book.available,
                kind,
                genre,
                page_count,
                edition,
                copy_count,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM books WHERE id = ?1",
            BOOK_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_book) {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM books ORDER BY title COLLATE NOCASE",
            BOOK_COLUMNS
        ))?;

        let books: Vec<Book> = stmt
            .query_map([], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn list_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM books WHERE author_id = ?1 ORDER BY title COLLATE NOCASE",
            BOOK_COLUMNS
        ))?;

        let books: Vec<Book> = stmt
            .query_map(params![author_id.to_string()], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM books WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn count(&self) -> AppResult<i64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, Section};
    use crate::repositories::author_repository::{AuthorRepository, SqliteAuthorRepository};
    use crate::repositories::section_repository::{SectionRepository, SqliteSectionRepository};
    use crate::repositories::test_support::test_pool;

    fn seed_refs(pool: &Arc<ConnectionPool>) -> (Uuid, Uuid) {
        let author = Author::new("Mihai", "Eminescu", "Romanian").unwrap();
        let section = Section::new("Poetry", "Floor 1").unwrap();
        SqliteAuthorRepository::new(Arc::clone(pool))
            .save(&author)
            .unwrap();
        SqliteSectionRepository::new(Arc::clone(pool))
            .save(&section)
            .unwrap();
        (author.id, section.id)
    }

    #[test]
    fn test_all_three_kinds_round_trip() {
        let (_dir, pool) = test_pool();
        let (author_id, section_id) = seed_refs(&pool);
        let repo = SqliteBookRepository::new(Arc::clone(&pool));

        let standard = Book::new("Luceafarul", author_id, section_id, 1883).unwrap();
        let novel = Book::novel(
            "Scrisoarea pierduta",
            author_id,
            section_id,
            1884,
            LiteraryGenre::Comedy,
            600,
        )
        .unwrap();
        let special = Book::special_edition(
            "Poezii",
            author_id,
            section_id,
            1883,
            EditionType::Anniversary,
            100,
        )
        .unwrap();

        for book in [&standard, &novel, &special] {
            repo.save(book).unwrap();
        }

        let loaded = repo.get_by_id(novel.id).unwrap().unwrap();
        assert_eq!(
            loaded.kind,
            BookKind::Novel {
                genre: LiteraryGenre::Comedy,
                page_count: 600
            }
        );

        let loaded = repo.get_by_id(special.id).unwrap().unwrap();
        assert_eq!(
            loaded.kind,
            BookKind::SpecialEdition {
                edition: EditionType::Anniversary,
                copy_count: 100
            }
        );

        let loaded = repo.get_by_id(standard.id).unwrap().unwrap();
        assert_eq!(loaded.kind, BookKind::Standard);
        assert!(loaded.available);
    }

    #[test]
    fn test_list_all_orders_case_insensitively() {
        let (_dir, pool) = test_pool();
        let (author_id, section_id) = seed_refs(&pool);
        let repo = SqliteBookRepository::new(Arc::clone(&pool));

        for title in ["zebra", "Amintiri", "luceafarul"] {
            repo.save(&Book::new(title, author_id, section_id, 1890).unwrap())
                .unwrap();
        }

        let titles: Vec<String> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Amintiri", "luceafarul", "zebra"]);
    }

    #[test]
    fn test_availability_flag_round_trips() {
        let (_dir, pool) = test_pool();
        let (author_id, section_id) = seed_refs(&pool);
        let repo = SqliteBookRepository::new(Arc::clone(&pool));

        let mut book = Book::new("Luceafarul", author_id, section_id, 1883).unwrap();
        book.available = false;
        repo.save(&book).unwrap();

        let loaded = repo.get_by_id(book.id).unwrap().unwrap();
        assert!(!loaded.available);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_list_by_author_filters() {
        let (_dir, pool) = test_pool();
        let (author_id, section_id) = seed_refs(&pool);
        let other = Author::new("Ion", "Creanga", "Romanian").unwrap();
        SqliteAuthorRepository::new(Arc::clone(&pool))
            .save(&other)
            .unwrap();
        let repo = SqliteBookRepository::new(Arc::clone(&pool));

        repo.save(&Book::new("Luceafarul", author_id, section_id, 1883).unwrap())
            .unwrap();
        repo.save(&Book::new("Amintiri", other.id, section_id, 1890).unwrap())
            .unwrap();

        let by_author = repo.list_by_author(author_id).unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].title, "Luceafarul");
    }
}
