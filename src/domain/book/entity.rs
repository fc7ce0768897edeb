use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

/// A catalogued book.
///
/// The three shelf variants share every common field; what distinguishes
/// them lives in the tagged `kind` union so persistence mapping and the
/// lending rules can match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Title, unique only by convention
    pub title: String,

    /// Author reference (REQUIRED, must be registered)
    pub author_id: Uuid,

    /// Shelf section reference (REQUIRED, must be registered)
    pub section_id: Uuid,

    /// Publication year, positive
    pub publication_year: u32,

    /// False while an active loan references this book
    pub available: bool,

    /// Variant-specific fields
    pub kind: BookKind,
}

/// Book variant with its extra fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookKind {
    Standard,
    Novel {
        genre: LiteraryGenre,
        page_count: u32,
    },
    SpecialEdition {
        edition: EditionType,
        copy_count: u32,
    },
}

/// Literary genre of a novel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LiteraryGenre {
    Drama,
    Comedy,
    SF,
}

/// Print run type of a special edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditionType {
    Hardcover,
    Paperback,
    Anniversary,
}

impl Book {
    /// Create a standard book. Available at creation.
    pub fn new(
        title: impl Into<String>,
        author_id: Uuid,
        section_id: Uuid,
        publication_year: u32,
    ) -> DomainResult<Self> {
        Self::with_kind(title, author_id, section_id, publication_year, BookKind::Standard)
    }

    /// Create a novel with its genre and page count.
    pub fn novel(
        title: impl Into<String>,
        author_id: Uuid,
        section_id: Uuid,
        publication_year: u32,
        genre: LiteraryGenre,
        page_count: u32,
    ) -> DomainResult<Self> {
        Self::with_kind(
            title,
            author_id,
            section_id,
            publication_year,
            BookKind::Novel { genre, page_count },
        )
    }

    /// Create a special edition with its print run details.
    pub fn special_edition(
        title: impl Into<String>,
        author_id: Uuid,
        section_id: Uuid,
        publication_year: u32,
        edition: EditionType,
        copy_count: u32,
    ) -> DomainResult<Self> {
        Self::with_kind(
            title,
            author_id,
            section_id,
            publication_year,
            BookKind::SpecialEdition { edition, copy_count },
        )
    }

    fn with_kind(
        title: impl Into<String>,
        author_id: Uuid,
        section_id: Uuid,
        publication_year: u32,
        kind: BookKind,
    ) -> DomainResult<Self> {
        let book = Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author_id,
            section_id,
            publication_year,
            available: true,
            kind,
        };
        super::invariants::validate_book(&book)?;
        Ok(book)
    }

    /// Special editions are gated behind the lending policy.
    pub fn is_special_edition(&self) -> bool {
        matches!(self.kind, BookKind::SpecialEdition { .. })
    }
}

impl std::fmt::Display for LiteraryGenre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteraryGenre::Drama => write!(f, "Drama"),
            LiteraryGenre::Comedy => write!(f, "Comedy"),
            LiteraryGenre::SF => write!(f, "SF"),
        }
    }
}

impl std::fmt::Display for EditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditionType::Hardcover => write!(f, "Hardcover"),
            EditionType::Paperback => write!(f, "Paperback"),
            EditionType::Anniversary => write!(f, "Anniversary"),
        }
    }
}
