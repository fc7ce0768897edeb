pub mod entity;
pub mod invariants;

pub use entity::{Book, BookKind, EditionType, LiteraryGenre};
pub use invariants::validate_book;
