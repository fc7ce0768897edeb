pub mod entity;
pub mod invariants;

pub use entity::Author;
pub use invariants::validate_author;
