pub mod entity;
pub mod invariants;

pub use entity::Section;
pub use invariants::validate_section;
