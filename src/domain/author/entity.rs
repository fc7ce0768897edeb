use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

/// A published author known to the catalog.
///
/// The list of an author's books is a catalog concern (the catalog keeps an
/// index from author to books); the entity itself carries only identity and
/// biographical fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Given (first) name
    pub given_name: String,

    /// Family (last) name
    pub family_name: String,

    /// Nationality, free-form
    pub nationality: String,
}

impl Author {
    /// Create a new Author.
    /// Fails fast when any field is empty; no partially built value escapes.
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        nationality: impl Into<String>,
    ) -> DomainResult<Self> {
        let author = Self {
            id: Uuid::new_v4(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            nationality: nationality.into(),
        };
        super::invariants::validate_author(&author)?;
        Ok(author)
    }

    /// "Given Family" display form used by listings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}
