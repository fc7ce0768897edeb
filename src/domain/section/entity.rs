use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

/// A physical shelf section of the library (name + location).
///
/// In-memory identity is the (name, location) value pair; the id exists so
/// the persistence layer has a stable key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Persistence identifier
    pub id: Uuid,

    /// Section name, e.g. "Poetry"
    pub name: String,

    /// Location inside the building, e.g. "Floor 1"
    pub location: String,
}

impl Section {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> DomainResult<Self> {
        let section = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: location.into(),
        };
        super::invariants::validate_section(&section)?;
        Ok(section)
    }
}

// Identity is the (name, location) pair, not the persistence id.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

impl Eq for Section {}

impl std::hash::Hash for Section {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.location.hash(state);
    }
}
