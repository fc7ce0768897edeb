use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainResult;

/// A registered library member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Given (first) name
    pub given_name: String,

    /// Family (last) name
    pub family_name: String,

    /// Library card number, unique across readers, positive
    pub card_number: u32,

    /// Login credential as issued; matching it is a shell concern
    pub credential: String,

    /// Books currently on loan to this reader, in borrow order.
    /// The catalog keeps this aligned with the active-loan set.
    pub borrowed_books: Vec<Uuid>,
}

impl Reader {
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        card_number: u32,
        credential: impl Into<String>,
    ) -> DomainResult<Self> {
        let reader = Self {
            id: Uuid::new_v4(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            card_number,
            credential: credential.into(),
            borrowed_books: Vec::new(),
        };
        super::invariants::validate_reader(&reader)?;
        Ok(reader)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    pub fn has_borrowed(&self, book_id: Uuid) -> bool {
        self.borrowed_books.contains(&book_id)
    }
}
