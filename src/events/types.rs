// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// REGISTRATION EVENTS
// ============================================================================

/// Emitted when an author joins the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub display_name: String,
}

impl AuthorRegistered {
    pub fn new(author_id: Uuid, display_name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            author_id,
            display_name,
        }
    }
}

impl_domain_event!(AuthorRegistered);

/// Emitted when a shelf section is registered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub section_id: Uuid,
    pub name: String,
}

impl SectionRegistered {
    pub fn new(section_id: Uuid, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            section_id,
            name,
        }
    }
}

impl_domain_event!(SectionRegistered);

/// Emitted when a book lands in the master list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
    pub title: String,
}

impl BookAdded {
    pub fn new(book_id: Uuid, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
            title,
        }
    }
}

impl_domain_event!(BookAdded);

/// Emitted when a reader receives a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reader_id: Uuid,
    pub card_number: u32,
}

impl ReaderRegistered {
    pub fn new(reader_id: Uuid, card_number: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reader_id,
            card_number,
        }
    }
}

impl_domain_event!(ReaderRegistered);

// ============================================================================
// REMOVAL EVENTS
// ============================================================================

/// Emitted when a book leaves the master list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub book_id: Uuid,
}

impl BookRemoved {
    pub fn new(book_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            book_id,
        }
    }
}

impl_domain_event!(BookRemoved);

/// Emitted when an author and their books are removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub books_removed: usize,
}

impl AuthorRemoved {
    pub fn new(author_id: Uuid, books_removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            author_id,
            books_removed,
        }
    }
}

impl_domain_event!(AuthorRemoved);

/// Emitted when a reader is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reader_id: Uuid,
}

impl ReaderRemoved {
    pub fn new(reader_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reader_id,
        }
    }
}

impl_domain_event!(ReaderRemoved);

/// Emitted when a section is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub section_id: Uuid,
}

impl SectionRemoved {
    pub fn new(section_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            section_id,
        }
    }
}

impl_domain_event!(SectionRemoved);

// ============================================================================
// LENDING EVENTS
// ============================================================================

/// Emitted when a loan opens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub loan_id: Uuid,
    pub reader_id: Uuid,
    pub book_id: Uuid,
}

impl BookBorrowed {
    pub fn new(loan_id: Uuid, reader_id: Uuid, book_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            loan_id,
            reader_id,
            book_id,
        }
    }
}

impl_domain_event!(BookBorrowed);

/// Emitted when a loan closes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookReturned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub loan_id: Uuid,
    pub reader_id: Uuid,
    pub book_id: Uuid,
}

impl BookReturned {
    pub fn new(loan_id: Uuid, reader_id: Uuid, book_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            loan_id,
            reader_id,
            book_id,
        }
    }
}

impl_domain_event!(BookReturned);
