// src/events/mod.rs
//
// Internal Event System - Public API
//
// Services emit an event after every notable catalog action; sinks (the
// audit trail, tests) subscribe. Dispatch is synchronous and in-process.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::DomainEvent;

pub use types::{
    AuthorRegistered,
    AuthorRemoved,
    BookAdded,
    BookBorrowed,
    BookRemoved,
    BookReturned,
    ReaderRegistered,
    ReaderRemoved,
    SectionRegistered,
    SectionRemoved,
};
