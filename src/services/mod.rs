// src/services/mod.rs
//
// Service layer
//
// Services hold the in-memory catalog, coordinate the repositories, and
// emit events. Repositories stay dumb; rules stay in the catalog.

pub mod library_service;

pub use library_service::LibraryService;
