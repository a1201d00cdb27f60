//! Note domain — business rules for the notebook backend.
//!
//! Pure helpers (`word_stats`, `tag_filter`, `merge`, `validation`) plus the
//! `NoteService` orchestration over the SQLite store.

pub mod merge;
pub mod service;
pub mod tag_filter;
pub mod validation;
pub mod word_stats;

pub use service::NoteService;
