//! Note business logic, composing the pure helpers against the store.

use std::sync::Arc;

use crate::db::Database;
use crate::error::{NoteError, NoteResult};
use crate::models::{CreateNoteRequest, Note, PageRequest, Tag, UpdateNoteRequest};

use super::merge;
use super::tag_filter::TagFilterMode;
use super::validation;
use super::word_stats::{self, WordStats};

/// Orchestrates note operations: the only component with store side
/// effects. Holds no mutable state of its own.
#[derive(Clone)]
pub struct NoteService {
    db: Arc<Database>,
}

impl NoteService {
    pub fn new(db: Arc<Database>) -> Self {
        NoteService { db }
    }

    /// Create and persist a note; the store assigns id and creation date.
    pub fn create_note(&self, request: CreateNoteRequest) -> NoteResult<Note> {
        validation::validate_create(&request)?;
        let tags = dedup_tags(&request.tags);
        let note = self.db.insert_note(&request.title, &request.text, &tags)?;
        log::info!("Created note {}", note.id);
        Ok(note)
    }

    pub fn get_note_by_id(&self, id: &str) -> NoteResult<Note> {
        self.db
            .find_note_by_id(id)?
            .ok_or_else(|| NoteError::not_found(id))
    }

    /// Word-frequency statistics for a note's text body.
    pub fn get_note_stats_by_id(&self, id: &str) -> NoteResult<WordStats> {
        let note = self.get_note_by_id(id)?;
        Ok(word_stats::compute(&note.text))
    }

    /// Page of notes, newest first.
    pub fn get_all_notes(&self, page: &PageRequest) -> NoteResult<Vec<Note>> {
        self.db.find_page(page)
    }

    /// Page of notes satisfying the tag query, newest first. An empty query
    /// matches every note; a non-empty query requires all queried tags.
    pub fn get_notes_by_tag(&self, tags: &[Tag], page: &PageRequest) -> NoteResult<Vec<Note>> {
        match TagFilterMode::select(tags) {
            TagFilterMode::AllNotes => self.db.find_page(page),
            mode => self.db.find_page_by_tags(tags, mode, page),
        }
    }

    /// Merge a partial update into an existing note and persist the result.
    pub fn update_note(&self, id: &str, request: UpdateNoteRequest) -> NoteResult<Note> {
        validation::validate_update(&request)?;

        let existing = self.get_note_by_id(id)?;

        let mut request = request;
        if let Some(tags) = request.tags.take() {
            request.tags = Some(dedup_tags(&tags));
        }

        let merged = merge::merge(&existing, &request);
        self.db.replace_note(&merged)?;
        Ok(merged)
    }

    /// Delete a note after confirming it exists. A concurrent delete can
    /// still win the race, in which case this also surfaces NotFound.
    pub fn delete_note(&self, id: &str) -> NoteResult<()> {
        self.get_note_by_id(id)?;
        if !self.db.delete_note_by_id(id)? {
            return Err(NoteError::not_found(id));
        }
        log::info!("Deleted note {}", id);
        Ok(())
    }
}

/// Tags carry set semantics; drop duplicates keeping first occurrence.
fn dedup_tags(tags: &[Tag]) -> Vec<Tag> {
    let mut deduped = Vec::with_capacity(tags.len());
    for tag in tags {
        if !deduped.contains(tag) {
            deduped.push(*tag);
        }
    }
    deduped
}
