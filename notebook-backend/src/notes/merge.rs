//! Partial-update merging for notes.

use crate::models::{Note, UpdateNoteRequest};

/// Apply a partial update onto an existing note, returning the merged value
/// ready for the store's replace operation. `id` and `created_date` are
/// never touched. A field is replaced only when the update carries it; tags
/// supplied as an empty list clear the tag set, while tags left out keep the
/// stored set. Inputs are assumed pre-validated (see `validation`).
pub fn merge(existing: &Note, update: &UpdateNoteRequest) -> Note {
    Note {
        id: existing.id.clone(),
        title: update.title.clone().unwrap_or_else(|| existing.title.clone()),
        text: update.text.clone().unwrap_or_else(|| existing.text.clone()),
        tags: update.tags.clone().unwrap_or_else(|| existing.tags.clone()),
        created_date: existing.created_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use chrono::Utc;

    fn sample_note() -> Note {
        Note {
            id: "note-1".to_string(),
            title: "Original title".to_string(),
            text: "Original text".to_string(),
            tags: vec![Tag::Personal, Tag::Important],
            created_date: Utc::now(),
        }
    }

    #[test]
    fn empty_update_is_identity() {
        let note = sample_note();
        let merged = merge(&note, &UpdateNoteRequest::default());
        assert_eq!(merged, note);
    }

    #[test]
    fn replaces_only_supplied_fields() {
        let note = sample_note();
        let update = UpdateNoteRequest {
            title: Some("New title".to_string()),
            ..Default::default()
        };

        let merged = merge(&note, &update);
        assert_eq!(merged.title, "New title");
        assert_eq!(merged.text, note.text);
        assert_eq!(merged.tags, note.tags);
    }

    #[test]
    fn empty_tags_clear_while_omitted_tags_keep() {
        let note = sample_note();

        let cleared = merge(
            &note,
            &UpdateNoteRequest {
                tags: Some(vec![]),
                ..Default::default()
            },
        );
        let untouched = merge(&note, &UpdateNoteRequest::default());

        assert!(cleared.tags.is_empty());
        assert_eq!(untouched.tags, note.tags);
        assert_ne!(cleared, untouched);
    }

    #[test]
    fn never_mutates_id_or_created_date() {
        let note = sample_note();
        let update = UpdateNoteRequest {
            title: Some("x".to_string()),
            text: Some("y".to_string()),
            tags: Some(vec![Tag::Business]),
        };

        let merged = merge(&note, &update);
        assert_eq!(merged.id, note.id);
        assert_eq!(merged.created_date, note.created_date);
    }
}
