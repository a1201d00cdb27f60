//! Input validation for note requests.
//!
//! All validators return `NoteError::Validation` on failure; merge and the
//! store assume their inputs already passed these checks.

use crate::error::{NoteError, NoteResult};
use crate::models::{CreateNoteRequest, UpdateNoteRequest};

/// Title and text are mandatory on create and must not be blank.
pub fn validate_create(request: &CreateNoteRequest) -> NoteResult<()> {
    if request.title.trim().is_empty() {
        return Err(NoteError::validation("title", "title is mandatory"));
    }
    if request.text.trim().is_empty() {
        return Err(NoteError::validation("text", "text content is mandatory"));
    }
    Ok(())
}

/// Update fields are optional, but a supplied title or text must not be
/// blank.
pub fn validate_update(request: &UpdateNoteRequest) -> NoteResult<()> {
    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(NoteError::validation(
                "title",
                "title cannot be empty if provided",
            ));
        }
    }
    if let Some(text) = &request.text {
        if text.trim().is_empty() {
            return Err(NoteError::validation(
                "text",
                "text content cannot be empty if provided",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn create_requires_non_blank_title_and_text() {
        let ok = CreateNoteRequest {
            title: "t".to_string(),
            text: "x".to_string(),
            tags: vec![],
        };
        assert!(validate_create(&ok).is_ok());

        let blank_title = CreateNoteRequest {
            title: "   ".to_string(),
            ..ok.clone()
        };
        assert!(matches!(
            validate_create(&blank_title),
            Err(NoteError::Validation { .. })
        ));

        let blank_text = CreateNoteRequest {
            text: String::new(),
            ..ok
        };
        assert!(validate_create(&blank_text).is_err());
    }

    #[test]
    fn update_accepts_omitted_fields() {
        assert!(validate_update(&UpdateNoteRequest::default()).is_ok());
        assert!(
            validate_update(&UpdateNoteRequest {
                tags: Some(vec![Tag::Business]),
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn update_rejects_supplied_blank_fields() {
        let blank_title = UpdateNoteRequest {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_update(&blank_title).is_err());

        let blank_text = UpdateNoteRequest {
            text: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&blank_text).is_err());
    }
}
