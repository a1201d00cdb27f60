use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NoteError, NoteResult};

/// Label from the closed vocabulary used to classify notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Business,
    Personal,
    Important,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Business => "BUSINESS",
            Tag::Personal => "PERSONAL",
            Tag::Important => "IMPORTANT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BUSINESS" => Some(Tag::Business),
            "PERSONAL" => Some(Tag::Personal),
            "IMPORTANT" => Some(Tag::Important),
            _ => None,
        }
    }
}

/// Note - the persisted text record this system manages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub text: String,
    pub tags: Vec<Tag>,
    pub created_date: DateTime<Utc>,
}

/// Request to create a note
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Partial update for an existing note.
///
/// Each field is replaced only when present in the request body: an omitted
/// field deserializes to `None` and keeps the stored value, while
/// `"tags": []` deserializes to `Some(vec![])` and clears the tag set. The
/// `Option` is the presence flag that keeps those two cases distinguishable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub text: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

/// Summary of a note for list views
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    pub id: String,
    pub title: String,
    pub created_date: DateTime<Utc>,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        NoteSummary {
            id: note.id.clone(),
            title: note.title.clone(),
            created_date: note.created_date,
        }
    }
}

/// Standardized error body returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status: u16) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Zero-based page request; size must be at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> NoteResult<Self> {
        if size < 1 {
            return Err(NoteError::validation("size", "page size must be at least 1"));
        }
        Ok(PageRequest { page, size })
    }

    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    pub fn limit(&self) -> usize {
        self.size as usize
    }
}
