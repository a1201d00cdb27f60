//! Tag filter policy for note queries.

use crate::models::Tag;

/// How a tag query is applied to stored notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilterMode {
    /// Empty query: every note matches, no tag predicate is applied.
    AllNotes,
    /// A note matches only if it carries every queried tag.
    Intersection,
    /// A note matches if it carries at least one queried tag.
    Union,
}

impl TagFilterMode {
    /// Policy for a tag query: an empty query matches all notes; a
    /// non-empty query requires every queried tag to be present. Union is
    /// never selected implicitly and must be requested by mode value.
    pub fn select(query_tags: &[Tag]) -> Self {
        if query_tags.is_empty() {
            TagFilterMode::AllNotes
        } else {
            TagFilterMode::Intersection
        }
    }

    /// Whether a note with the given tags satisfies the query under this
    /// mode. Matching is set membership: order and duplicates in either
    /// list are irrelevant.
    pub fn matches(self, note_tags: &[Tag], query_tags: &[Tag]) -> bool {
        match self {
            TagFilterMode::AllNotes => true,
            TagFilterMode::Intersection => query_tags.iter().all(|t| note_tags.contains(t)),
            TagFilterMode::Union => query_tags.iter().any(|t| note_tags.contains(t)),
        }
    }
}
