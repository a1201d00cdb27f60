//! Word-frequency statistics for note text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("invalid delimiter pattern"));

/// Word-frequency table preserving the order in which each distinct word
/// first appears in the source text. Serializes as a JSON object in that
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordStats {
    entries: Vec<(String, u64)>,
}

impl WordStats {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, word: &str) -> Option<u64> {
        self.entries.iter().find(|(w, _)| w == word).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, u64)> {
        self.entries.iter()
    }

    /// Sum of all occurrence counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for WordStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, count) in &self.entries {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

/// Count word occurrences in the given text.
///
/// Words are maximal runs of letters, digits, and underscores; anything else
/// is a delimiter. Counting is case-insensitive and the result preserves
/// first-occurrence order. Blank input yields empty stats, not an error.
pub fn compute(text: &str) -> WordStats {
    if text.trim().is_empty() {
        return WordStats::default();
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for fragment in NON_WORD.split(text) {
        if fragment.is_empty() {
            continue;
        }
        match counts.entry(fragment.to_lowercase()) {
            Entry::Occupied(mut entry) => *entry.get_mut() += 1,
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(1);
            }
        }
    }

    WordStats {
        entries: order
            .into_iter()
            .map(|word| {
                let count = counts[&word];
                (word, count)
            })
            .collect(),
    }
}
