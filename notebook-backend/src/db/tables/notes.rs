//! Note table operations

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use super::super::Database;
use crate::error::NoteResult;
use crate::models::{Note, PageRequest, Tag};
use crate::notes::tag_filter::TagFilterMode;

impl Database {
    /// Insert a new note, assigning its id and creation timestamp.
    pub fn insert_note(&self, title: &str, text: &str, tags: &[Tag]) -> NoteResult<Note> {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            text: text.to_string(),
            tags: tags.to_vec(),
            created_date: Utc::now(),
        };
        let tags_json = serde_json::to_string(&note.tags)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO notes (id, title, text, tags, created_date) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                note.id,
                note.title,
                note.text,
                tags_json,
                note.created_date.to_rfc3339(),
            ],
        )?;
        for tag in &note.tags {
            tx.execute(
                "INSERT OR IGNORE INTO note_tags (note_id, tag) VALUES (?1, ?2)",
                rusqlite::params![note.id, tag.as_str()],
            )?;
        }
        tx.commit()?;

        Ok(note)
    }

    pub fn find_note_by_id(&self, id: &str) -> NoteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let note = conn
            .query_row(
                "SELECT id, title, text, tags, created_date FROM notes WHERE id = ?1",
                [id],
                Self::row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    /// Page of notes ordered by creation date, newest first.
    pub fn find_page(&self, page: &PageRequest) -> NoteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, title, text, tags, created_date FROM notes
             ORDER BY created_date DESC LIMIT ?1 OFFSET ?2",
        )?;
        let notes = stmt
            .query_map(
                rusqlite::params![page.limit() as i64, page.offset() as i64],
                Self::row_to_note,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Page of notes satisfying the tag query under the given filter mode,
    /// ordered by creation date descending.
    ///
    /// SQL narrows the scan to notes carrying at least one queried tag; the
    /// mode predicate then makes the final ALL/ANY decision, and pagination
    /// is applied after filtering.
    pub fn find_page_by_tags(
        &self,
        tags: &[Tag],
        mode: TagFilterMode,
        page: &PageRequest,
    ) -> NoteResult<Vec<Note>> {
        if tags.is_empty() || mode == TagFilterMode::AllNotes {
            return self.find_page(page);
        }

        let candidates = {
            let conn = self.conn.lock().unwrap();
            let placeholders: Vec<String> = (1..=tags.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT id, title, text, tags, created_date FROM notes n
                 WHERE EXISTS (SELECT 1 FROM note_tags t
                               WHERE t.note_id = n.id AND t.tag IN ({}))
                 ORDER BY created_date DESC",
                placeholders.join(", ")
            );
            let mut stmt = conn.prepare(&sql)?;

            let params: Vec<Box<dyn rusqlite::ToSql>> = tags
                .iter()
                .map(|t| Box::new(t.as_str().to_string()) as Box<dyn rusqlite::ToSql>)
                .collect();
            let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

            stmt.query_map(params_ref.as_slice(), Self::row_to_note)?
                .collect::<Result<Vec<_>, _>>()?
        };

        let notes = candidates
            .into_iter()
            .filter(|note| mode.matches(&note.tags, tags))
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(notes)
    }

    /// Replace the stored note with the given value (matched by id).
    pub fn replace_note(&self, note: &Note) -> NoteResult<()> {
        let tags_json = serde_json::to_string(&note.tags)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE notes SET title = ?2, text = ?3, tags = ?4 WHERE id = ?1",
            rusqlite::params![note.id, note.title, note.text, tags_json],
        )?;
        tx.execute("DELETE FROM note_tags WHERE note_id = ?1", [&note.id])?;
        for tag in &note.tags {
            tx.execute(
                "INSERT OR IGNORE INTO note_tags (note_id, tag) VALUES (?1, ?2)",
                rusqlite::params![note.id, tag.as_str()],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Delete a note; returns whether a row was removed.
    pub fn delete_note_by_id(&self, id: &str) -> NoteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(rows_affected > 0)
    }

    pub fn count_notes(&self) -> NoteResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let tags_json: String = row.get(3)?;
        let created_date_str: String = row.get(4)?;

        let tags: Vec<Tag> = serde_json::from_str(&tags_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
        let created_date = DateTime::parse_from_rfc3339(&created_date_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            tags,
            created_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_test_db(dir: &TempDir) -> Database {
        let db_path = dir.path().join("notes.db");
        Database::new(db_path.to_str().unwrap()).expect("Failed to open database")
    }

    fn page(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size).unwrap()
    }

    #[test]
    fn insert_assigns_id_and_created_date() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        let note = db
            .insert_note("Test Note", "Test content", &[Tag::Personal])
            .expect("Failed to insert note");

        assert!(!note.id.is_empty());
        assert_eq!(note.title, "Test Note");
        assert_eq!(note.tags, vec![Tag::Personal]);

        let other = db.insert_note("Other", "Other content", &[]).unwrap();
        assert_ne!(note.id, other.id);
    }

    #[test]
    fn find_by_id_round_trips() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        let created = db
            .insert_note("Roundtrip", "Some body text", &[Tag::Business, Tag::Important])
            .unwrap();

        let found = db.find_note_by_id(&created.id).unwrap().expect("note missing");
        assert_eq!(found, created);

        assert!(db.find_note_by_id("no-such-id").unwrap().is_none());
    }

    #[test]
    fn find_page_orders_newest_first_and_paginates() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        let a = db.insert_note("A", "first", &[]).unwrap();
        let b = db.insert_note("B", "second", &[]).unwrap();
        let c = db.insert_note("C", "third", &[]).unwrap();

        let first_page = db.find_page(&page(0, 2)).unwrap();
        let ids: Vec<&str> = first_page.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), b.id.as_str()]);

        let second_page = db.find_page(&page(1, 2)).unwrap();
        let ids: Vec<&str> = second_page.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str()]);
    }

    #[test]
    fn find_page_by_tags_requires_all_queried_tags() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        db.insert_note("Business only", "b", &[Tag::Business]).unwrap();
        let both = db
            .insert_note("Business and important", "bi", &[Tag::Business, Tag::Important])
            .unwrap();

        let notes = db
            .find_page_by_tags(
                &[Tag::Business, Tag::Important],
                TagFilterMode::Intersection,
                &page(0, 10),
            )
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, both.id);

        let notes = db
            .find_page_by_tags(&[Tag::Business], TagFilterMode::Intersection, &page(0, 10))
            .unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn find_page_by_tags_union_mode_matches_any() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        db.insert_note("Personal", "p", &[Tag::Personal]).unwrap();
        db.insert_note("Important", "i", &[Tag::Important]).unwrap();
        db.insert_note("Untagged", "u", &[]).unwrap();

        let notes = db
            .find_page_by_tags(
                &[Tag::Personal, Tag::Important],
                TagFilterMode::Union,
                &page(0, 10),
            )
            .unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| !n.tags.is_empty()));
    }

    #[test]
    fn find_page_by_tags_paginates_after_filtering() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        for i in 0..3 {
            db.insert_note(&format!("Tagged {}", i), "t", &[Tag::Business]).unwrap();
            db.insert_note(&format!("Plain {}", i), "p", &[]).unwrap();
        }

        let first = db
            .find_page_by_tags(&[Tag::Business], TagFilterMode::Intersection, &page(0, 2))
            .unwrap();
        let second = db
            .find_page_by_tags(&[Tag::Business], TagFilterMode::Intersection, &page(1, 2))
            .unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(first.iter().chain(&second).all(|n| n.tags == vec![Tag::Business]));
    }

    #[test]
    fn replace_persists_new_field_values() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        let mut note = db
            .insert_note("Before", "old text", &[Tag::Personal])
            .unwrap();
        note.title = "After".to_string();
        note.text = "new text".to_string();
        note.tags = vec![];

        db.replace_note(&note).unwrap();

        let found = db.find_note_by_id(&note.id).unwrap().unwrap();
        assert_eq!(found.title, "After");
        assert_eq!(found.text, "new text");
        assert!(found.tags.is_empty());
        assert_eq!(found.created_date, note.created_date);

        // the tag mirror no longer matches the cleared note
        let notes = db
            .find_page_by_tags(&[Tag::Personal], TagFilterMode::Intersection, &page(0, 10))
            .unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn delete_removes_row_once() {
        let dir = TempDir::new().unwrap();
        let db = open_test_db(&dir);

        let note = db.insert_note("Doomed", "bye", &[Tag::Important]).unwrap();

        assert!(db.delete_note_by_id(&note.id).unwrap());
        assert!(db.find_note_by_id(&note.id).unwrap().is_none());
        assert!(!db.delete_note_by_id(&note.id).unwrap());
        assert_eq!(db.count_notes().unwrap(), 0);
    }
}
