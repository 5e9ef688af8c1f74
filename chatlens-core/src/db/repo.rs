//! Database repository layer
//!
//! Read-only access to a chat archive, plus an in-memory source for tests
//! and embedding.

use super::schema::{MessageRow, MESSAGE_VIEW};
use crate::error::{Error, Result};
use crate::types::Message;
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Anything that can produce the ordered messages of a conversation.
pub trait MessageSource {
    /// Messages of `conversation_id` in non-decreasing timestamp order.
    ///
    /// An unknown conversation yields an empty list, not an error.
    fn load_messages(&self, conversation_id: i64) -> Result<Vec<Message>>;
}

/// Read-only handle on a chat archive
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open an existing archive read-only
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DatabaseNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        tracing::debug!(path = %path.display(), "Opened archive");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Count messages in a conversation
    pub fn conversation_message_count(&self, conversation_id: i64) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            &MESSAGE_VIEW.count_messages_sql(),
            [conversation_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }
}

impl MessageSource for Database {
    fn load_messages(&self, conversation_id: i64) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(&MESSAGE_VIEW.select_messages_sql())?;

        let rows = stmt
            .query_map([conversation_id], MessageRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let messages = rows
            .into_iter()
            .map(Message::try_from)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            conversation_id,
            count = messages.len(),
            "Loaded messages"
        );

        Ok(messages)
    }
}

/// Message source backed by in-memory conversations.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    conversations: HashMap<i64, Vec<Message>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a conversation; messages are stored in timestamp order.
    pub fn with_conversation(mut self, conversation_id: i64, mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| (m.timestamp, m.id));
        self.conversations.insert(conversation_id, messages);
        self
    }
}

impl MessageSource for InMemorySource {
    fn load_messages(&self, conversation_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .conversations
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;
    use tempfile::TempDir;

    fn create_archive(dir: &TempDir, rows: &[(i64, i64, i64, Option<&str>, i64, i64)]) -> PathBuf {
        let path = dir.path().join("msgstore.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE message_view (
                _id INTEGER PRIMARY KEY,
                chat_row_id INTEGER NOT NULL,
                from_me INTEGER NOT NULL,
                timestamp INTEGER NOT NULL,
                message_type INTEGER NOT NULL,
                text_data TEXT
            );",
        )
        .unwrap();
        for (id, chat, from_me, text, message_type, timestamp) in rows {
            conn.execute(
                "INSERT INTO message_view (_id, chat_row_id, from_me, timestamp, message_type, text_data)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, chat, from_me, timestamp, message_type, text],
            )
            .unwrap();
        }
        path
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.db");
        match Database::open(&path) {
            Err(Error::DatabaseNotFound(p)) => assert_eq!(p, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected DatabaseNotFound"),
        }
        // opening read-only must not create the file
        assert!(!path.exists());
    }

    #[test]
    fn test_load_messages_ordered_and_filtered() {
        let dir = TempDir::new().unwrap();
        let path = create_archive(
            &dir,
            &[
                (3, 1, 0, Some("terceira"), 0, 3_000),
                (1, 1, 1, Some("primeira"), 0, 1_000),
                (2, 2, 1, Some("outra conversa"), 0, 2_000),
                (5, 1, 1, None, 1, 2_000),
                (4, 1, 0, Some("empate"), 0, 2_000),
            ],
        );
        let db = Database::open(&path).unwrap();

        let messages = db.load_messages(1).unwrap();
        let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 4, 5, 3]);
        assert!(messages[0].from_me);
        assert_eq!(messages[2].text, None);
        assert_eq!(messages[2].message_type, 1);

        assert_eq!(db.conversation_message_count(1).unwrap(), 4);
    }

    #[test]
    fn test_unknown_conversation_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = create_archive(&dir, &[(1, 1, 1, Some("oi"), 0, 1_000)]);
        let db = Database::open(&path).unwrap();
        assert!(db.load_messages(99).unwrap().is_empty());
        assert_eq!(db.conversation_message_count(99).unwrap(), 0);
    }

    #[test]
    fn test_invalid_from_me_rejected() {
        let dir = TempDir::new().unwrap();
        let path = create_archive(&dir, &[(1, 1, 5, Some("oi"), 0, 1_000)]);
        let db = Database::open(&path).unwrap();
        assert!(matches!(
            db.load_messages(1),
            Err(Error::InvalidRow { column: "from_me", .. })
        ));
    }

    #[test]
    fn test_missing_view_is_database_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (x INTEGER);")
            .unwrap();
        let db = Database::open(&path).unwrap();
        assert!(matches!(db.load_messages(1), Err(Error::Database(_))));
    }

    #[test]
    fn test_in_memory_source_sorts() {
        let message = |id, timestamp| Message {
            id,
            timestamp,
            text: None,
            message_type: 0,
            from_me: false,
        };
        let source =
            InMemorySource::new().with_conversation(1, vec![message(2, 20), message(1, 10)]);
        let ids: Vec<i64> = source
            .load_messages(1)
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(source.load_messages(2).unwrap().is_empty());
    }
}
