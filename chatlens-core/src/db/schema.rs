//! Archive schema mapping
//!
//! chatlens never writes to the archive. Everything it knows about the
//! archive layout lives in [`MESSAGE_VIEW`]; queries are built from it and
//! rows are validated on the way in through [`MessageRow`].

use crate::error::Error;
use crate::types::Message;
use rusqlite::Row;

/// Names of the archive view and columns that make up a message.
#[derive(Debug, Clone, Copy)]
pub struct ViewMapping {
    pub view: &'static str,
    /// Column holding the conversation id
    pub conversation: &'static str,
    pub id: &'static str,
    /// Milliseconds since the Unix epoch
    pub timestamp: &'static str,
    pub text: &'static str,
    pub message_type: &'static str,
    /// 0 or 1
    pub from_me: &'static str,
}

/// Layout of the WhatsApp `msgstore.db` message view.
pub const MESSAGE_VIEW: ViewMapping = ViewMapping {
    view: "message_view",
    conversation: "chat_row_id",
    id: "_id",
    timestamp: "timestamp",
    text: "text_data",
    message_type: "message_type",
    from_me: "from_me",
};

impl ViewMapping {
    /// Messages of one conversation (`?1`), ordered by timestamp then id.
    pub fn select_messages_sql(&self) -> String {
        format!(
            "SELECT {id}, {timestamp}, {text}, {message_type}, {from_me} \
             FROM {view} WHERE {conversation} = ?1 \
             ORDER BY {timestamp} ASC, {id} ASC",
            id = self.id,
            timestamp = self.timestamp,
            text = self.text,
            message_type = self.message_type,
            from_me = self.from_me,
            view = self.view,
            conversation = self.conversation,
        )
    }

    /// Number of messages in one conversation (`?1`).
    pub fn count_messages_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?1",
            self.view, self.conversation
        )
    }
}

/// One raw row of [`MESSAGE_VIEW`], as selected by
/// [`ViewMapping::select_messages_sql`].
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub id: i64,
    pub timestamp: i64,
    pub text: Option<String>,
    pub message_type: i64,
    pub from_me: i64,
}

impl MessageRow {
    /// Read a row in select order.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            text: row.get(2)?,
            message_type: row.get(3)?,
            from_me: row.get(4)?,
        })
    }
}

impl TryFrom<MessageRow> for Message {
    type Error = Error;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let from_me = match row.from_me {
            0 => false,
            1 => true,
            other => {
                return Err(Error::InvalidRow {
                    column: MESSAGE_VIEW.from_me,
                    message: format!("message {} has from_me = {}, expected 0 or 1", row.id, other),
                })
            }
        };

        Ok(Message {
            id: row.id,
            timestamp: row.timestamp,
            text: row.text,
            message_type: row.message_type,
            from_me,
        })
    }
}
