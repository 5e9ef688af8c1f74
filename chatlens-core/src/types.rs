//! Core domain types for chatlens
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Conversation** | A chat thread between the archive owner and one counterpart, keyed by an integer id |
//! | **Message** | One immutable record of that thread, as stored in the archive |
//! | **Me** | The archive owner (`from_me = true`) |
//! | **Them** | The counterpart |
//! | **Type code** | The archive's small integer tag for the content kind of a message |

use serde::{Deserialize, Serialize};

// ============================================
// Message
// ============================================

/// A single chat message.
///
/// Built once by a data source and never mutated afterwards. Sequences of
/// messages are expected in non-decreasing `timestamp` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier, unique within the conversation
    pub id: i64,
    /// Send time in milliseconds since the Unix epoch (UTC)
    pub timestamp: i64,
    /// Text payload; `None` for non-text messages
    pub text: Option<String>,
    /// Raw archive type code (see [`MediaKind::from_type_code`])
    pub message_type: i64,
    /// True if the archive owner sent this message
    pub from_me: bool,
}

impl Message {
    /// Text payload, treating an empty string the same as no text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Media category of this message, if it is not plain text.
    pub fn media(&self) -> Option<MediaKind> {
        MediaKind::from_type_code(self.message_type)
    }

    /// Send time in whole seconds.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp as f64 / 1000.0
    }
}

// ============================================
// Media kinds
// ============================================

/// Non-text content categories recognised in the archive.
///
/// The code mapping is fixed by the archive format:
///
/// | Kind | Type codes |
/// |------|------------|
/// | Photo | 1, 42 |
/// | Sticker | 20 |
/// | Audio | 2 |
/// | Video | 3 |
/// | Call | 90 |
/// | Location | 5, 16 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Sticker,
    Audio,
    Video,
    Call,
    Location,
}

impl MediaKind {
    /// All media kinds, in report order.
    pub const ALL: [MediaKind; 6] = [
        MediaKind::Photo,
        MediaKind::Sticker,
        MediaKind::Audio,
        MediaKind::Video,
        MediaKind::Call,
        MediaKind::Location,
    ];

    /// Map an archive type code to a media kind.
    ///
    /// Returns `None` for text and any unrecognised code.
    pub fn from_type_code(code: i64) -> Option<Self> {
        match code {
            1 | 42 => Some(MediaKind::Photo),
            20 => Some(MediaKind::Sticker),
            2 => Some(MediaKind::Audio),
            3 => Some(MediaKind::Video),
            90 => Some(MediaKind::Call),
            5 | 16 => Some(MediaKind::Location),
            _ => None,
        }
    }

    /// Type codes belonging to this kind.
    pub fn type_codes(&self) -> &'static [i64] {
        match self {
            MediaKind::Photo => &[1, 42],
            MediaKind::Sticker => &[20],
            MediaKind::Audio => &[2],
            MediaKind::Video => &[3],
            MediaKind::Call => &[90],
            MediaKind::Location => &[5, 16],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Sticker => "sticker",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Call => "call",
            MediaKind::Location => "location",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(MediaKind::Photo),
            "sticker" => Ok(MediaKind::Sticker),
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            "call" => Ok(MediaKind::Call),
            "location" => Ok(MediaKind::Location),
            _ => Err(format!("unknown media kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: Option<&str>, message_type: i64) -> Message {
        Message {
            id: 1,
            timestamp: 1_500,
            text: text.map(str::to_string),
            message_type,
            from_me: true,
        }
    }

    #[test]
    fn test_empty_text_is_no_text() {
        assert_eq!(message(Some(""), 0).text(), None);
        assert_eq!(message(None, 0).text(), None);
        assert_eq!(message(Some("oi"), 0).text(), Some("oi"));
    }

    #[test]
    fn test_media_kind_codes_round_trip() {
        for kind in MediaKind::ALL {
            for code in kind.type_codes() {
                assert_eq!(MediaKind::from_type_code(*code), Some(kind));
            }
            assert_eq!(kind.as_str().parse::<MediaKind>(), Ok(kind));
        }
        assert_eq!(MediaKind::from_type_code(0), None);
        assert_eq!(MediaKind::from_type_code(7), None);
    }

    #[test]
    fn test_timestamp_secs() {
        assert_eq!(message(None, 0).timestamp_secs(), 1.5);
    }
}
