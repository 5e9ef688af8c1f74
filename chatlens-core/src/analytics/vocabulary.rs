//! Keyword vocabularies used by the text metrics.
//!
//! All lists are plain configuration data (see the `[vocabulary]` section of
//! the config file). The defaults target Brazilian Portuguese chats.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// Date format used for special dates in the config file.
pub const SPECIAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Word lists and special dates consulted by the analyzer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Language connectors excluded from the word ranking
    pub stop_words: HashSet<String>,
    pub love_words: HashSet<String>,
    pub happy_words: HashSet<String>,
    pub sad_words: HashSet<String>,
    pub insult_words: HashSet<String>,
    /// Named dates to tally messages on, in report order
    pub special_dates: Vec<SpecialDate>,
}

/// A named calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    /// Parsed from `DD-MM-YYYY`
    #[serde(deserialize_with = "deserialize_special_date")]
    pub date: NaiveDate,
    /// Match day and month in every year instead of the exact date
    #[serde(default)]
    pub recurring: bool,
}

impl SpecialDate {
    pub fn exact(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            recurring: false,
        }
    }

    pub fn recurring(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            recurring: true,
        }
    }

    /// Whether a message sent on `day` falls on this special date.
    pub fn matches(&self, day: NaiveDate) -> bool {
        if self.recurring {
            day.month() == self.date.month() && day.day() == self.date.day()
        } else {
            day == self.date
        }
    }
}

fn deserialize_special_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&raw, SPECIAL_DATE_FORMAT).map_err(|e| {
        serde::de::Error::custom(format!(
            "invalid special date {:?} (expected DD-MM-YYYY): {}",
            raw, e
        ))
    })
}

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "o", "e", "é", "de", "da", "do", "das", "dos", "que", "em", "no", "na", "nos", "nas",
    "um", "uma", "uns", "umas", "os", "as", "para", "pra", "pro", "com", "por", "se", "mas",
    "ou", "não", "nao", "eu", "tu", "vc", "você", "voce", "ele", "ela", "me", "te", "mais",
    "já", "ja", "tá", "ta", "q", "isso", "esse", "essa", "isto", "ao", "aos", "à", "foi",
    "ser", "tem", "meu", "minha", "seu", "sua", "só", "so", "também", "tambem",
];

const DEFAULT_LOVE_WORDS: &[&str] = &[
    "amor", "amo", "amorzinho", "amore", "paixão", "paixao", "saudade", "saudades", "querida",
    "querido", "coração", "coracao", "love", "vida", "linda", "lindo",
];

const DEFAULT_HAPPY_WORDS: &[&str] = &[
    "feliz", "felicidade", "alegre", "alegria", "contente", "ótimo", "otimo", "legal",
    "maravilhoso", "maravilhosa", "incrível", "incrivel", "haha", "hahaha", "kkk", "kkkk",
    "rs",
];

const DEFAULT_SAD_WORDS: &[&str] = &[
    "triste", "tristeza", "chateado", "chateada", "chorando", "chorar", "chorei", "mal",
    "sozinho", "sozinha", "deprimido", "deprimida", "magoado", "magoada",
];

const DEFAULT_INSULT_WORDS: &[&str] = &[
    "idiota", "burro", "burra", "imbecil", "otário", "otario", "babaca", "trouxa", "chato",
    "chata", "ridículo", "ridiculo",
];

fn default_special_dates() -> Vec<SpecialDate> {
    [
        ("Ano Novo", 1, 1),
        ("Dia dos Namorados", 6, 12),
        ("Natal", 12, 25),
    ]
    .into_iter()
    .filter_map(|(name, month, day)| {
        NaiveDate::from_ymd_opt(2000, month, day).map(|date| SpecialDate::recurring(name, date))
    })
    .collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stop_words: word_set(DEFAULT_STOP_WORDS),
            love_words: word_set(DEFAULT_LOVE_WORDS),
            happy_words: word_set(DEFAULT_HAPPY_WORDS),
            sad_words: word_set(DEFAULT_SAD_WORDS),
            insult_words: word_set(DEFAULT_INSULT_WORDS),
            special_dates: default_special_dates(),
        }
    }
}

impl Vocabulary {
    /// A vocabulary with every list empty.
    pub fn empty() -> Self {
        Self {
            stop_words: HashSet::new(),
            love_words: HashSet::new(),
            happy_words: HashSet::new(),
            sad_words: HashSet::new(),
            insult_words: HashSet::new(),
            special_dates: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lowercase() {
        let vocab = Vocabulary::default();
        for set in [
            &vocab.stop_words,
            &vocab.love_words,
            &vocab.happy_words,
            &vocab.sad_words,
            &vocab.insult_words,
        ] {
            assert!(!set.is_empty());
            assert!(set.iter().all(|w| *w == w.to_lowercase()));
        }
        assert_eq!(vocab.special_dates.len(), 3);
    }

    #[test]
    fn test_parse_vocabulary_section() {
        let toml = r#"
love_words = ["love", "amor"]

[[special_dates]]
name = "Aniversário"
date = "14-02-2023"

[[special_dates]]
name = "Natal"
date = "25-12-2000"
recurring = true
"#;
        let vocab: Vocabulary = toml::from_str(toml).unwrap();
        assert_eq!(vocab.love_words.len(), 2);
        // unspecified lists keep their defaults
        assert!(vocab.stop_words.contains("que"));
        assert_eq!(
            vocab.special_dates[0],
            SpecialDate::exact("Aniversário", NaiveDate::from_ymd_opt(2023, 2, 14).unwrap())
        );
        assert!(vocab.special_dates[1].recurring);
    }

    #[test]
    fn test_invalid_special_date() {
        let toml = r#"
[[special_dates]]
name = "Broken"
date = "2023-02-14"
"#;
        let err = toml::from_str::<Vocabulary>(toml).unwrap_err();
        assert!(err.to_string().contains("DD-MM-YYYY"));
    }

    #[test]
    fn test_special_date_matching() {
        let day = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let exact = SpecialDate::exact("Natal 2022", NaiveDate::from_ymd_opt(2022, 12, 25).unwrap());
        let yearly = SpecialDate::recurring("Natal", NaiveDate::from_ymd_opt(2000, 12, 25).unwrap());
        assert!(!exact.matches(day));
        assert!(yearly.matches(day));
    }
}
