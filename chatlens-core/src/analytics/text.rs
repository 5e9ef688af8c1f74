//! Text helpers: tokenization, emoji extraction, greeting patterns and
//! frequency ranking.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::OnceLock;

/// First code point counted as an emoji.
///
/// Only the supplementary planes are scanned. Emoji living in the Basic
/// Multilingual Plane (U+2764 HEAVY BLACK HEART, U+263A, ...) are not counted.
pub const EMOJI_RANGE_START: u32 = 0x1_0000;

const WORD_PATTERN: &str = r"\w+";
const GOOD_MORNING_PATTERN: &str = r"(?i)\b(bom dia[a-z]*|bd)\b";
const GOOD_NIGHT_PATTERN: &str = r"(?i)\b(boa noite[a-z]*|bn)\b";

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("word pattern is valid"))
}

fn good_morning_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GOOD_MORNING_PATTERN).expect("greeting pattern is valid"))
}

fn good_night_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GOOD_NIGHT_PATTERN).expect("greeting pattern is valid"))
}

/// Word tokens of `text` (runs of Unicode word characters).
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    word_regex().find_iter(text).map(|m| m.as_str())
}

/// Number of word tokens in `text`.
pub fn word_count(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

pub fn is_emoji(c: char) -> bool {
    c as u32 >= EMOJI_RANGE_START
}

/// Emoji characters of `text`, in order of appearance.
pub fn emojis(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| is_emoji(*c))
}

/// "Bom dia", its suffixed variants ("bom diaaa") or the shorthand "bd".
pub fn is_good_morning(text: &str) -> bool {
    good_morning_regex().is_match(text)
}

/// "Boa noite", its suffixed variants or the shorthand "bn".
pub fn is_good_night(text: &str) -> bool {
    good_night_regex().is_match(text)
}

/// Number of whitespace-separated tokens of the lowercased `text` found in `keywords`.
pub fn keyword_hits(text: &str, keywords: &HashSet<String>) -> usize {
    if keywords.is_empty() {
        return 0;
    }
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| keywords.contains(*token))
        .count()
}

/// Count items and return the `limit` most frequent, highest count first.
///
/// Items with equal counts keep the order in which they were first seen,
/// so the ranking is deterministic for a given input order.
pub fn rank_by_frequency<T, I>(items: I, limit: usize) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable sort: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_unicode() {
        let tokens: Vec<_> = words("Olá, você tá bem? sim_sim 42").collect();
        assert_eq!(tokens, vec!["Olá", "você", "tá", "bem", "sim_sim", "42"]);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("...!?"), 0);
    }

    #[test]
    fn test_emojis_skip_bmp() {
        let found: Vec<char> = emojis("I love you ❤️😀").collect();
        assert_eq!(found, vec!['😀']);
        assert!(!is_emoji('☺'));
        assert!(is_emoji('🎉'));
    }

    #[test]
    fn test_greetings() {
        assert!(is_good_morning("Bom dia!"));
        assert!(is_good_morning("bom diaaa amor"));
        assert!(is_good_morning("BD"));
        assert!(!is_good_morning("bdx"));
        assert!(!is_good_morning("bom"));

        assert!(is_good_night("Boa noite"));
        assert!(is_good_night("boa noitee"));
        assert!(is_good_night("bn, durma bem"));
        assert!(!is_good_night("bom dia"));
    }

    #[test]
    fn test_keyword_hits_on_whitespace_tokens() {
        let keywords: HashSet<String> = ["amor", "amo"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keyword_hits("Te AMO meu amor", &keywords), 2);
        assert_eq!(keyword_hits("amor amor amor", &keywords), 3);
        // punctuation stays attached to the token
        assert_eq!(keyword_hits("amor!", &keywords), 0);
        assert_eq!(keyword_hits("amor", &HashSet::new()), 0);
    }

    #[test]
    fn test_rank_ties_keep_first_seen_order() {
        let ranked = rank_by_frequency(vec!["b", "a", "c", "a", "b", "d"], 3);
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1)]);
        assert!(rank_by_frequency(Vec::<&str>::new(), 5).is_empty());
        assert!(rank_by_frequency(vec!["x"], 0).is_empty());
    }
}
