//! Conversation analyzer.
//!
//! An [`Analyzer`] borrows the ordered messages of one conversation and
//! computes each statistic on demand. Every operation is a pure read over
//! the slice: calling one twice, or in any order, gives the same result.
//!
//! ```rust,ignore
//! use chatlens_core::analytics::Analyzer;
//!
//! let messages = db.load_messages(42)?;
//! let report = Analyzer::new(&messages, 42).analyze();
//! for entry in &report.entries {
//!     println!("{}: {:?}", entry.metric.name(), entry.value);
//! }
//! ```

use super::calendar::DayBoundary;
use super::metrics_registry::Metric;
use super::report::*;
use super::text;
use super::vocabulary::Vocabulary;
use crate::types::{MediaKind, Message};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

const MS_PER_DAY: i64 = 86_400_000;

/// Tunable parameters of the analysis (`[analysis]` config section).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Number of words in the word ranking
    pub top_words: usize,
    /// Number of emojis in the emoji ranking
    pub top_emojis: usize,
    /// Longest-message candidates must be strictly shorter than this (in characters)
    pub longest_message_max_chars: usize,
    /// Day counts ignored when looking for the quietest day
    pub least_day_excluded_counts: Vec<usize>,
    /// Time zone used for date, hour and weekday bucketing
    pub day_boundary: DayBoundary,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_words: 30,
            top_emojis: 15,
            longest_message_max_chars: 300,
            least_day_excluded_counts: vec![0, 2],
            day_boundary: DayBoundary::Utc,
        }
    }
}

/// Statistics engine for one conversation.
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    messages: &'a [Message],
    conversation_id: i64,
    settings: AnalysisSettings,
    vocabulary: Vocabulary,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer with default settings and vocabulary.
    ///
    /// `messages` must be ordered by timestamp; the analyzer never re-sorts.
    pub fn new(messages: &'a [Message], conversation_id: i64) -> Self {
        Self {
            messages,
            conversation_id,
            settings: AnalysisSettings::default(),
            vocabulary: Vocabulary::default(),
        }
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn conversation_id(&self) -> i64 {
        self.conversation_id
    }

    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    fn texts(&self) -> impl Iterator<Item = &'a str> {
        self.messages.iter().filter_map(Message::text)
    }

    // ============================================
    // Calendar helpers
    // ============================================

    fn local_time(&self, message: &Message) -> MetricResult<NaiveDateTime> {
        self.settings
            .day_boundary
            .local_datetime(message.timestamp)
            .ok_or(MetricError::TimestampOutOfRange {
                message_id: message.id,
                timestamp: message.timestamp,
            })
    }

    fn local_times(&self) -> MetricResult<Vec<NaiveDateTime>> {
        self.messages.iter().map(|m| self.local_time(m)).collect()
    }

    fn day_counts(&self) -> MetricResult<BTreeMap<NaiveDate, usize>> {
        let mut counts = BTreeMap::new();
        for time in self.local_times()? {
            *counts.entry(time.date()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    // ============================================
    // Volume
    // ============================================

    pub fn total_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn messages_by_sender(&self) -> SenderCounts {
        let from_me = self.messages.iter().filter(|m| m.from_me).count();
        SenderCounts {
            from_me,
            from_them: self.messages.len() - from_me,
        }
    }

    /// Messages per elapsed day between the first and last message.
    ///
    /// The elapsed time is floored to whole days with a minimum of one.
    pub fn average_messages_per_day(&self) -> DailyAverage {
        let (Some(first), Some(last)) = (self.messages.first(), self.messages.last()) else {
            return DailyAverage::default();
        };

        let days = last
            .timestamp
            .saturating_sub(first.timestamp)
            .div_euclid(MS_PER_DAY)
            .max(1) as f64;
        let senders = self.messages_by_sender();

        DailyAverage {
            overall: self.messages.len() as f64 / days,
            from_me: senders.from_me as f64 / days,
            from_them: senders.from_them as f64 / days,
        }
    }

    /// Busiest calendar date. Ties go to the earliest date.
    pub fn day_with_most_messages(&self) -> MetricResult<Option<DayCount>> {
        let mut best: Option<DayCount> = None;
        for (date, count) in self.day_counts()? {
            if best.map_or(true, |b| count > b.count) {
                best = Some(DayCount { date, count });
            }
        }
        Ok(best)
    }

    /// Quietest calendar date among days whose count is not excluded.
    /// Ties go to the earliest date.
    pub fn day_with_least_messages(&self) -> MetricResult<Option<DayCount>> {
        let excluded = &self.settings.least_day_excluded_counts;
        let mut best: Option<DayCount> = None;
        for (date, count) in self.day_counts()? {
            if excluded.contains(&count) {
                continue;
            }
            if best.map_or(true, |b| count < b.count) {
                best = Some(DayCount { date, count });
            }
        }
        Ok(best)
    }

    // ============================================
    // Text
    // ============================================

    pub fn most_common_words(&self) -> Vec<(String, usize)> {
        let stop_words = &self.vocabulary.stop_words;
        let words = self.texts().flat_map(|t| {
            let lower = t.to_lowercase();
            text::words(&lower)
                .filter(|w| !stop_words.contains(*w))
                .map(str::to_string)
                .collect::<Vec<_>>()
        });
        text::rank_by_frequency(words, self.settings.top_words)
    }

    pub fn total_words_sent(&self) -> usize {
        self.texts().map(text::word_count).sum()
    }

    pub fn average_word_count_per_message(&self) -> f64 {
        if self.messages.is_empty() {
            return 0.0;
        }
        self.total_words_sent() as f64 / self.messages.len() as f64
    }

    /// Longest text strictly shorter than the configured cap.
    /// Ties go to the earliest message.
    pub fn longest_message(&self) -> Option<Message> {
        let cap = self.settings.longest_message_max_chars;
        let mut best: Option<(&Message, usize)> = None;
        for message in self.messages {
            let Some(body) = message.text() else {
                continue;
            };
            let len = body.chars().count();
            if len >= cap {
                continue;
            }
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((message, len));
            }
        }
        best.map(|(message, _)| message.clone())
    }

    pub fn question_messages_count(&self) -> usize {
        self.texts().filter(|t| t.contains('?')).count()
    }

    pub fn good_morning_night_messages(&self) -> GreetingCounts {
        let mut counts = GreetingCounts::default();
        for body in self.texts() {
            if text::is_good_morning(body) {
                counts.bom_dia += 1;
            }
            if text::is_good_night(body) {
                counts.boa_noite += 1;
            }
        }
        counts
    }

    /// (messages with at least one keyword, total keyword occurrences)
    fn keyword_tally(&self, keywords: &HashSet<String>) -> (usize, usize) {
        self.texts()
            .map(|t| text::keyword_hits(t, keywords))
            .fold((0, 0), |(messages, tokens), hits| {
                (messages + usize::from(hits > 0), tokens + hits)
            })
    }

    /// Messages containing at least one love word.
    pub fn love_messages_count(&self) -> usize {
        self.keyword_tally(&self.vocabulary.love_words).0
    }

    /// Occurrences of love words across all messages.
    pub fn love_words_count(&self) -> usize {
        self.keyword_tally(&self.vocabulary.love_words).1
    }

    pub fn happy_sad_messages_count(&self) -> MoodCounts {
        MoodCounts {
            happy: self.keyword_tally(&self.vocabulary.happy_words).0,
            sad: self.keyword_tally(&self.vocabulary.sad_words).0,
        }
    }

    pub fn happy_sad_words_count(&self) -> MoodCounts {
        MoodCounts {
            happy: self.keyword_tally(&self.vocabulary.happy_words).1,
            sad: self.keyword_tally(&self.vocabulary.sad_words).1,
        }
    }

    pub fn insult_messages_count(&self) -> usize {
        self.keyword_tally(&self.vocabulary.insult_words).0
    }

    pub fn insult_words_count(&self) -> usize {
        self.keyword_tally(&self.vocabulary.insult_words).1
    }

    // ============================================
    // Emoji
    // ============================================

    /// Supplementary-plane code points across all texts (BMP emoji are not counted).
    pub fn number_of_emojis(&self) -> usize {
        self.texts().map(|t| text::emojis(t).count()).sum()
    }

    pub fn most_used_emojis(&self) -> Vec<(char, usize)> {
        text::rank_by_frequency(
            self.texts().flat_map(text::emojis),
            self.settings.top_emojis,
        )
    }

    // ============================================
    // Media
    // ============================================

    pub fn media_count(&self, kind: MediaKind) -> usize {
        self.messages
            .iter()
            .filter(|m| m.media() == Some(kind))
            .count()
    }

    pub fn photo_messages_count(&self) -> usize {
        self.media_count(MediaKind::Photo)
    }

    pub fn sticker_messages_count(&self) -> usize {
        self.media_count(MediaKind::Sticker)
    }

    pub fn audio_messages_count(&self) -> usize {
        self.media_count(MediaKind::Audio)
    }

    pub fn video_messages_count(&self) -> usize {
        self.media_count(MediaKind::Video)
    }

    pub fn call_count(&self) -> usize {
        self.media_count(MediaKind::Call)
    }

    pub fn location_shared_count(&self) -> usize {
        self.media_count(MediaKind::Location)
    }

    /// All media counts in a single pass.
    pub fn media_breakdown(&self) -> MediaCounts {
        let mut counts = MediaCounts::default();
        for kind in self.messages.iter().filter_map(Message::media) {
            match kind {
                MediaKind::Photo => counts.photo += 1,
                MediaKind::Sticker => counts.sticker += 1,
                MediaKind::Audio => counts.audio += 1,
                MediaKind::Video => counts.video += 1,
                MediaKind::Call => counts.call += 1,
                MediaKind::Location => counts.location += 1,
            }
        }
        counts
    }

    // ============================================
    // Temporal distribution
    // ============================================

    /// Messages per hour of day; only hours that occur are present.
    pub fn messages_per_hour(&self) -> MetricResult<BTreeMap<u32, usize>> {
        let mut counts = BTreeMap::new();
        for time in self.local_times()? {
            *counts.entry(time.hour()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Messages per `YYYY-MM`.
    pub fn monthly_frequency_variation(&self) -> MetricResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for time in self.local_times()? {
            *counts.entry(time.format("%Y-%m").to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    pub fn daily_frequency_variation(&self) -> MetricResult<BTreeMap<NaiveDate, usize>> {
        self.day_counts()
    }

    /// Messages per weekday, Monday first; only weekdays that occur are present.
    pub fn weekday_frequency_variation(&self) -> MetricResult<Vec<(Weekday, usize)>> {
        let mut counts = [0usize; 7];
        for time in self.local_times()? {
            counts[time.weekday().num_days_from_monday() as usize] += 1;
        }

        let mut day = Weekday::Mon;
        let mut result = Vec::new();
        for count in counts {
            if count > 0 {
                result.push((day, count));
            }
            day = day.succ();
        }
        Ok(result)
    }

    /// Dates in the inclusive first..last range with no messages, ascending.
    pub fn days_without_messages(&self) -> MetricResult<Vec<NaiveDate>> {
        let counts = self.day_counts()?;
        let (Some(first), Some(last)) = (
            counts.keys().next().copied(),
            counts.keys().next_back().copied(),
        ) else {
            return Ok(Vec::new());
        };

        Ok(first
            .iter_days()
            .take_while(|day| *day <= last)
            .filter(|day| !counts.contains_key(day))
            .collect())
    }

    /// Messages on each configured special date, in configured order.
    pub fn messages_on_special_dates(&self) -> MetricResult<Vec<(String, usize)>> {
        let days: Vec<NaiveDate> = self
            .local_times()?
            .into_iter()
            .map(|t| t.date())
            .collect();

        Ok(self
            .vocabulary
            .special_dates
            .iter()
            .map(|special| {
                let count = days.iter().filter(|day| special.matches(**day)).count();
                (special.name.clone(), count)
            })
            .collect())
    }

    // ============================================
    // Response time
    // ============================================

    /// Average gap between consecutive messages, labelled by the sender of
    /// the later message.
    ///
    /// Gaps are only attributed once a message from me has been seen. The
    /// gap is measured from the previous message in the sequence, whoever
    /// sent it.
    pub fn average_response_time(&self) -> ResponseTimes {
        let (mut me_total, mut me_count) = (0.0, 0usize);
        let (mut them_total, mut them_count) = (0.0, 0usize);
        let mut seen_me = false;
        let mut previous: Option<&Message> = None;

        for message in self.messages {
            if let (true, Some(prev)) = (seen_me, previous) {
                let gap = message.timestamp_secs() - prev.timestamp_secs();
                if message.from_me {
                    me_total += gap;
                    me_count += 1;
                } else {
                    them_total += gap;
                    them_count += 1;
                }
            }
            seen_me |= message.from_me;
            previous = Some(message);
        }

        let average = |total: f64, count: usize| {
            if count == 0 {
                0.0
            } else {
                total / count as f64
            }
        };

        ResponseTimes {
            me: average(me_total, me_count),
            them: average(them_total, them_count),
            overall: average(me_total + them_total, me_count + them_count),
        }
    }

    // ============================================
    // Aggregation
    // ============================================

    /// Compute a single metric as a report value.
    pub fn compute(&self, metric: Metric) -> MetricResult<MetricValue> {
        let value = match metric {
            Metric::TotalMessages => self.total_messages().into(),
            Metric::MessagesBySender => self.messages_by_sender().into(),
            Metric::AverageMessagesPerDay => self.average_messages_per_day().into(),
            Metric::DayWithMostMessages => self.day_with_most_messages()?.into(),
            Metric::DayWithLeastMessages => self.day_with_least_messages()?.into(),
            Metric::MostCommonWords => self.most_common_words().into(),
            Metric::TotalWordsSent => self.total_words_sent().into(),
            Metric::AverageWordCountPerMessage => self.average_word_count_per_message().into(),
            Metric::MessagesPerHour => self.messages_per_hour()?.into(),
            Metric::LongestMessage => self.longest_message().into(),
            Metric::NumberOfEmojis => self.number_of_emojis().into(),
            Metric::MostUsedEmojis => self.most_used_emojis().into(),
            Metric::PhotoMessages => self.photo_messages_count().into(),
            Metric::StickerMessages => self.sticker_messages_count().into(),
            Metric::VideoMessages => self.video_messages_count().into(),
            Metric::AudioMessages => self.audio_messages_count().into(),
            Metric::Calls => self.call_count().into(),
            Metric::LocationMessages => self.location_shared_count().into(),
            Metric::MessagesOnSpecialDates => self.messages_on_special_dates()?.into(),
            Metric::GoodMorningNightMessages => self.good_morning_night_messages().into(),
            Metric::DaysWithoutMessages => self.days_without_messages()?.into(),
            Metric::AverageResponseTime => self.average_response_time().into(),
            Metric::LoveMessages => self.love_messages_count().into(),
            Metric::LoveWords => self.love_words_count().into(),
            Metric::HappySadMessages => self.happy_sad_messages_count().into(),
            Metric::HappySadWords => self.happy_sad_words_count().into(),
            Metric::InsultMessages => self.insult_messages_count().into(),
            Metric::InsultWords => self.insult_words_count().into(),
            Metric::MonthlyFrequency => self.monthly_frequency_variation()?.into(),
            Metric::DailyFrequency => self.daily_frequency_variation()?.into(),
            Metric::WeekdayFrequency => self.weekday_frequency_variation()?.into(),
            Metric::QuestionMessages => self.question_messages_count().into(),
        };
        Ok(value)
    }

    /// Compute every metric once. A failing metric is recorded in its entry
    /// and does not stop the others.
    pub fn analyze(&self) -> ConversationReport {
        let entries = Metric::ALL
            .iter()
            .map(|&metric| {
                let value = self.compute(metric);
                match &value {
                    Ok(_) => tracing::debug!(
                        conversation_id = self.conversation_id,
                        metric = metric.key(),
                        "Computed metric"
                    ),
                    Err(e) => tracing::warn!(
                        conversation_id = self.conversation_id,
                        metric = metric.key(),
                        error = %e,
                        "Metric failed"
                    ),
                }
                ReportEntry { metric, value }
            })
            .collect();

        ConversationReport {
            conversation_id: self.conversation_id,
            message_count: self.messages.len(),
            entries,
        }
    }
}
