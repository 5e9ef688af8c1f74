//! Metrics registry for discovery and documentation.
//!
//! [`Metric`] is the closed set of statistics a report contains. The
//! [`METRICS`] table carries the stable report name, the artifact key and a
//! one-line summary for each of them.

/// Shape of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricValueType {
    Count,
    Average,
    Table,
    Averages,
    Day,
    Message,
    Dates,
}

impl MetricValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricValueType::Count => "count",
            MetricValueType::Average => "average",
            MetricValueType::Table => "table",
            MetricValueType::Averages => "averages",
            MetricValueType::Day => "day",
            MetricValueType::Message => "message",
            MetricValueType::Dates => "dates",
        }
    }
}

/// Every statistic computed for a conversation, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalMessages,
    MessagesBySender,
    AverageMessagesPerDay,
    DayWithMostMessages,
    DayWithLeastMessages,
    MostCommonWords,
    TotalWordsSent,
    AverageWordCountPerMessage,
    MessagesPerHour,
    LongestMessage,
    NumberOfEmojis,
    MostUsedEmojis,
    PhotoMessages,
    StickerMessages,
    VideoMessages,
    AudioMessages,
    Calls,
    LocationMessages,
    MessagesOnSpecialDates,
    GoodMorningNightMessages,
    DaysWithoutMessages,
    AverageResponseTime,
    LoveMessages,
    LoveWords,
    HappySadMessages,
    HappySadWords,
    InsultMessages,
    InsultWords,
    MonthlyFrequency,
    DailyFrequency,
    WeekdayFrequency,
    QuestionMessages,
}

/// Descriptor for a metric.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    pub metric: Metric,
    /// Snake-case key, used to name per-metric artifacts
    pub key: &'static str,
    /// Human-readable report name
    pub name: &'static str,
    pub value_type: MetricValueType,
    pub summary: &'static str,
}

const fn descriptor(
    metric: Metric,
    key: &'static str,
    name: &'static str,
    value_type: MetricValueType,
    summary: &'static str,
) -> MetricDescriptor {
    MetricDescriptor {
        metric,
        key,
        name,
        value_type,
        summary,
    }
}

use MetricValueType as V;

/// Registered metrics, indexed by `Metric as usize`.
#[rustfmt::skip]
pub const METRICS: &[MetricDescriptor] = &[
    descriptor(Metric::TotalMessages, "total_messages", "Total Messages", V::Count,
        "Number of messages in the conversation."),
    descriptor(Metric::MessagesBySender, "messages_by_sender", "Messages by Sender", V::Table,
        "Messages sent by me and by them."),
    descriptor(Metric::AverageMessagesPerDay, "average_messages_per_day", "Average Messages per Day", V::Averages,
        "Messages per elapsed day (at least one day), overall and per sender."),
    descriptor(Metric::DayWithMostMessages, "day_with_most_messages", "Day with Most Messages", V::Day,
        "Calendar date with the most messages; earliest date wins ties."),
    descriptor(Metric::DayWithLeastMessages, "day_with_least_messages", "Day with Least Messages", V::Day,
        "Calendar date with the fewest messages, skipping excluded counts."),
    descriptor(Metric::MostCommonWords, "most_common_words", "Most Common Words", V::Table,
        "Most frequent lowercased words, stop words removed."),
    descriptor(Metric::TotalWordsSent, "total_words_sent", "Total Words Sent", V::Count,
        "Word tokens across all text messages."),
    descriptor(Metric::AverageWordCountPerMessage, "average_word_count_per_message", "Average Word Count per Message", V::Average,
        "Total words divided by total messages."),
    descriptor(Metric::MessagesPerHour, "messages_per_hour", "Messages per Hour", V::Table,
        "Messages by hour of day (0-23)."),
    descriptor(Metric::LongestMessage, "longest_message", "Longest Message", V::Message,
        "Longest text under the configured length cap."),
    descriptor(Metric::NumberOfEmojis, "number_of_emojis", "Number of Emojis", V::Count,
        "Supplementary-plane code points across all texts."),
    descriptor(Metric::MostUsedEmojis, "most_used_emojis", "Most Used Emoji", V::Table,
        "Most frequent emojis."),
    descriptor(Metric::PhotoMessages, "photo_messages_count", "Photo Messages Count", V::Count,
        "Messages with type code 1 or 42."),
    descriptor(Metric::StickerMessages, "sticker_messages_count", "Sticker Messages Count", V::Count,
        "Messages with type code 20."),
    descriptor(Metric::VideoMessages, "video_messages_count", "Video Messages Count", V::Count,
        "Messages with type code 3."),
    descriptor(Metric::AudioMessages, "audio_messages_count", "Audio Messages Count", V::Count,
        "Messages with type code 2."),
    descriptor(Metric::Calls, "call_count", "Call Count", V::Count,
        "Messages with type code 90."),
    descriptor(Metric::LocationMessages, "location_messages_count", "Location Messages Count", V::Count,
        "Messages with type code 5 or 16."),
    descriptor(Metric::MessagesOnSpecialDates, "messages_on_special_dates", "Messages on Special Dates", V::Table,
        "Messages sent on each configured special date."),
    descriptor(Metric::GoodMorningNightMessages, "good_morning_night_messages", "Good Morning/Night Messages", V::Table,
        "Messages with a good-morning or good-night greeting."),
    descriptor(Metric::DaysWithoutMessages, "days_without_messages", "Days Without Messages", V::Dates,
        "Dates between the first and last message with no messages."),
    descriptor(Metric::AverageResponseTime, "average_response_time", "Average Response Time", V::Averages,
        "Mean gap in seconds between consecutive messages, by the sender of the later one."),
    descriptor(Metric::LoveMessages, "love_messages_count", "Count Love Messages", V::Count,
        "Messages containing at least one love word."),
    descriptor(Metric::LoveWords, "love_words_count", "Love Words Count", V::Count,
        "Occurrences of love words."),
    descriptor(Metric::HappySadMessages, "happy_sad_messages_count", "Happy/Sad Messages Count", V::Table,
        "Messages containing at least one happy or sad word."),
    descriptor(Metric::HappySadWords, "happy_sad_words_count", "Happy/Sad Words Count", V::Table,
        "Occurrences of happy and sad words."),
    descriptor(Metric::InsultMessages, "insult_messages_count", "Insult Messages Count", V::Count,
        "Messages containing at least one insult."),
    descriptor(Metric::InsultWords, "insult_words_count", "Insult Words Count", V::Count,
        "Occurrences of insults."),
    descriptor(Metric::MonthlyFrequency, "monthly_frequency_variation", "Monthly Message Frequency Variation", V::Table,
        "Messages per year-month."),
    descriptor(Metric::DailyFrequency, "daily_frequency_variation", "Daily Message Frequency Variation", V::Table,
        "Messages per calendar date."),
    descriptor(Metric::WeekdayFrequency, "weekday_frequency_variation", "Weekday Message Frequency Variation", V::Table,
        "Messages per weekday, Monday first."),
    descriptor(Metric::QuestionMessages, "question_messages_count", "Question Messages Count", V::Count,
        "Messages containing a question mark."),
];

impl Metric {
    /// Every metric, in report order.
    pub const ALL: [Metric; 32] = [
        Metric::TotalMessages,
        Metric::MessagesBySender,
        Metric::AverageMessagesPerDay,
        Metric::DayWithMostMessages,
        Metric::DayWithLeastMessages,
        Metric::MostCommonWords,
        Metric::TotalWordsSent,
        Metric::AverageWordCountPerMessage,
        Metric::MessagesPerHour,
        Metric::LongestMessage,
        Metric::NumberOfEmojis,
        Metric::MostUsedEmojis,
        Metric::PhotoMessages,
        Metric::StickerMessages,
        Metric::VideoMessages,
        Metric::AudioMessages,
        Metric::Calls,
        Metric::LocationMessages,
        Metric::MessagesOnSpecialDates,
        Metric::GoodMorningNightMessages,
        Metric::DaysWithoutMessages,
        Metric::AverageResponseTime,
        Metric::LoveMessages,
        Metric::LoveWords,
        Metric::HappySadMessages,
        Metric::HappySadWords,
        Metric::InsultMessages,
        Metric::InsultWords,
        Metric::MonthlyFrequency,
        Metric::DailyFrequency,
        Metric::WeekdayFrequency,
        Metric::QuestionMessages,
    ];

    pub fn descriptor(&self) -> &'static MetricDescriptor {
        &METRICS[*self as usize]
    }

    /// Stable human-readable report name (e.g. "Total Messages").
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Snake-case key (e.g. "total_messages").
    pub fn key(&self) -> &'static str {
        self.descriptor().key
    }

    pub fn summary(&self) -> &'static str {
        self.descriptor().summary
    }

    pub fn value_type(&self) -> MetricValueType {
        self.descriptor().value_type
    }

    /// Look up a metric by its key.
    pub fn from_key(key: &str) -> Option<Metric> {
        METRICS.iter().find(|d| d.key == key).map(|d| d.metric)
    }
}

/// List all registered metrics.
pub fn list_metrics() -> Vec<MetricDescriptor> {
    METRICS.to_vec()
}

/// List metrics producing a given value shape.
pub fn list_metrics_of_type(value_type: MetricValueType) -> Vec<MetricDescriptor> {
    METRICS
        .iter()
        .filter(|m| m.value_type == value_type)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_matches_enum_order() {
        assert_eq!(METRICS.len(), Metric::ALL.len());
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(*metric as usize, i);
            assert_eq!(METRICS[i].metric, *metric);
        }
    }

    #[test]
    fn test_names_and_keys_are_unique() {
        let names: HashSet<_> = METRICS.iter().map(|m| m.name).collect();
        let keys: HashSet<_> = METRICS.iter().map(|m| m.key).collect();
        assert_eq!(names.len(), METRICS.len());
        assert_eq!(keys.len(), METRICS.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Metric::TotalMessages.name(), "Total Messages");
        assert_eq!(Metric::from_key("call_count"), Some(Metric::Calls));
        assert_eq!(Metric::from_key("nope"), None);
        assert_eq!(list_metrics_of_type(MetricValueType::Dates).len(), 1);
    }
}
