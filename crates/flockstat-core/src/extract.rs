//! Locating metric lines inside a caption.
//!
//! A metric line looks like `Subscribers: 214k` or `current chickens - ~12`:
//! optional `current`, one of the metric's label words, a `:`/`=`/`-`
//! separator, then the value. Each [`Metric`] owns its own label grammar.

use std::sync::LazyLock;

use regex::Regex;

use crate::count::parse_count;
use crate::types::ExtractedMetrics;

static SUBSCRIBERS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:current\s+)?subs(?:cribers)?\s*[:=\-][^\S\n]*(\S.*?)\s*$")
        .expect("valid subscribers line regex")
});

static CHICKENS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:current\s+)?chickens?\s*[:=\-][^\S\n]*(\S.*?)\s*$")
        .expect("valid chickens line regex")
});

/// The two numbers tracked per upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Channel subscriber count (`subs:` / `subscribers:`).
    Subscribers,
    /// Flock size (`chicken:` / `chickens:`).
    Chickens,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Subscribers, Metric::Chickens];

    fn line_pattern(self) -> &'static Regex {
        match self {
            Metric::Subscribers => &SUBSCRIBERS_LINE,
            Metric::Chickens => &CHICKENS_LINE,
        }
    }

    /// Returns the trimmed value part of the first line labelled with this
    /// metric, without interpreting it.
    #[must_use]
    pub fn find_value(self, text: &str) -> Option<&str> {
        self.line_pattern()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Finds this metric's first line and parses its value.
    ///
    /// Only the first matching line counts: if its value does not parse the
    /// metric is absent, even when a later line would have parsed.
    #[must_use]
    pub fn extract(self, text: &str) -> Option<u64> {
        self.find_value(text).and_then(parse_count)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Subscribers => write!(f, "subscribers"),
            Metric::Chickens => write!(f, "chickens"),
        }
    }
}

/// Extracts both metrics from a caption, independently of each other.
#[must_use]
pub fn extract_metrics(text: &str) -> ExtractedMetrics {
    ExtractedMetrics {
        subscribers: Metric::Subscribers.extract(text),
        chickens: Metric::Chickens.extract(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_metrics_from_separate_lines() {
        let caption = "Day 41 on the farm!\nSubscribers: 214k\nChickens - ~12 (+1)\nthanks all";
        let metrics = extract_metrics(caption);
        assert_eq!(metrics.subscribers, Some(214_000));
        assert_eq!(metrics.chickens, Some(12));
    }

    #[test]
    fn empty_caption_yields_nothing() {
        assert!(extract_metrics("").is_empty());
    }

    #[test]
    fn accepts_every_label_synonym_and_separator() {
        assert_eq!(Metric::Subscribers.extract("subs: 10"), Some(10));
        assert_eq!(Metric::Subscribers.extract("SUBSCRIBERS = 11"), Some(11));
        assert_eq!(Metric::Subscribers.extract("Subs - 12"), Some(12));
        assert_eq!(Metric::Chickens.extract("chicken: 1"), Some(1));
        assert_eq!(Metric::Chickens.extract("Chickens=2"), Some(2));
    }

    #[test]
    fn current_qualifier_and_indentation_are_allowed() {
        let caption = "stats:\n   Current Subscribers: 1.2m\n\tcurrent chickens: 30";
        let metrics = extract_metrics(caption);
        assert_eq!(metrics.subscribers, Some(1_200_000));
        assert_eq!(metrics.chickens, Some(30));
    }

    #[test]
    fn label_must_start_the_line() {
        let caption = "we hit subscribers: 300k today";
        assert_eq!(Metric::Subscribers.find_value(caption), None);
    }

    #[test]
    fn label_without_separator_does_not_match() {
        assert_eq!(Metric::Chickens.find_value("chickens 12"), None);
    }

    #[test]
    fn find_value_returns_trimmed_rest_of_line() {
        let caption = "Subscribers:   207k (+10!)   \nother";
        assert_eq!(Metric::Subscribers.find_value(caption), Some("207k (+10!)"));
    }

    #[test]
    fn only_the_first_matching_line_is_used() {
        let caption = "Subscribers: soon\nSubscribers: 5k";
        assert_eq!(Metric::Subscribers.find_value(caption), Some("soon"));
        assert_eq!(Metric::Subscribers.extract(caption), None);

        let caption = "chickens: 3\nchickens: 9";
        assert_eq!(Metric::Chickens.extract(caption), Some(3));
    }

    #[test]
    fn metrics_are_independent() {
        let only_chickens = extract_metrics("Chickens: 7");
        assert_eq!(only_chickens.subscribers, None);
        assert_eq!(only_chickens.chickens, Some(7));

        let only_subs = extract_metrics("subs: 99");
        assert_eq!(only_subs.subscribers, Some(99));
        assert_eq!(only_subs.chickens, None);
    }

    #[test]
    fn value_never_spills_onto_the_next_line() {
        let caption = "Subscribers:\nChickens: 5";
        assert_eq!(Metric::Subscribers.find_value(caption), None);
        assert_eq!(Metric::Chickens.extract(caption), Some(5));
    }

    #[test]
    fn blank_value_with_trailing_spaces_is_not_a_match() {
        let caption = "Subscribers:   \nSubscribers: 5";
        assert_eq!(Metric::Subscribers.find_value(caption), Some("5"));
        assert_eq!(Metric::Subscribers.extract(caption), Some(5));

        assert_eq!(Metric::Chickens.find_value("chickens = \t \r\n"), None);
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let caption = "Subscribers: 214k\r\nChickens: 12\r\n";
        let metrics = extract_metrics(caption);
        assert_eq!(metrics.subscribers, Some(214_000));
        assert_eq!(metrics.chickens, Some(12));
    }

    #[test]
    fn display_names_match_wire_fields() {
        let names: Vec<String> = Metric::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["subscribers", "chickens"]);
    }
}
