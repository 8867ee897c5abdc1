use serde::{Deserialize, Serialize};

/// One published upload: the minimum metadata plus its free-text caption.
///
/// Produced by the fetch layer and never mutated afterwards. Fields that the
/// upstream listing omitted arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionedItem {
    /// ISO-8601 publish timestamp, e.g. `"2024-03-01T17:00:00Z"`.
    pub published_at: String,
    pub title: String,
    /// Upstream identifier (the `YouTube` video id).
    pub identifier: String,
    pub description: String,
}

/// Metrics pulled out of a single caption. Either, both, or neither may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetrics {
    pub subscribers: Option<u64>,
    pub chickens: Option<u64>,
}

impl ExtractedMetrics {
    /// `true` when the caption yielded no metric at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_none() && self.chickens.is_none()
    }
}

/// One row of the served series.
///
/// Serialized with the field names the dashboard already reads
/// (`publishedAt`, `videoId`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEntry {
    /// 1-based rank among uploads that reported at least one metric.
    pub day: u32,
    pub published_at: String,
    pub title: String,
    pub video_id: String,
    pub subscribers: Option<u64>,
    pub chickens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_metrics_empty_only_when_both_absent() {
        assert!(ExtractedMetrics::default().is_empty());
        assert!(!ExtractedMetrics {
            subscribers: Some(1),
            chickens: None
        }
        .is_empty());
        assert!(!ExtractedMetrics {
            subscribers: None,
            chickens: Some(3)
        }
        .is_empty());
    }

    #[test]
    fn series_entry_serializes_with_dashboard_field_names() {
        let entry = SeriesEntry {
            day: 1,
            published_at: "2024-03-01T17:00:00Z".to_string(),
            title: "Day 1".to_string(),
            video_id: "abc123".to_string(),
            subscribers: Some(214_000),
            chickens: None,
        };
        let json: serde_json::Value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(json["day"], 1);
        assert_eq!(json["publishedAt"], "2024-03-01T17:00:00Z");
        assert_eq!(json["videoId"], "abc123");
        assert_eq!(json["subscribers"], 214_000);
        assert!(json["chickens"].is_null(), "absent metric must be null");
    }
}
