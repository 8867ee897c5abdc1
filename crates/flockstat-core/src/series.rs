//! Assembly of the day-indexed series from a batch of captioned uploads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::extract::extract_metrics;
use crate::types::{CaptionedItem, ExtractedMetrics, SeriesEntry};

/// Builds the served series from an unordered batch of uploads.
///
/// Uploads whose caption yields neither metric are dropped, as are uploads
/// with a missing or unparseable `published_at`. The survivors are ordered by
/// publish time (stable, so equal timestamps keep batch order) and numbered
/// `day = 1, 2, 3, ...`. A dropped upload never consumes a day, so the
/// numbering has no gaps.
#[must_use]
pub fn build_series(items: &[CaptionedItem]) -> Vec<SeriesEntry> {
    let mut kept: Vec<(DateTime<Utc>, &CaptionedItem, ExtractedMetrics)> = items
        .iter()
        .filter_map(|item| {
            let published = parse_published_at(&item.published_at)?;
            let metrics = extract_metrics(&item.description);
            (!metrics.is_empty()).then_some((published, item, metrics))
        })
        .collect();

    tracing::debug!(
        received = items.len(),
        kept = kept.len(),
        dropped = items.len() - kept.len(),
        "extracted caption metrics"
    );

    // `sort_by_key` is stable.
    kept.sort_by_key(|(published, _, _)| *published);

    kept.into_iter()
        .zip(1u32..)
        .map(|((_, item, metrics), day)| SeriesEntry {
            day,
            published_at: item.published_at.clone(),
            title: item.title.clone(),
            video_id: item.identifier.clone(),
            subscribers: metrics.subscribers,
            chickens: metrics.chickens,
        })
        .collect()
}

/// Accepts RFC 3339 plus the offset-less ISO-8601 forms
/// (`2024-03-01T17:00:00`, `2024-03-02`), the latter read as UTC.
fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "series_test.rs"]
mod tests;
