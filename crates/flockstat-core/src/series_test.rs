use super::*;

fn item(published_at: &str, id: &str, description: &str) -> CaptionedItem {
    CaptionedItem {
        published_at: published_at.to_owned(),
        title: format!("Video {id}"),
        identifier: id.to_owned(),
        description: description.to_owned(),
    }
}

fn assert_days_are_dense(series: &[SeriesEntry]) {
    let days: Vec<u32> = series.iter().map(|e| e.day).collect();
    let expected: Vec<u32> = (1..=u32::try_from(series.len()).unwrap()).collect();
    assert_eq!(days, expected, "days must be 1..=len with no gaps");
}

fn assert_chronological(series: &[SeriesEntry]) {
    for pair in series.windows(2) {
        assert!(
            pair[0].published_at <= pair[1].published_at,
            "{} should not come after {}",
            pair[0].published_at,
            pair[1].published_at
        );
    }
}

#[test]
fn empty_batch_yields_empty_series() {
    assert!(build_series(&[]).is_empty());
}

#[test]
fn dropped_item_does_not_leave_a_gap() {
    let batch = vec![
        item("2024-03-01T17:00:00Z", "a", "Subscribers: 100k"),
        item("2024-03-02T17:00:00Z", "b", "Chickens: 4"),
        item("2024-03-03T17:00:00Z", "c", "just a vlog, no stats"),
        item("2024-03-04T17:00:00Z", "d", "subs: 101k\nchickens: 5"),
        item("2024-03-05T17:00:00Z", "e", "current subscribers = 102k"),
    ];

    let series = build_series(&batch);

    assert_eq!(series.len(), 4);
    assert!(series.iter().all(|e| e.video_id != "c"));
    assert_eq!(
        series.iter().map(|e| e.video_id.as_str()).collect::<Vec<_>>(),
        ["a", "b", "d", "e"]
    );
    assert_days_are_dense(&series);
}

#[test]
fn empty_description_is_excluded() {
    let batch = vec![
        item("2024-03-01T17:00:00Z", "a", ""),
        item("2024-03-02T17:00:00Z", "b", "Chickens: 4"),
    ];
    let series = build_series(&batch);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].video_id, "b");
    assert_eq!(series[0].day, 1);
}

#[test]
fn unordered_batch_is_sorted_before_numbering() {
    let batch = vec![
        item("2024-03-03T17:00:00Z", "third", "subs: 3"),
        item("2024-03-01T17:00:00Z", "first", "subs: 1"),
        item("2024-03-02T17:00:00Z", "second", "subs: 2"),
    ];
    let series = build_series(&batch);
    let ids: Vec<&str> = series.iter().map(|e| e.video_id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
    assert_eq!(series[0].subscribers, Some(1));
    assert_eq!(series[2].day, 3);
    assert_chronological(&series);
}

#[test]
fn equal_timestamps_keep_batch_order() {
    let batch = vec![
        item("2024-03-02T17:00:00Z", "late", "chickens: 9"),
        item("2024-03-01T17:00:00Z", "tie-1", "chickens: 1"),
        item("2024-03-01T17:00:00Z", "tie-2", "chickens: 2"),
        item("2024-03-01T17:00:00Z", "tie-3", "chickens: 3"),
    ];
    let series = build_series(&batch);
    let ids: Vec<&str> = series.iter().map(|e| e.video_id.as_str()).collect();
    assert_eq!(ids, ["tie-1", "tie-2", "tie-3", "late"]);
}

#[test]
fn items_without_a_usable_timestamp_are_dropped() {
    let batch = vec![
        item("", "missing", "subs: 1"),
        item("yesterday", "garbage", "subs: 2"),
        item("2024-03-01T17:00:00Z", "ok", "subs: 3"),
    ];
    let series = build_series(&batch);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].video_id, "ok");
    assert_eq!(series[0].day, 1);
}

#[test]
fn entry_carries_item_metadata_and_both_metrics() {
    let batch = vec![item(
        "2024-03-01T17:00:00Z",
        "xyz",
        "Subscribers: 214k\nChickens - ~12 (+1)",
    )];
    let series = build_series(&batch);
    assert_eq!(
        series,
        vec![SeriesEntry {
            day: 1,
            published_at: "2024-03-01T17:00:00Z".to_owned(),
            title: "Video xyz".to_owned(),
            video_id: "xyz".to_owned(),
            subscribers: Some(214_000),
            chickens: Some(12),
        }]
    );
}

#[test]
fn partial_metrics_are_kept_with_null_for_the_missing_one() {
    let series = build_series(&[item("2024-03-01T17:00:00Z", "a", "chickens: 6")]);
    assert_eq!(series[0].subscribers, None);
    assert_eq!(series[0].chickens, Some(6));
}

#[test]
fn offset_timestamps_sort_by_instant() {
    let batch = vec![
        // 18:00 UTC
        item("2024-03-01T12:00:00-06:00", "later", "subs: 2"),
        // 17:00 UTC
        item("2024-03-01T17:00:00Z", "earlier", "subs: 1"),
    ];
    let series = build_series(&batch);
    assert_eq!(series[0].video_id, "earlier");
    assert_eq!(series[1].published_at, "2024-03-01T12:00:00-06:00");
}

#[test]
fn full_batch_at_default_cap_is_not_truncated() {
    let batch: Vec<CaptionedItem> = (0..400u32)
        .rev()
        .map(|i| {
            item(
                &format!("2024-01-01T{:02}:{:02}:00Z", i / 60, i % 60),
                &format!("v{i}"),
                &format!("Subscribers: {}k\nChickens: {}", 100 + i, i % 20),
            )
        })
        .collect();

    let series = build_series(&batch);

    assert_eq!(series.len(), 400);
    assert_days_are_dense(&series);
    assert_chronological(&series);
    assert_eq!(series[0].video_id, "v0");
    assert_eq!(series[399].subscribers, Some(499_000));
}

#[test]
fn mixed_batch_keeps_invariants() {
    let captions = ["subs: 1k", "", "chickens: 2", "nothing", "subs: x", "chickens: ~3 (+1)"];
    let batch: Vec<CaptionedItem> = captions
        .iter()
        .enumerate()
        .map(|(i, caption)| item(&format!("2024-02-{:02}T08:00:00Z", 20 - i), &i.to_string(), caption))
        .collect();

    let series = build_series(&batch);

    assert_eq!(series.len(), 3);
    assert_days_are_dense(&series);
    assert_chronological(&series);
    assert!(series
        .iter()
        .all(|e| e.subscribers.is_some() || e.chickens.is_some()));
}

#[test]
fn offset_less_iso_timestamps_are_kept_as_utc() {
    let batch = vec![
        item("2024-03-03T17:00:00Z", "zoned", "subs: 3"),
        item("2024-03-02", "date-only", "subs: 2"),
        item("2024-03-01T17:00:00", "naive", "subs: 1"),
    ];

    let series = build_series(&batch);

    let ids: Vec<&str> = series.iter().map(|e| e.video_id.as_str()).collect();
    assert_eq!(ids, ["naive", "date-only", "zoned"]);
    assert_days_are_dense(&series);
    assert_eq!(series[1].published_at, "2024-03-02");
}

#[test]
fn date_only_sorts_before_later_times_that_day() {
    let batch = vec![
        item("2024-03-02T09:30:00.250", "morning", "chickens: 6"),
        item("2024-03-02", "midnight", "chickens: 5"),
    ];

    let series = build_series(&batch);

    let ids: Vec<&str> = series.iter().map(|e| e.video_id.as_str()).collect();
    assert_eq!(ids, ["midnight", "morning"]);
}
