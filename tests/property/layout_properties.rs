// Property-based tests for channel layout and drag math
// Random intervals and pointer positions exercise the layout invariants

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use chronos_calendar::models::event::Event;
use chronos_calendar::models::interval::overlaps;
use chronos_calendar::services::drag::gestures::{creation_interval, resize_interval};
use chronos_calendar::services::drag::{pixel_to_time, ColumnRect, ResizeEdge};
use chronos_calendar::services::layout::compute_layout;
use proptest::prelude::*;

fn midnight() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Non-empty intervals starting within one day
fn intervals() -> impl Strategy<Value = Vec<(NaiveDateTime, NaiveDateTime)>> {
    prop::collection::vec((0i64..1380, 1i64..240), 0..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(start, length)| {
                let start = midnight() + Duration::minutes(start);
                (start, start + Duration::minutes(length))
            })
            .collect()
    })
}

/// Largest number of intervals covering a single instant
fn max_simultaneous(items: &[(NaiveDateTime, NaiveDateTime)]) -> usize {
    items
        .iter()
        .map(|sample| {
            items
                .iter()
                .filter(|other| other.0 <= sample.0 && sample.0 < other.1)
                .count()
        })
        .max()
        .unwrap_or(0)
}

proptest! {
    /// Property: overlapping intervals never share a channel
    #[test]
    fn prop_overlapping_items_get_distinct_channels(items in intervals()) {
        let layout = compute_layout(&items);

        for (i, a) in layout.iter().enumerate() {
            for b in layout.iter().skip(i + 1) {
                if overlaps(&a.item, &b.item) {
                    prop_assert_ne!(a.channel_index, b.channel_index);
                }
            }
            prop_assert!(a.channel_index < a.num_channels);
        }
    }

    /// Property: the channel count of a cluster is its largest clique
    #[test]
    fn prop_channel_count_is_minimal(items in intervals()) {
        let layout = compute_layout(&items);

        for positioned in &layout {
            // Members of the same cluster as this item
            let mut cluster = vec![positioned.item];
            let mut grew = true;
            while grew {
                grew = false;
                for candidate in &items {
                    if !cluster.contains(candidate) && cluster.iter().any(|m| overlaps(m, candidate)) {
                        cluster.push(*candidate);
                        grew = true;
                    }
                }
            }
            let members: Vec<_> = items.iter().filter(|i| cluster.contains(*i)).copied().collect();
            let expected = max_simultaneous(&members).max(1);
            prop_assert_eq!(positioned.num_channels, expected);
        }
    }

    /// Property: layout is deterministic
    #[test]
    fn prop_layout_is_idempotent(items in intervals()) {
        let first = compute_layout(&items);
        let second = compute_layout(&items);
        prop_assert_eq!(first, second);
    }

    /// Property: a far-away cluster does not change another cluster's layout
    #[test]
    fn prop_clusters_are_independent(items in intervals()) {
        let alone = compute_layout(&items);

        let far = midnight() + Duration::days(3);
        let mut combined = items.clone();
        combined.push((far, far + Duration::hours(1)));
        combined.push((far, far + Duration::hours(2)));
        let together = compute_layout(&combined);

        for (a, b) in alone.iter().zip(&together) {
            prop_assert_eq!((a.channel_index, a.num_channels), (b.channel_index, b.num_channels));
        }
    }

    /// Property: snapped times land on the snap grid inside the day
    #[test]
    fn prop_pixel_to_time_snaps(
        y in -200.0f32..2000.0,
        height in 100.0f32..3000.0,
        snap in prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]),
    ) {
        let rect = Some(ColumnRect::new(0.0, 0.0, 100.0, height));
        let time = pixel_to_time(y, midnight(), rect, snap);

        prop_assert_eq!(time.minute() % snap, 0);
        prop_assert!(time >= midnight());
        prop_assert!(time <= midnight() + Duration::days(1));
    }

    /// Property: drag endpoints are always normalized to start <= end
    #[test]
    fn prop_drag_intervals_are_ordered(
        a in 0i64..1440,
        b in 0i64..1440,
        current in 0i64..1440,
        top in any::<bool>(),
    ) {
        let a = midnight() + Duration::minutes(a);
        let b = midnight() + Duration::minutes(b);
        let current = midnight() + Duration::minutes(current);

        let (start, end) = creation_interval(a, b);
        prop_assert!(start <= end);

        let event = Event::preview(a, b, None);
        let edge = if top { ResizeEdge::Top } else { ResizeEdge::Bottom };
        let (start, end) = resize_interval(&event, edge, current);
        prop_assert!(start <= end);
    }
}
