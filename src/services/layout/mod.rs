//! Overlap-based channel layout.
//!
//! Events that overlap directly or transitively form a cluster. Inside each
//! cluster events are greedily placed into the first channel (column in the
//! time grid, row in the all-day ribbon) that has no overlapping member, which
//! is optimal for interval graphs. Every member of a cluster reports the same
//! channel count so the renderer can split the available width evenly.

use crate::models::event::Event;
use crate::models::interval::{overlaps, TimeInterval};

/// An item decorated with its channel assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Positioned<T> {
    pub item: T,
    pub channel_index: usize,
    pub num_channels: usize,
}

pub type PositionedEvent = Positioned<Event>;

impl<T> Positioned<T> {
    /// Horizontal span of this item as fractions `(left, width)` of the column
    pub fn horizontal_fraction(&self) -> (f32, f32) {
        let width = 1.0 / self.num_channels as f32;
        (self.channel_index as f32 * width, width)
    }
}

impl<T: TimeInterval> TimeInterval for Positioned<T> {
    fn start(&self) -> chrono::NaiveDateTime {
        self.item.start()
    }

    fn end(&self) -> chrono::NaiveDateTime {
        self.item.end()
    }
}

/// Assign channels to `items`.
///
/// The output has the same length and order as the input. Items are assumed
/// to satisfy `start <= end`; the result is unspecified otherwise.
pub fn compute_layout<T>(items: &[T]) -> Vec<Positioned<T>>
where
    T: TimeInterval + Clone,
{
    if items.is_empty() {
        return Vec::new();
    }

    let adjacency = overlap_graph(items);
    let mut channels = vec![0usize; items.len()];
    let mut counts = vec![1usize; items.len()];

    for mut cluster in connected_components(&adjacency) {
        // Stable sort keeps input order among simultaneous starts
        cluster.sort_by_key(|&i| items[i].start());

        let mut lanes: Vec<Vec<usize>> = Vec::new();
        for &index in &cluster {
            let free_lane = lanes
                .iter()
                .position(|lane| lane.iter().all(|&other| !overlaps(&items[index], &items[other])));

            let lane = match free_lane {
                Some(lane) => lane,
                None => {
                    lanes.push(Vec::new());
                    lanes.len() - 1
                }
            };
            lanes[lane].push(index);
            channels[index] = lane;
        }

        let total = cluster.iter().map(|&i| channels[i]).max().unwrap_or(0) + 1;
        for &index in &cluster {
            counts[index] = total;
        }
    }

    items
        .iter()
        .zip(channels.into_iter().zip(counts))
        .map(|(item, (channel_index, num_channels))| Positioned {
            item: item.clone(),
            channel_index,
            num_channels,
        })
        .collect()
}

/// Adjacency list of the overlap graph, indexed by input position.
fn overlap_graph<T: TimeInterval>(items: &[T]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); items.len()];
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            if overlaps(&items[i], &items[j]) {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }
    adjacency
}

/// Connected components found with an explicit stack, each in discovery order.
fn connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; adjacency.len()];
    let mut components = Vec::new();

    for root in 0..adjacency.len() {
        if visited[root] {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![root];
        visited[root] = true;

        while let Some(node) = stack.pop() {
            component.push(node);
            for &next in adjacency[node].iter().rev() {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn span(from: (u32, u32), to: (u32, u32)) -> (NaiveDateTime, NaiveDateTime) {
        (at(from.0, from.1), at(to.0, to.1))
    }

    fn assignments<T>(layout: &[Positioned<T>]) -> Vec<(usize, usize)> {
        layout
            .iter()
            .map(|p| (p.channel_index, p.num_channels))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::new();
        assert!(compute_layout(&items).is_empty());
    }

    #[test]
    fn test_two_overlapping_and_one_separate() {
        let items = vec![
            span((9, 0), (10, 0)),
            span((9, 30), (10, 30)),
            span((11, 0), (12, 0)),
        ];
        let layout = compute_layout(&items);

        assert_eq!(assignments(&layout), vec![(0, 2), (1, 2), (0, 1)]);
    }

    #[test]
    fn test_four_identical_events() {
        let items = vec![span((9, 0), (10, 0)); 4];
        let layout = compute_layout(&items);

        assert_eq!(assignments(&layout), vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_back_to_back_events_share_a_channel() {
        let items = vec![span((9, 0), (10, 0)), span((10, 0), (11, 0))];
        let layout = compute_layout(&items);

        assert_eq!(assignments(&layout), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_channel_reuse_inside_chain_cluster() {
        // A overlaps B, B overlaps C, A and C do not overlap: C reuses A's channel
        let items = vec![
            span((9, 0), (10, 0)),
            span((9, 30), (11, 0)),
            span((10, 30), (12, 0)),
        ];
        let layout = compute_layout(&items);

        assert_eq!(assignments(&layout), vec![(0, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_output_keeps_input_order() {
        let items = vec![
            span((11, 0), (12, 0)),
            span((9, 30), (10, 30)),
            span((9, 0), (10, 0)),
        ];
        let layout = compute_layout(&items);

        let starts: Vec<_> = layout.iter().map(|p| p.item.0).collect();
        assert_eq!(starts, vec![at(11, 0), at(9, 30), at(9, 0)]);
        // Earliest start gets the first channel
        assert_eq!(assignments(&layout), vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_long_event_spanning_two_groups() {
        let items = vec![
            span((8, 0), (13, 0)),
            span((9, 0), (10, 0)),
            span((9, 0), (10, 0)),
            span((11, 0), (12, 0)),
        ];
        let layout = compute_layout(&items);

        assert_eq!(assignments(&layout), vec![(0, 3), (1, 3), (2, 3), (1, 3)]);
    }

    #[test]
    fn test_horizontal_fraction() {
        let items = vec![span((9, 0), (10, 0)); 4];
        let layout = compute_layout(&items);

        assert_eq!(layout[2].horizontal_fraction(), (0.5, 0.25));
    }
}
