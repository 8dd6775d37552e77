//! Lane assignment: greedy interval partitioning.
//!
//! Items are sorted by start day (shorter first on ties) and placed into the
//! first lane whose last occupied day lies strictly before the item's start.
//! Ranges are inclusive on both ends, so an item starting on the day another
//! ends still needs its own lane.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::TimelineItem;

/// Result of one lane assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneAssignment {
    /// Items in placement order, each with `lane` set.
    pub items: Vec<TimelineItem>,
    pub lane_count: usize,
}

impl LaneAssignment {
    /// Items placed in `lane`, in placement order.
    pub fn lane(&self, lane: usize) -> impl Iterator<Item = &TimelineItem> {
        self.items.iter().filter(move |it| it.lane == Some(lane))
    }

    /// Lane index of the item with the given id.
    pub fn lane_of(&self, id: &crate::item::ItemId) -> Option<usize> {
        self.items.iter().find(|it| &it.id == id).and_then(|it| it.lane)
    }
}

/// A track under construction.
struct Lane {
    last_end: i64,
    len: usize,
}

/// Pack items into the minimum number of non-overlapping lanes.
///
/// Any `lane` already present on the input is discarded, so running this on
/// its own output yields the same assignment.
pub fn assign_lanes(mut items: Vec<TimelineItem>) -> LaneAssignment {
    items.sort_by_key(|it| (it.start_day, it.duration_days()));

    let mut lanes: Vec<Lane> = Vec::new();
    for item in &mut items {
        let slot = lanes.iter().position(|lane| lane.last_end < item.start_day);
        let index = match slot {
            Some(index) => {
                let lane = &mut lanes[index];
                lane.last_end = lane.last_end.max(item.end_day);
                lane.len += 1;
                index
            }
            None => {
                lanes.push(Lane {
                    last_end: item.end_day,
                    len: 1,
                });
                lanes.len() - 1
            }
        };
        item.lane = Some(index);
    }

    debug!(
        items = items.len(),
        lanes = lanes.len(),
        busiest = lanes.iter().map(|l| l.len).max().unwrap_or(0),
        "assigned lanes"
    );

    LaneAssignment {
        lane_count: lanes.len(),
        items,
    }
}

/// The largest number of items covering any single day.
///
/// Computed by sweeping start/end events independently of
/// [`assign_lanes`]; the two always agree on the lane count.
pub fn peak_overlap(items: &[TimelineItem]) -> usize {
    // (day, delta): an item covers [start, end], so it stops counting at end + 1.
    let mut events: Vec<(i64, i32)> = Vec::with_capacity(items.len() * 2);
    for it in items {
        events.push((it.start_day, 1));
        events.push((it.end_day.saturating_add(1), -1));
    }
    // Ends sort before starts on the same day.
    events.sort_unstable();

    let mut current: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        current += i64::from(delta);
        peak = peak.max(current);
    }
    peak as usize
}
