//! Geometry pass: lanes, day span, ruler ticks and item boxes.
//!
//! [`compute_layout`] rebuilds everything from the item set. [`place_item`]
//! positions a single lane-assigned item without touching the ruler.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::controller::HitBox;
use crate::error::TimelineError;
use crate::item::{ItemId, TimelineItem};
use crate::lanes::{assign_lanes, LaneAssignment};
use crate::ruler::{cap_tick_step, choose_tick_step, format_date_label, ruler_ticks};

/// One ruler label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub day: i64,
    pub label: String,
    pub left: f64,
}

/// Pixel box of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBox {
    pub id: ItemId,
    pub lane: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemBox {
    /// The horizontal extent the controller hit-tests against.
    pub fn hit_box(&self) -> HitBox {
        HitBox {
            left: self.left,
            width: self.width,
        }
    }
}

/// Output of [`compute_layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub lanes: LaneAssignment,
    /// Number of lane rows drawn; at least one.
    pub lane_count: usize,
    pub min_day: i64,
    pub max_day: i64,
    pub total_days: i64,
    pub pixels_per_day: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub tick_step: u32,
    pub ticks: Vec<Tick>,
    pub boxes: Vec<ItemBox>,
}

impl TimelineLayout {
    pub fn item_box(&self, id: &ItemId) -> Option<&ItemBox> {
        self.boxes.iter().find(|b| &b.id == id)
    }

    /// Horizontal pixel offset of a day.
    pub fn day_to_x(&self, day: i64, config: &LayoutConfig) -> f64 {
        day_offset(day, self.min_day, self.pixels_per_day, config)
    }
}

/// Lay out normalized items at the given pixel density.
///
/// # Errors
/// Fails only if a tick day falls outside the representable calendar range.
pub fn compute_layout(
    items: Vec<TimelineItem>,
    pixels_per_day: f64,
    config: &LayoutConfig,
) -> Result<TimelineLayout, TimelineError> {
    let min_day = items.iter().map(|it| it.start_day).min().unwrap_or(0);
    let max_day = items.iter().map(|it| it.end_day).max().unwrap_or(min_day);
    let total_days = if items.is_empty() {
        0
    } else {
        max_day - min_day + 1
    };

    let lanes = assign_lanes(items);
    let lane_count = lanes.lane_count.max(1);

    let x_of = |day: i64| day_offset(day, min_day, pixels_per_day, config);

    let canvas_width = config
        .min_canvas_width
        .max(total_days.saturating_add(config.padding_days.saturating_mul(2)) as f64 * pixels_per_day);
    let canvas_height = lane_count as f64 * config.lane_height + config.ruler_height + 8.0;

    let tick_step = cap_tick_step(choose_tick_step(pixels_per_day), total_days);
    let ticks = if total_days == 0 {
        Vec::new()
    } else {
        ruler_ticks(min_day, max_day, tick_step)
            .into_iter()
            .map(|day| {
                Ok(Tick {
                    day,
                    label: format_date_label(day, false)?,
                    left: x_of(day),
                })
            })
            .collect::<Result<Vec<_>, TimelineError>>()?
    };

    let boxes = lanes
        .items
        .iter()
        .map(|it| place_item(it, min_day, pixels_per_day, config))
        .collect();

    Ok(TimelineLayout {
        lanes,
        lane_count,
        min_day,
        max_day,
        total_days,
        pixels_per_day,
        canvas_width,
        canvas_height,
        tick_step,
        ticks,
        boxes,
    })
}

/// Box of one lane-assigned item in a span starting at `min_day`.
pub fn place_item(
    item: &TimelineItem,
    min_day: i64,
    pixels_per_day: f64,
    config: &LayoutConfig,
) -> ItemBox {
    let lane = item.lane.unwrap_or(0);
    ItemBox {
        id: item.id.clone(),
        lane,
        left: day_offset(item.start_day, min_day, pixels_per_day, config),
        top: lane as f64 * config.lane_height + config.ruler_height + 4.0,
        width: (pixels_per_day * (item.duration_days() as f64 + 1.0)).max(config.min_item_width),
        height: config.lane_height - 8.0,
    }
}

fn day_offset(day: i64, min_day: i64, pixels_per_day: f64, config: &LayoutConfig) -> f64 {
    (day.saturating_sub(min_day).saturating_add(config.padding_days)) as f64 * pixels_per_day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TimelineItem> {
        vec![
            TimelineItem::from_days(1, "A", 100, 104).unwrap(),
            TimelineItem::from_days(2, "B", 102, 106).unwrap(),
            TimelineItem::from_days(3, "C", 109, 109).unwrap(),
        ]
    }

    #[test]
    fn geometry_matches_lanes() {
        let config = LayoutConfig::default();
        let layout = compute_layout(sample(), 22.0, &config).unwrap();

        assert_eq!(layout.lane_count, 2);
        assert_eq!(layout.min_day, 100);
        assert_eq!(layout.max_day, 109);
        assert_eq!(layout.total_days, 10);
        assert_eq!(layout.tick_step, 2);
        assert_eq!(layout.ticks.len(), 6);
        assert_eq!(layout.ticks[0].left, 44.0);

        let a = layout.item_box(&ItemId::Int(1)).unwrap();
        assert_eq!(a.left, 44.0);
        assert_eq!(a.width, 110.0);
        assert_eq!(a.top, 36.0);
        assert_eq!(a.height, 28.0);

        let b = layout.item_box(&ItemId::Int(2)).unwrap();
        assert_eq!(b.lane, 1);
        assert_eq!(b.top, 72.0);

        // Single-day items still get a grabbable width.
        let c = compute_layout(sample(), 2.0, &config).unwrap();
        assert_eq!(c.item_box(&ItemId::Int(3)).unwrap().width, 14.0);
    }

    #[test]
    fn canvas_has_minimums() {
        let config = LayoutConfig::default();
        let layout = compute_layout(sample(), 22.0, &config).unwrap();
        assert_eq!(layout.canvas_width, 720.0);
        assert_eq!(layout.canvas_height, 2.0 * 36.0 + 32.0 + 8.0);

        let wide = compute_layout(sample(), 66.0, &config).unwrap();
        assert_eq!(wide.canvas_width, 14.0 * 66.0);
    }

    #[test]
    fn empty_layout() {
        let layout = compute_layout(Vec::new(), 22.0, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.lane_count, 1);
        assert_eq!(layout.total_days, 0);
        assert!(layout.ticks.is_empty());
        assert!(layout.boxes.is_empty());
    }

    #[test]
    fn day_to_x_matches_boxes() {
        let config = LayoutConfig::default();
        let layout = compute_layout(sample(), 22.0, &config).unwrap();
        let b = layout.item_box(&ItemId::Int(2)).unwrap();
        assert_eq!(layout.day_to_x(102, &config), b.left);
    }
}
