//! The owning side of the edit cycle.
//!
//! [`Timeline`] holds the raw item collection, the zoom level and one
//! [`ItemController`] per item id. Gestures are routed to the addressed
//! controller with that item's measured box; any resulting commit is merged
//! into the collection and every controller is resynced from the result.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::Config;
use crate::controller::{HitBox, ItemController, ItemSnapshot, Key};
use crate::error::{Result, TimelineError};
use crate::item::{apply_commit, partition_valid, Commit, ItemId, RawItem, Rejected, TimelineItem};
use crate::lanes::{assign_lanes, LaneAssignment};
use crate::layout::{compute_layout, place_item, TimelineLayout};
use crate::zoom::Zoom;

/// Raw items plus the interaction state layered over them.
#[derive(Debug, Clone)]
pub struct Timeline {
    raw: Vec<RawItem>,
    items: Vec<TimelineItem>,
    rejected: Vec<Rejected>,
    controllers: BTreeMap<ItemId, ItemController>,
    /// Lane packing of `items`, kept for hit-testing between refreshes.
    lanes: LaneAssignment,
    min_day: i64,
    zoom: Zoom,
    config: Config,
}

impl Timeline {
    /// Build a timeline. Records that fail normalization are kept in the
    /// collection but left off the timeline; see [`Timeline::rejected`].
    pub fn new(raw: Vec<RawItem>, config: Config) -> Self {
        let mut timeline = Self {
            raw,
            items: Vec::new(),
            rejected: Vec::new(),
            controllers: BTreeMap::new(),
            lanes: LaneAssignment::default(),
            min_day: 0,
            zoom: Zoom::default(),
            config,
        };
        timeline.refresh();
        timeline
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn raw_items(&self) -> &[RawItem] {
        &self.raw
    }

    /// Normalized items, in input order.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    pub fn controller(&self, id: &ItemId) -> Option<&ItemController> {
        self.controllers.get(id)
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn pixels_per_day(&self) -> f64 {
        self.zoom
            .pixels_per_day(self.config.layout.base_pixels_per_day)
    }

    /// Geometry at the current zoom.
    pub fn layout(&self) -> Result<TimelineLayout> {
        Ok(compute_layout(
            self.items.clone(),
            self.pixels_per_day(),
            &self.config.layout,
        )?)
    }

    // ── Pointer & keyboard ───────────────────────────────────────────

    /// Press on an item. Suppressed while another item is mid-gesture.
    pub fn pointer_down(&mut self, id: &ItemId, x: f64) -> Result<bool> {
        if self.another_busy(id) {
            debug!(%id, "pointer down suppressed: another item is busy");
            return Ok(false);
        }
        let hit = self.hit_box(id)?;
        let pixels_per_day = self.pixels_per_day();
        Ok(self
            .controllers
            .get_mut(id)
            .is_some_and(|ctl| ctl.pointer_down(x, hit, pixels_per_day)))
    }

    pub fn pointer_move(&mut self, id: &ItemId, x: f64) {
        if let Some(ctl) = self.controllers.get_mut(id) {
            ctl.pointer_move(x);
        }
    }

    /// Release the pointer; applies the resulting commit, if any.
    pub fn pointer_up(&mut self, id: &ItemId) -> Result<Option<Commit>> {
        let commit = self.controllers.get_mut(id).and_then(|ctl| ctl.pointer_up());
        self.apply(commit)
    }

    /// Keyboard input for an item. Ignored while another item is
    /// mid-gesture, like [`Timeline::pointer_down`].
    pub fn key(&mut self, id: &ItemId, key: Key) -> Result<Option<Commit>> {
        if self.another_busy(id) {
            debug!(%id, ?key, "key suppressed: another item is busy");
            return Ok(None);
        }
        let commit = self.controllers.get_mut(id).and_then(|ctl| ctl.key(key));
        self.apply(commit)
    }

    pub fn begin_edit(&mut self, id: &ItemId) -> bool {
        if self.another_busy(id) {
            return false;
        }
        self.controllers
            .get_mut(id)
            .is_some_and(|ctl| ctl.begin_edit())
    }

    pub fn set_name_draft(&mut self, id: &ItemId, text: &str) -> bool {
        self.controllers
            .get_mut(id)
            .is_some_and(|ctl| ctl.set_name_draft(text))
    }

    pub fn confirm_edit(&mut self, id: &ItemId) -> Result<Option<Commit>> {
        let commit = self.controllers.get_mut(id).and_then(|ctl| ctl.confirm_edit());
        self.apply(commit)
    }

    pub fn cancel_edit(&mut self, id: &ItemId) {
        if let Some(ctl) = self.controllers.get_mut(id) {
            ctl.cancel_edit();
        }
    }

    // ── Zoom ─────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    pub fn zoom_reset(&mut self) {
        self.zoom.reset();
    }

    pub fn wheel(&mut self, delta_y: f64, ctrl: bool) -> bool {
        self.zoom.wheel(delta_y, ctrl)
    }

    // ── Commits ──────────────────────────────────────────────────────

    /// Merge a commit from any source into the collection.
    ///
    /// # Errors
    /// Rejects inverted ranges and unknown ids; the collection is unchanged
    /// on error.
    pub fn apply_commit(&mut self, commit: &Commit) -> Result<()> {
        self.raw = apply_commit(&self.raw, commit)?;
        debug!(id = %commit.id, start_day = commit.start_day, end_day = commit.end_day, "commit applied");
        self.refresh();
        Ok(())
    }

    fn apply(&mut self, commit: Option<Commit>) -> Result<Option<Commit>> {
        if let Some(commit) = &commit {
            self.apply_commit(commit)?;
        }
        Ok(commit)
    }

    fn another_busy(&self, id: &ItemId) -> bool {
        self.controllers
            .iter()
            .any(|(other, ctl)| other != id && !ctl.is_idle())
    }

    /// Box of one item at the current zoom, from the cached lane packing.
    fn hit_box(&self, id: &ItemId) -> Result<Option<HitBox>> {
        if !self.controllers.contains_key(id) {
            return Err(TimelineError::UnknownItem { id: id.clone() }.into());
        }
        let pixels_per_day = self.pixels_per_day();
        Ok(self
            .lanes
            .items
            .iter()
            .find(|it| &it.id == id)
            .map(|it| place_item(it, self.min_day, pixels_per_day, &self.config.layout).hit_box()))
    }

    /// Re-normalize and resync controllers after the collection changed.
    fn refresh(&mut self) {
        let (items, rejected) = partition_valid(&self.raw);
        for r in &rejected {
            warn!(id = %r.id, error = %r.error, "item left off the timeline");
        }

        let mut controllers = std::mem::take(&mut self.controllers);
        self.controllers = items
            .iter()
            .map(|item| {
                let snapshot = ItemSnapshot::from(item);
                let ctl = match controllers.remove(&item.id) {
                    Some(mut ctl) => {
                        ctl.sync(snapshot);
                        ctl
                    }
                    None => ItemController::new(snapshot, &self.config.interaction),
                };
                (item.id.clone(), ctl)
            })
            .collect();

        self.min_day = items.iter().map(|it| it.start_day).min().unwrap_or(0);
        self.lanes = assign_lanes(items.clone());
        self.items = items;
        self.rejected = rejected;
    }
}
