//! Per-item interaction state machine.
//!
//! Turns pointer and keyboard input into at most one [`Commit`] per completed
//! gesture. The controller never touches the item collection; it only
//! proposes commits for the owner to apply, then gets [`ItemController::sync`]ed
//! with the result.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> (Moving | ResizingStart | ResizingEnd) -> Idle   pointer down / up
//! Idle -> EditingName -> Idle                               begin / confirm | cancel
//! Idle -> Idle                                              keyboard nudge
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut ctl = ItemController::new(snapshot, &config.interaction);
//! ctl.pointer_down(x, Some(hit_box), pixels_per_day);
//! ctl.pointer_move(x + 66.0);
//! if let Some(commit) = ctl.pointer_up() {
//!     // apply, then ctl.sync(updated)
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InteractionConfig;
use crate::item::{Commit, ItemId, TimelineItem};

/// The committed values a controller works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub name: String,
    pub start_day: i64,
    pub end_day: i64,
}

impl From<&TimelineItem> for ItemSnapshot {
    fn from(item: &TimelineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            start_day: item.start_day,
            end_day: item.end_day,
        }
    }
}

/// Measured horizontal extent of the item, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    pub left: f64,
    pub width: f64,
}

/// A proposed range held while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragDraft {
    pub start_day: i64,
    pub end_day: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragMode {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Externally visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    Moving,
    ResizingStart,
    ResizingEnd,
    EditingName,
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Earlier,
    Later,
}

#[derive(Debug, Clone, PartialEq)]
enum GestureState {
    Idle,
    Dragging {
        mode: DragMode,
        origin_x: f64,
        pixels_per_day: f64,
        base: DragDraft,
        draft: DragDraft,
    },
    EditingName {
        draft_name: String,
    },
}

/// Interaction state machine for a single item.
#[derive(Debug, Clone)]
pub struct ItemController {
    item: ItemSnapshot,
    state: GestureState,
    handle_width: f64,
    nudge_days: i64,
}

impl ItemController {
    pub fn new(item: ItemSnapshot, config: &InteractionConfig) -> Self {
        Self {
            item,
            state: GestureState::Idle,
            handle_width: config.handle_width.max(0.0),
            nudge_days: config.nudge_days.max(1),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn item(&self) -> &ItemSnapshot {
        &self.item
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            GestureState::Idle => Phase::Idle,
            GestureState::Dragging { mode, .. } => match mode {
                DragMode::Move => Phase::Moving,
                DragMode::ResizeStart => Phase::ResizingStart,
                DragMode::ResizeEnd => Phase::ResizingEnd,
            },
            GestureState::EditingName { .. } => Phase::EditingName,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, GestureState::EditingName { .. })
    }

    /// The in-progress draft, if a drag is active.
    pub fn draft(&self) -> Option<DragDraft> {
        match self.state {
            GestureState::Dragging { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Range to draw: the draft while dragging, otherwise the committed range.
    pub fn display_range(&self) -> (i64, i64) {
        match self.draft() {
            Some(d) => (d.start_day, d.end_day),
            None => (self.item.start_day, self.item.end_day),
        }
    }

    /// Label to draw: the name being typed while editing.
    pub fn display_name(&self) -> &str {
        match &self.state {
            GestureState::EditingName { draft_name } => draft_name,
            _ => &self.item.name,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Refresh the committed values after the owner applied a commit.
    ///
    /// An active gesture keeps its base; only the comparison target for the
    /// final commit changes.
    pub fn sync(&mut self, item: ItemSnapshot) {
        self.item = item;
    }

    /// Start a drag. Returns whether a gesture began.
    ///
    /// Without a measurement or a usable pixel density the controller stays
    /// idle. The offset within `hit` picks the mode: the left margin resizes
    /// the start, the right margin resizes the end, anything else moves.
    pub fn pointer_down(&mut self, x: f64, hit: Option<HitBox>, pixels_per_day: f64) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(hit) = hit else {
            return false;
        };
        if !(pixels_per_day.is_finite() && pixels_per_day > 0.0)
            || !(hit.width.is_finite() && hit.width > 0.0)
        {
            return false;
        }

        let offset = x - hit.left;
        if !(0.0..=hit.width).contains(&offset) {
            return false;
        }

        let mode = if offset <= self.handle_width {
            DragMode::ResizeStart
        } else if offset >= hit.width - self.handle_width {
            DragMode::ResizeEnd
        } else {
            DragMode::Move
        };

        let base = DragDraft {
            start_day: self.item.start_day,
            end_day: self.item.end_day,
        };
        debug!(id = %self.item.id, ?mode, "gesture started");
        self.state = GestureState::Dragging {
            mode,
            origin_x: x,
            pixels_per_day,
            base,
            draft: base,
        };
        true
    }

    /// Update the draft from the pointer position. Returns the new draft.
    pub fn pointer_move(&mut self, x: f64) -> Option<DragDraft> {
        let GestureState::Dragging {
            mode,
            origin_x,
            pixels_per_day,
            base,
            draft,
        } = &mut self.state
        else {
            return None;
        };

        let delta = day_delta(x - *origin_x, *pixels_per_day);
        *draft = match mode {
            DragMode::Move => DragDraft {
                start_day: base.start_day.saturating_add(delta),
                end_day: base.end_day.saturating_add(delta),
            },
            DragMode::ResizeStart => DragDraft {
                start_day: base.start_day.saturating_add(delta).min(base.end_day),
                end_day: base.end_day,
            },
            DragMode::ResizeEnd => DragDraft {
                start_day: base.start_day,
                end_day: base.end_day.saturating_add(delta).max(base.start_day),
            },
        };
        Some(*draft)
    }

    /// Finish a drag. Emits a commit only when the draft moved off the
    /// committed range; the draft is dropped either way.
    pub fn pointer_up(&mut self) -> Option<Commit> {
        let draft = self.draft()?;
        self.state = GestureState::Idle;

        if draft.start_day == self.item.start_day && draft.end_day == self.item.end_day {
            return None;
        }
        let commit = Commit {
            id: self.item.id.clone(),
            start_day: draft.start_day,
            end_day: draft.end_day,
            name: None,
        };
        debug!(id = %commit.id, start_day = commit.start_day, end_day = commit.end_day, "drag committed");
        Some(commit)
    }

    /// Abort whatever is in progress without committing.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!(id = %self.item.id, phase = ?self.phase(), "gesture cancelled");
        }
        self.state = GestureState::Idle;
    }

    /// Shift both ends by one nudge step and commit immediately.
    pub fn nudge(&mut self, direction: Direction) -> Option<Commit> {
        if !self.is_idle() {
            return None;
        }
        let step = self.nudge_days;
        let (start_day, end_day) = match direction {
            Direction::Earlier => (
                self.item.start_day.saturating_sub(step),
                self.item.end_day.saturating_sub(step),
            ),
            Direction::Later => (
                self.item.start_day.saturating_add(step),
                self.item.end_day.saturating_add(step),
            ),
        };
        let commit = Commit {
            id: self.item.id.clone(),
            start_day,
            end_day,
            name: None,
        };
        debug!(id = %commit.id, ?direction, step, "nudge committed");
        Some(commit)
    }

    /// Enter rename mode. Ignored while a drag is active.
    pub fn begin_edit(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = GestureState::EditingName {
            draft_name: self.item.name.clone(),
        };
        true
    }

    /// Replace the name being typed. Returns false when not editing.
    pub fn set_name_draft(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            GestureState::EditingName { draft_name } => {
                *draft_name = text.into();
                true
            }
            _ => false,
        }
    }

    /// Leave rename mode, committing a non-empty changed name.
    pub fn confirm_edit(&mut self) -> Option<Commit> {
        if !self.is_editing() {
            return None;
        }
        let GestureState::EditingName { draft_name } =
            std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return None;
        };

        let name = draft_name.trim();
        if name.is_empty() || name == self.item.name {
            return None;
        }
        debug!(id = %self.item.id, name, "rename committed");
        Some(Commit {
            id: self.item.id.clone(),
            start_day: self.item.start_day,
            end_day: self.item.end_day,
            name: Some(name.to_string()),
        })
    }

    /// Leave rename mode, discarding the typed name.
    pub fn cancel_edit(&mut self) {
        if self.is_editing() {
            self.state = GestureState::Idle;
        }
    }

    /// Keyboard dispatch: arrows nudge, Enter edits or confirms, Escape cancels.
    pub fn key(&mut self, key: Key) -> Option<Commit> {
        match key {
            Key::ArrowLeft => self.nudge(Direction::Earlier),
            Key::ArrowRight => self.nudge(Direction::Later),
            Key::Enter if self.is_editing() => self.confirm_edit(),
            Key::Enter => {
                self.begin_edit();
                None
            }
            Key::Escape => {
                self.cancel();
                None
            }
        }
    }
}

/// Whole days covered by a pixel displacement, rounded to nearest.
///
/// The float-to-int cast saturates, so absurd displacements clamp instead of
/// wrapping.
fn day_delta(dx: f64, pixels_per_day: f64) -> i64 {
    (dx / pixels_per_day).round() as i64
}
