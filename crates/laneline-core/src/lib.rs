//! # Laneline Core Library
//!
//! This library provides the engine behind an interactive horizontal
//! timeline: date-ranged items are packed into non-overlapping lanes and
//! edited through per-item gesture state machines. The `laneline` CLI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Date Model**: conversion between `YYYY-MM-DD` strings and integer day
//!   numbers (UTC, epoch 1970-01-01)
//! - **Lanes**: greedy interval partitioning into the minimum lane count
//! - **Ruler**: tick-step selection and date labels
//! - **Controller**: drag, resize, nudge and rename gestures producing one
//!   commit per completed edit
//! - **Layout / Timeline**: geometry pass and the owner that applies commits
//!
//! ## Key Components
//!
//! - [`assign_lanes`]: lane packing
//! - [`ItemController`]: per-item gesture state machine
//! - [`Timeline`]: item collection plus controllers and zoom
//! - [`Config`]: layout and interaction configuration

pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod item;
pub mod lanes;
pub mod layout;
pub mod ruler;
pub mod timeline;
pub mod zoom;

pub use config::{Config, InteractionConfig, LayoutConfig};
pub use controller::{Direction, DragDraft, HitBox, ItemController, ItemSnapshot, Key, Phase};
pub use date::{clamp, from_day_number, to_day_number, DateInput};
pub use error::{ConfigError, CoreError, TimelineError};
pub use item::{apply_commit, normalize, normalize_all, partition_valid, Commit, ItemId, RawItem, TimelineItem};
pub use lanes::{assign_lanes, peak_overlap, LaneAssignment};
pub use layout::{compute_layout, place_item, ItemBox, Tick, TimelineLayout};
pub use ruler::{cap_tick_step, choose_tick_step, format_date_label, ruler_ticks};
pub use timeline::Timeline;
pub use zoom::Zoom;
