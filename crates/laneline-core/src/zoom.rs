//! Bounded multiplicative zoom.

use serde::{Deserialize, Serialize};

use crate::date::clamp;

pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 3.0;
/// Factor applied per zoom action.
pub const ZOOM_STEP: f64 = 1.25;

/// Current zoom level; always within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64")]
pub struct Zoom(f64);

impl From<f64> for Zoom {
    fn from(level: f64) -> Self {
        Self::new(level)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Zoom {
    /// A zoom level clamped into range. NaN falls back to 1.0.
    pub fn new(level: f64) -> Self {
        if level.is_nan() {
            return Self::default();
        }
        Self(clamp(level, MIN_ZOOM, MAX_ZOOM))
    }

    pub fn level(&self) -> f64 {
        self.0
    }

    /// Rounded percentage for display, e.g. `125`.
    pub fn percent(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        *self = Self::new(self.0 * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        *self = Self::new(self.0 / ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Ctrl+wheel zoom: scrolling up zooms in. Returns whether the event was
    /// consumed.
    pub fn wheel(&mut self, delta_y: f64, ctrl: bool) -> bool {
        if !ctrl {
            return false;
        }
        if delta_y < 0.0 {
            self.zoom_in();
        } else {
            self.zoom_out();
        }
        true
    }

    /// Pixel density at this zoom for a base density.
    pub fn pixels_per_day(&self, base_pixels_per_day: f64) -> f64 {
        base_pixels_per_day * self.0
    }
}
