//! Frame timing
//!
//! Turns animation-frame timestamps into the simulation's variable `dt`.

use crate::consts::NOMINAL_FRAME_DT;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Forget the previous timestamp (the next frame gets a nominal step)
    pub fn restart(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous frame
    ///
    /// Returns `None` for a timestamp that did not move forward. Gaps
    /// longer than `max_dt` (e.g. the tab was hidden) are clamped.
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        if !now_ms.is_finite() {
            return None;
        }
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return Some(NOMINAL_FRAME_DT.min(self.max_dt));
        };

        let dt = ((now_ms - last) / 1000.0) as f32;
        if dt <= 0.0 {
            return None;
        }
        self.last_ms = Some(now_ms);
        Some(dt.min(self.max_dt))
    }
}
