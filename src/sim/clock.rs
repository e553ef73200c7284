//! Frame clock: delta-time derivation with pause-safe anchoring
//!
//! The loop driver feeds raw animation-frame timestamps in; the clock hands
//! back the delta to advance by. The first frame after startup or a pause has
//! no valid anchor and yields zero, so elapsed-time accounting never jumps.

/// Tracks the previous frame timestamp across animation callbacks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the delta (ms) for a frame at `timestamp`
    ///
    /// While paused the delta is still computed (drawing continues every
    /// frame) but the anchor is invalidated, so the first unpaused frame
    /// reports zero instead of the whole paused interval.
    pub fn frame(&mut self, timestamp: f64, paused: bool) -> f64 {
        let dt = match self.last_timestamp {
            Some(previous) => (timestamp - previous).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = if paused { None } else { Some(timestamp) };
        dt
    }

    /// Drop the anchor (surface teardown / visibility loss)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
