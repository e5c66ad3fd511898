/// Accumulator gate between the host's animation frames and fixed ticks.
///
/// At most one tick per frame: once the accumulated time exceeds the tick
/// interval the tick runs and the accumulator drops back to zero. There is
/// no catch-up after a long frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: f64,
    accumulated_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp; true when a tick is due.
    pub fn frame(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        let delta = now_ms - self.last_ms;
        self.last_ms = now_ms;
        if delta.is_finite() && delta > 0.0 {
            self.accumulated_ms += delta;
        }
        if self.accumulated_ms > interval_ms {
            self.accumulated_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }
}
