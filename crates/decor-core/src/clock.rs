/// Elapsed-time source for one mounted field.
///
/// Only the origin is stored; the frame time comes from the host on every
/// tick and the elapsed value is handed to the pure transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    origin_sec: f64,
}

impl AnimationClock {
    pub fn starting_at(origin_sec: f64) -> Self {
        Self { origin_sec }
    }

    /// Seconds since the origin. Host timestamps that go backwards read as 0.
    #[inline]
    pub fn elapsed(&self, now_sec: f64) -> f32 {
        let dt = now_sec - self.origin_sec;
        if dt.is_finite() && dt > 0.0 {
            dt as f32
        } else {
            0.0
        }
    }
}
