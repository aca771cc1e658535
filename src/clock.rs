use std::time::Instant;

/// Elapsed wall-clock time since the viewing session began.
///
/// The origin is fixed in [`ShowClock::started_at`] and never moves.
#[derive(Debug, Clone, Copy)]
pub struct ShowClock {
    origin: Instant,
}

impl ShowClock {
    pub fn started_at(origin: Instant) -> Self {
        Self { origin }
    }

    /// Seconds between the origin and `now`; zero if `now` is earlier.
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.origin).as_secs_f32()
    }
}
