//! Frame clock bookkeeping.

/// Converts an externally supplied monotonic clock into per-tick deltas.
///
/// The tick loop owns the "now" value; everything downstream (animation
/// advancement in particular) only ever sees deltas, which keeps the
/// advancement step pure and callable on any scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// A clock that has not observed a tick yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `now` and return the delta since the previous observation.
    ///
    /// The first observation and any non-monotonic jump yield a zero delta
    /// rather than a negative one.
    pub fn delta(&mut self, now: f64) -> f32 {
        let delta = match self.last {
            Some(last) if now >= last => (now - last) as f32,
            _ => 0.0,
        };
        self.last = Some(now);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.0), 16.0);
        assert_eq!(clock.delta(1032.5), 16.5);
    }

    #[test]
    fn test_clock_jump_back_yields_zero() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        assert_eq!(clock.delta(900.0), 0.0);
        assert_eq!(clock.delta(916.0), 16.0);
    }
}
