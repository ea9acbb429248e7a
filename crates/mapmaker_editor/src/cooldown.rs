use std::time::Duration;

/// Rate limit for free-object placement.
///
/// Time is advanced explicitly with [`PlacementCooldown::tick`] so the
/// session stays deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementCooldown {
    duration: Duration,
    /// Time left before the next placement is allowed
    remaining: Duration,
}

impl PlacementCooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: Duration::ZERO,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        !self.remaining.is_zero()
    }

    /// Start the window after a successful placement
    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    /// Advance time by `delta`
    pub fn tick(&mut self, delta: Duration) {
        self.remaining = self.remaining.saturating_sub(delta);
    }

    /// Consume the cooldown if it is idle. Returns whether placement may proceed.
    pub fn try_trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.trigger();
        true
    }
}

impl Default for PlacementCooldown {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let mut cooldown = PlacementCooldown::default();
        assert!(!cooldown.is_active());
        assert!(cooldown.try_trigger());
        assert!(!cooldown.try_trigger());

        cooldown.tick(Duration::from_millis(399));
        assert!(cooldown.is_active());
        cooldown.tick(Duration::from_millis(1));
        assert!(!cooldown.is_active());
        assert!(cooldown.try_trigger());
    }

    #[test]
    fn test_zero_duration_never_blocks() {
        let mut cooldown = PlacementCooldown::new(Duration::ZERO);
        assert!(cooldown.try_trigger());
        assert!(cooldown.try_trigger());
    }
}
