//! Countdown gating the idle state of a companion.
//!
//! The timer holds a number of frames. It is idle exactly when it reads 0.
//! While the companion walks, the timer is disabled (reads -1) so it neither
//! counts down nor reports idle; the countdown restarts when a movement
//! segment ends.

/// Value of a disabled timer.
pub const IDLE_DISABLED: i32 = -1;

/// Frames left until the companion is considered idle.
///
/// Never reads below [`IDLE_DISABLED`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleTimer {
    frames: i32,
}

impl IdleTimer {
    /// Start counting down from `frames`.
    pub fn start(&mut self, frames: u32) {
        self.frames = i32::try_from(frames).unwrap_or(i32::MAX);
    }

    /// Stop counting; the timer is not idle until restarted or cleared.
    pub fn disable(&mut self) {
        self.frames = IDLE_DISABLED;
    }

    /// Become idle immediately.
    pub fn clear(&mut self) {
        self.frames = 0;
    }

    /// Advance one frame. Only a running countdown moves.
    pub fn tick(&mut self) {
        if self.frames > 0 {
            self.frames -= 1;
        }
    }

    pub fn is_idle(&self) -> bool {
        self.frames == 0
    }

    pub fn is_disabled(&self) -> bool {
        self.frames == IDLE_DISABLED
    }

    pub fn frames(&self) -> i32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(IdleTimer::default().is_idle());
    }

    #[test]
    fn test_countdown_reaches_idle_and_stays() {
        let mut timer = IdleTimer::default();
        timer.start(3);
        timer.tick();
        timer.tick();
        assert!(!timer.is_idle());
        timer.tick();
        assert!(timer.is_idle());
        timer.tick();
        assert_eq!(timer.frames(), 0);
    }

    #[test]
    fn test_disabled_does_not_count_down() {
        let mut timer = IdleTimer::default();
        timer.disable();
        for _ in 0..10 {
            timer.tick();
        }
        assert!(timer.is_disabled());
        assert!(!timer.is_idle());
        assert_eq!(timer.frames(), IDLE_DISABLED);
    }

    #[test]
    fn test_start_saturates_large_values() {
        let mut timer = IdleTimer::default();
        timer.start(u32::MAX);
        assert_eq!(timer.frames(), i32::MAX);
    }
}
