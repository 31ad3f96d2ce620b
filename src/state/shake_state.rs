//! Shake animation state for rejected form submissions

use std::time::{Duration, Instant};

/// Transient horizontal shake of a form
#[derive(Debug, Clone)]
pub struct ShakeState {
    /// When the shake was (re)armed
    pub start_time: Instant,
    /// How long the form keeps shaking
    pub duration: Duration,
}

impl ShakeState {
    /// Default animation duration (500ms)
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);
    /// Peak displacement in columns
    const AMPLITUDE: f32 = 3.0;
    /// Full left-right swings over the whole animation
    const SWINGS: f32 = 3.0;

    pub fn new(duration: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            duration,
        }
    }

    /// Restart the animation from now
    pub fn rearm(&mut self) {
        self.start_time = Instant::now();
    }

    /// Progress from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.start_time.elapsed().as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Check if the animation has run its course
    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }

    /// Horizontal offset in columns for the current frame
    pub fn offset(&self) -> i16 {
        Self::offset_at(self.progress())
    }

    /// Offset at a given progress. The swing decays with a cubic ease-out.
    pub fn offset_at(progress: f32) -> i16 {
        let progress = progress.clamp(0.0, 1.0);
        let decay = 1.0 - simple_easing::cubic_out(progress);
        let phase = progress * Self::SWINGS * std::f32::consts::TAU;
        (Self::AMPLITUDE * decay * phase.sin()).round() as i16
    }
}

impl Default for ShakeState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_expired() {
        let shake = ShakeState::default();
        assert!(!shake.is_expired());
        assert_eq!(shake.duration, ShakeState::DEFAULT_DURATION);
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let shake = ShakeState::new(Duration::ZERO);
        assert!(shake.is_expired());
        assert_eq!(shake.progress(), 1.0);
    }

    #[test]
    fn test_expires_after_duration() {
        let mut shake = ShakeState::new(Duration::from_millis(100));
        shake.start_time = Instant::now() - Duration::from_millis(150);
        assert!(shake.is_expired());
        assert_eq!(shake.offset(), 0);
    }

    #[test]
    fn test_rearm_restarts() {
        let mut shake = ShakeState::new(Duration::from_millis(100));
        shake.start_time = Instant::now() - Duration::from_millis(150);
        shake.rearm();
        assert!(!shake.is_expired());
    }

    #[test]
    fn test_offset_rests_at_both_ends() {
        assert_eq!(ShakeState::offset_at(0.0), 0);
        assert_eq!(ShakeState::offset_at(1.0), 0);
    }

    #[test]
    fn test_offset_moves_early_and_stays_within_amplitude() {
        // A quarter swing in: sin peaks
        let early = ShakeState::offset_at(1.0 / 12.0);
        assert!(early > 0);
        for step in 0..=100 {
            let offset = ShakeState::offset_at(step as f32 / 100.0);
            assert!(offset.abs() <= 3, "offset {offset} at step {step}");
        }
    }
}
