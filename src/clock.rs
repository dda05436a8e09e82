//! Wall-clock to virtual-clock bridge for the host loop.
//!
//! The engine only advances through `tick(ms)`. `FrameClock` hands it the
//! whole milliseconds that really passed since the previous tick and keeps
//! the sub-millisecond remainder for the next one, so the engine clock tracks
//! wall time no matter how late a frame wakes up.

use std::time::{Duration, Instant};

use crate::types::TICK_MS;

#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    step: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            step: Duration::from_millis(TICK_MS as u64),
        }
    }

    /// How long the loop may block on input before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.step
            .checked_sub(now.saturating_duration_since(self.last))
            .unwrap_or(Duration::ZERO)
    }

    /// Milliseconds to feed the engine, or `None` while a full step has not
    /// passed yet.
    pub fn advance(&mut self, now: Instant) -> Option<u32> {
        let dt = now.saturating_duration_since(self.last);
        if dt < self.step {
            return None;
        }
        let ms = dt.as_millis().min(u32::MAX as u128) as u32;
        self.last += Duration::from_millis(ms as u64);
        Some(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tick_before_a_full_step() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);

        assert_eq!(clock.advance(t0 + Duration::from_millis(15)), None);
        assert_eq!(clock.timeout(t0 + Duration::from_millis(10)), Duration::from_millis(6));
        assert_eq!(clock.advance(t0 + Duration::from_millis(16)), Some(16));
    }

    #[test]
    fn late_frames_pass_their_full_duration() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);

        assert_eq!(clock.advance(t0 + Duration::from_millis(23)), Some(23));
        assert_eq!(clock.advance(t0 + Duration::from_millis(140)), Some(117));
        assert_eq!(clock.timeout(t0 + Duration::from_millis(200)), Duration::ZERO);
    }

    #[test]
    fn sub_millisecond_remainder_carries_over() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(t0);
        let mut total = 0u64;

        // 100 frames of 16.6ms: the engine must see the whole 1660ms.
        for i in 1..=100u64 {
            let now = t0 + Duration::from_micros(16_600 * i);
            total += clock.advance(now).unwrap_or(0) as u64;
        }
        assert_eq!(total, 1660);
    }
}
