//! Timing for the simulator.
//!
//! The simulator compresses time: every poll advances a virtual clock by the
//! firmware poll interval, but only [`POLL_PERIOD`] of wall time passes. With
//! the minutely cadence the history shifts every few seconds on screen.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Wall time between two polls.
pub const POLL_PERIOD: Duration = Duration::from_millis(250);

/// Wall time per needle animation tick.
pub const NEEDLE_TICK: Duration = Duration::from_millis(12);

/// Virtual milliseconds since start. Sensor delays advance it instead of sleeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualClock {
    now_ns: u64,
}

impl VirtualClock {
    pub const fn new() -> Self { Self { now_ns: 0 } }

    pub const fn now_ms(&self) -> u64 { self.now_ns / 1_000_000 }

    pub fn advance_ms(
        &mut self,
        ms: u64,
    ) {
        self.now_ns += ms * 1_000_000;
    }
}

impl DelayNs for VirtualClock {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.now_ns += u64::from(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_advance_virtual_time() {
        let mut clock = VirtualClock::new();
        clock.delay_ms(1_000);
        clock.delay_us(500);
        clock.advance_ms(5_000);
        assert_eq!(clock.now_ms(), 6_000);
    }
}
