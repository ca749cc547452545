//! Bit-period timer ("baud counter")
//!
//! A restartable down-counter that pulses once per bit period, when the
//! counter equals the mid-point. The pulse is a combinational function of
//! the counter, so it is read with [`BitTimer::pulse`] before the consumers
//! run, and the counter is committed afterwards with [`BitTimer::advance`].
//!
//! The receiver restarts the timer on every start edge. The counter reloads
//! to `divisor - 1` and the first pulse arrives `divisor - mid_point` ticks
//! later, in the middle of the start bit, then every `divisor` ticks. This
//! re-phasing per frame is what keeps an unsynchronized sender's bits from
//! drifting away from the sample point.
//!
//! The transmitter uses the same counter as a plain bit clock: on restart it
//! reloads so that the first pulse arrives a whole bit period later.

use crate::config::BitTiming;

/// What a restart reloads the counter to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode {
    /// First pulse half a bit after restart (receiver sample point)
    MidBit,
    /// First pulse one full bit after restart (transmitter bit clock)
    FullBit,
}

/// Per-tick timer control inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerControl {
    /// Reload the counter (takes precedence over `enable`)
    pub restart: bool,
    /// Count down this tick
    pub enable: bool,
}

impl TimerControl {
    /// Count down without restarting
    pub const RUN: Self = Self {
        restart: false,
        enable: true,
    };
}

/// Bit-period down-counter
#[derive(Debug, Clone)]
pub struct BitTimer {
    timing: BitTiming,
    mode: TimerMode,
    counter: u32,
}

impl BitTimer {
    /// Create a timer in its reset state (counter at `divisor - 1`)
    pub fn new(timing: BitTiming, mode: TimerMode) -> Self {
        Self {
            timing,
            mode,
            counter: timing.divisor() - 1,
        }
    }

    /// Pulse output for the current tick
    pub fn pulse(&self) -> bool {
        self.counter == self.timing.mid_point()
    }

    /// Commit this tick's counter update
    pub fn advance(&mut self, control: TimerControl) {
        if control.restart {
            self.counter = self.reload_value();
        } else if control.enable {
            self.counter = match self.counter {
                0 => self.timing.divisor() - 1,
                n => n - 1,
            };
        }
    }

    /// Counter value loaded on restart
    fn reload_value(&self) -> u32 {
        match self.mode {
            TimerMode::MidBit => self.timing.divisor() - 1,
            // Counter sits one below the mid-point so that the pulse comes
            // round again after exactly `divisor` decrements.
            TimerMode::FullBit => self.timing.mid_point() - 1,
        }
    }

    /// Current counter value
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Bit timing this timer was built with
    pub fn timing(&self) -> BitTiming {
        self.timing
    }

    /// Return the counter to `divisor - 1`
    pub fn reset(&mut self) {
        self.counter = self.timing.divisor() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timer(divisor: u32, mode: TimerMode) -> BitTimer {
        BitTimer::new(BitTiming::from_divisor(divisor).unwrap(), mode)
    }

    /// Ticks after the restart tick at which pulses are seen
    fn pulses_after_restart(timer: &mut BitTimer, ticks: u32) -> heapless::Vec<u32, 64> {
        timer.advance(TimerControl {
            restart: true,
            enable: true,
        });
        let mut seen = heapless::Vec::new();
        for t in 1..=ticks {
            if timer.pulse() {
                seen.push(t).unwrap();
            }
            timer.advance(TimerControl::RUN);
        }
        seen
    }

    #[test]
    fn test_reset_value() {
        let t = timer(16, TimerMode::MidBit);
        assert_eq!(t.counter(), 15);
        assert!(!t.pulse());
    }

    #[test]
    fn test_wraps_from_zero() {
        let mut t = timer(4, TimerMode::MidBit);
        let mut seen = heapless::Vec::<u32, 8>::new();
        for _ in 0..8 {
            seen.push(t.counter()).unwrap();
            t.advance(TimerControl::RUN);
        }
        assert_eq!(seen.as_slice(), &[3, 2, 1, 0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_hold_when_disabled() {
        let mut t = timer(8, TimerMode::MidBit);
        t.advance(TimerControl::default());
        assert_eq!(t.counter(), 7);
    }

    #[test]
    fn test_restart_takes_precedence() {
        let mut t = timer(8, TimerMode::MidBit);
        t.advance(TimerControl::RUN);
        t.advance(TimerControl::RUN);
        t.advance(TimerControl {
            restart: true,
            enable: true,
        });
        assert_eq!(t.counter(), 7);
    }

    #[test]
    fn test_mid_bit_first_pulse_half_period() {
        let mut t = timer(16, TimerMode::MidBit);
        let pulses = pulses_after_restart(&mut t, 40);
        assert_eq!(pulses.as_slice(), &[8, 24, 40]);
    }

    #[test]
    fn test_full_bit_first_pulse_full_period() {
        let mut t = timer(16, TimerMode::FullBit);
        let pulses = pulses_after_restart(&mut t, 48);
        assert_eq!(pulses.as_slice(), &[16, 32, 48]);
    }

    proptest! {
        #[test]
        fn prop_pulse_spacing_is_divisor(divisor in 2u32..20, mode_full in any::<bool>()) {
            let mode = if mode_full { TimerMode::FullBit } else { TimerMode::MidBit };
            let mut t = timer(divisor, mode);
            let pulses = pulses_after_restart(&mut t, divisor * 3);

            let first = match mode {
                TimerMode::MidBit => divisor - divisor / 2,
                TimerMode::FullBit => divisor,
            };
            prop_assert_eq!(pulses[0], first);
            for pair in pulses.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], divisor);
            }
        }
    }
}
