//! Tick source
//!
//! The fixed-rate time base every component advances on. One tick stands in
//! for one edge of the hardware clock.

/// A point on the tick time line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(pub u64);

impl Tick {
    /// Ticks between `earlier` and this tick (zero if `earlier` is later)
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Monotonic tick counter
#[derive(Debug, Clone)]
pub struct TickSource {
    /// Ticks per second
    tick_rate: u32,
    /// Ticks elapsed since construction or the last reset
    now: Tick,
}

impl TickSource {
    /// Create a tick source running at `tick_rate` Hz
    pub const fn new(tick_rate: u32) -> Self {
        Self {
            tick_rate,
            now: Tick(0),
        }
    }

    /// Advance by one tick
    ///
    /// Returns the tick that is now being evaluated.
    pub fn advance(&mut self) -> Tick {
        let current = self.now;
        self.now = Tick(self.now.0.wrapping_add(1));
        current
    }

    /// Number of ticks issued so far
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Ticks issued since `earlier`
    pub fn elapsed_since(&self, earlier: Tick) -> u64 {
        self.now.since(earlier)
    }

    /// Ticks per second
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// Ticks in `micros` microseconds, rounded up
    pub fn ticks_for_micros(&self, micros: u32) -> u64 {
        (micros as u64 * self.tick_rate as u64).div_ceil(1_000_000)
    }

    /// Restart the time line at zero
    pub fn reset(&mut self) {
        self.now = Tick(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_returns_current_tick() {
        let mut source = TickSource::new(1000);
        assert_eq!(source.advance(), Tick(0));
        assert_eq!(source.advance(), Tick(1));
        assert_eq!(source.now(), Tick(2));
    }

    #[test]
    fn test_elapsed_since() {
        let mut source = TickSource::new(1000);
        let mark = source.now();
        for _ in 0..25 {
            source.advance();
        }
        assert_eq!(source.elapsed_since(mark), 25);
        assert_eq!(mark.since(source.now()), 0);
    }

    #[test]
    fn test_ticks_for_micros_rounds_up() {
        let source = TickSource::new(1_843_200);
        // One bit at 115200 baud is ~8.68us = 16 ticks
        assert_eq!(source.ticks_for_micros(1), 2);
        assert_eq!(source.ticks_for_micros(1000), 1844);
        assert_eq!(TickSource::new(1_000_000).ticks_for_micros(17), 17);
    }

    #[test]
    fn test_reset() {
        let mut source = TickSource::new(1000);
        source.advance();
        source.reset();
        assert_eq!(source.now(), Tick(0));
    }
}
