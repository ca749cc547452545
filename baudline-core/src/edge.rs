//! Falling-edge detector
//!
//! Two-state Mealy machine that flags the line's high→low transition, the
//! candidate start bit. It trusts the line to be stable; there is no
//! debouncing.

/// Edge detector states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeState {
    /// Line last seen high
    #[default]
    High,
    /// Line last seen low
    Low,
}

impl EdgeState {
    /// Process one line sample
    ///
    /// Returns the next state and whether a falling edge was seen.
    pub fn transition(self, line: bool) -> (Self, bool) {
        match (self, line) {
            (EdgeState::High, false) => (EdgeState::Low, true),
            (EdgeState::Low, true) => (EdgeState::High, false),
            _ => (self, false),
        }
    }
}

/// Falling-edge detector
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    state: EdgeState,
}

impl EdgeDetector {
    /// Create a detector in the reset state (line assumed idle-high)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the line for this tick
    ///
    /// Returns `true` for exactly the tick on which the line is first seen
    /// low after being high.
    pub fn step(&mut self, line: bool) -> bool {
        let (next, edge) = self.state.transition(line);
        self.state = next;
        edge
    }

    /// Current state
    pub fn state(&self) -> EdgeState {
        self.state
    }

    /// Return to the reset state
    pub fn reset(&mut self) {
        self.state = EdgeState::High;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_on_falling_edge_only() {
        let mut detector = EdgeDetector::new();
        let line = [true, true, false, false, false, true, false, true];
        let expected = [false, false, true, false, false, false, true, false];

        for (sample, want) in line.iter().zip(expected.iter()) {
            assert_eq!(detector.step(*sample), *want);
        }
    }

    #[test]
    fn test_rising_edge_changes_state_without_pulse() {
        let (next, edge) = EdgeState::Low.transition(true);
        assert_eq!(next, EdgeState::High);
        assert!(!edge);
    }

    #[test]
    fn test_line_low_at_reset_counts_as_edge() {
        let mut detector = EdgeDetector::new();
        assert!(detector.step(false));
        assert!(!detector.step(false));
    }

    #[test]
    fn test_reset() {
        let mut detector = EdgeDetector::new();
        detector.step(false);
        assert_eq!(detector.state(), EdgeState::Low);
        detector.reset();
        assert_eq!(detector.state(), EdgeState::High);
    }
}
