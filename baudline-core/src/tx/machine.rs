//! Transmit bit sequencer
//!
//! Walks the frame register from bit 0 (start) to bit 9 (stop), one bit per
//! timer pulse. A start request while a frame is in flight is ignored, not
//! queued.

use crate::shift::STOP_BIT_INDEX;

/// Transmitter states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// Line idle, ready to accept a frame
    #[default]
    Idle,
    /// Driving frame bit `n` (0..=9)
    Sending(u8),
}

/// Inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxInputs {
    /// Load and arm a new frame
    pub start: bool,
    /// Bit timer pulse this tick
    pub timer_pulse: bool,
}

/// Control outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxControl {
    /// A frame is in flight
    pub busy: bool,
    /// The stop bit finished this tick
    pub done: bool,
    /// Frame bit being driven
    pub bit_index: u8,
    /// Copy the data byte into the frame register
    pub load_frame: bool,
    /// Re-arm the bit timer for a fresh frame
    pub restart_timer: bool,
}

impl TxState {
    /// Check if a frame is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, TxState::Sending(_))
    }

    /// Frame bit being driven (0 when idle)
    pub fn bit_index(&self) -> u8 {
        match self {
            TxState::Sending(i) => *i,
            TxState::Idle => 0,
        }
    }

    /// Process one tick and return the next state with its control outputs
    pub fn transition(self, inputs: TxInputs) -> (Self, TxControl) {
        let mut control = TxControl {
            busy: self.is_busy(),
            bit_index: self.bit_index(),
            ..TxControl::default()
        };

        let next = match self {
            TxState::Idle if inputs.start => {
                control.load_frame = true;
                control.restart_timer = true;
                TxState::Sending(0)
            }
            TxState::Idle => TxState::Idle,

            TxState::Sending(i) if inputs.timer_pulse => {
                if i == STOP_BIT_INDEX {
                    control.done = true;
                    TxState::Idle
                } else {
                    TxState::Sending(i + 1)
                }
            }
            TxState::Sending(_) => self,
        };

        (next, control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: TxInputs = TxInputs {
        start: true,
        timer_pulse: false,
    };
    const PULSE: TxInputs = TxInputs {
        start: false,
        timer_pulse: true,
    };

    #[test]
    fn test_start_from_idle() {
        let (next, control) = TxState::Idle.transition(START);
        assert_eq!(next, TxState::Sending(0));
        assert!(control.load_frame);
        assert!(control.restart_timer);
        assert!(!control.busy);
    }

    #[test]
    fn test_idle_ignores_pulse() {
        let (next, control) = TxState::Idle.transition(PULSE);
        assert_eq!(next, TxState::Idle);
        assert!(!control.done);
    }

    #[test]
    fn test_walks_all_ten_bits() {
        let mut state = TxState::Sending(0);
        for i in 0..9 {
            let (next, control) = state.transition(PULSE);
            assert_eq!(control.bit_index, i);
            assert!(!control.done);
            state = next;
        }
        let (next, control) = state.transition(PULSE);
        assert!(control.done);
        assert!(control.busy);
        assert_eq!(next, TxState::Idle);
        assert_eq!(next.bit_index(), 0);
    }

    #[test]
    fn test_start_while_busy_is_noop() {
        for i in 0..10 {
            let (next, control) = TxState::Sending(i).transition(START);
            assert_eq!(next, TxState::Sending(i));
            assert!(!control.load_frame);
            assert!(!control.restart_timer);
        }
    }
}
