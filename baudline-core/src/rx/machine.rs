//! Receive state machine
//!
//! All receiver control is a function of the current state and this tick's
//! inputs. The machine never touches the timer or the accumulator itself; it
//! returns control outputs the receiver commits.

use crate::shift::DATA_BITS;

/// Receiver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Waiting for a falling edge
    #[default]
    Idle,
    /// Edge seen, waiting for the start-bit sample point
    Start,
    /// Sampling data bit `n` (0..=7)
    Data(u8),
    /// Waiting for the stop-bit sample point
    Stop,
}

/// Types of receive errors
///
/// Both are local to one frame; the receiver is ready for the next edge on
/// the following tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxError {
    /// Line was back high at the start-bit sample point
    FalseStart,
    /// Stop-bit sample read low
    FramingError,
}

/// How a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxEvent {
    /// Valid stop bit; the accumulator holds the byte
    Complete,
    /// Frame rejected
    Failed(RxError),
}

/// Inputs sampled for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxInputs {
    /// Receiver armed to start new frames
    pub enabled: bool,
    /// Falling edge seen this tick
    pub edge: bool,
    /// Bit timer at its sample point this tick
    pub timer_pulse: bool,
    /// Line level this tick
    pub line: bool,
}

/// Control outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxControl {
    /// A frame is in progress
    pub busy: bool,
    /// Capture the line level into the accumulator
    pub shift_enable: bool,
    /// Data bit currently being sampled
    pub bit_index: u8,
    /// Re-phase the bit timer to this edge
    pub restart_timer: bool,
    /// Terminal event, if the frame ended this tick
    pub event: Option<RxEvent>,
}

impl RxState {
    /// Check if a frame is in progress
    pub fn is_busy(&self) -> bool {
        !matches!(self, RxState::Idle)
    }

    /// Data bit index (0 outside the data phase)
    pub fn bit_index(&self) -> u8 {
        match self {
            RxState::Data(i) => *i,
            _ => 0,
        }
    }

    /// Process one tick and return the next state with its control outputs
    pub fn transition(self, inputs: RxInputs) -> (Self, RxControl) {
        use RxState::*;

        let mut control = RxControl {
            busy: self.is_busy(),
            bit_index: self.bit_index(),
            ..RxControl::default()
        };

        let next = match self {
            Idle if inputs.enabled && inputs.edge => {
                control.restart_timer = true;
                Start
            }
            Idle => Idle,

            // Everything below only moves on the timer's sample point
            _ if !inputs.timer_pulse => self,

            Start if !inputs.line => Data(0),
            Start => {
                control.event = Some(RxEvent::Failed(RxError::FalseStart));
                Idle
            }

            Data(i) => {
                control.shift_enable = true;
                if i + 1 == DATA_BITS {
                    Stop
                } else {
                    Data(i + 1)
                }
            }

            Stop => {
                control.event = Some(if inputs.line {
                    RxEvent::Complete
                } else {
                    RxEvent::Failed(RxError::FramingError)
                });
                Idle
            }
        };

        (next, control)
    }
}
