//! Receiver
//!
//! Recovers bytes from a line of unknown phase. Per tick:
//!
//! 1. The edge detector samples the line
//! 2. The bit timer's pulse is read from its current counter
//! 3. The state machine runs on those outputs
//! 4. Timer, accumulator and state are committed together
//!
//! A frame's outcome appears as a one-tick pulse in [`RxOutputs`].

pub mod machine;
pub mod status;

pub use machine::{RxControl, RxError, RxEvent, RxInputs, RxState};
pub use status::{Status, StatusLatch};

use crate::config::{BitTiming, ConfigError, LineConfig};
use crate::edge::EdgeDetector;
use crate::shift::RxShiftRegister;
use crate::timer::{BitTimer, TimerControl, TimerMode};

/// Receiver outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxOutputs {
    /// A frame is in progress
    pub busy: bool,
    /// A frame completed with a valid stop bit this tick
    pub done: bool,
    /// A frame was rejected this tick
    pub error: Option<RxError>,
    /// Accumulator contents (the received byte when `done` is set)
    pub byte: u8,
}

impl RxOutputs {
    /// Collapse the pulses into a [`Status`]
    pub fn status(&self) -> Status {
        match (self.done, self.error) {
            (true, _) => Status::Done(self.byte),
            (false, Some(kind)) => Status::Error(kind),
            (false, None) => Status::Idle,
        }
    }
}

/// Frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStats {
    /// Frames received with a valid stop bit
    pub frames: u32,
    /// Edges rejected at the start-bit sample point
    pub false_starts: u32,
    /// Frames with a low stop bit
    pub framing_errors: u32,
}

impl RxStats {
    fn record(&mut self, event: RxEvent) {
        let counter = match event {
            RxEvent::Complete => &mut self.frames,
            RxEvent::Failed(RxError::FalseStart) => &mut self.false_starts,
            RxEvent::Failed(RxError::FramingError) => &mut self.framing_errors,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total rejected frames
    pub fn errors(&self) -> u32 {
        self.false_starts.saturating_add(self.framing_errors)
    }
}

/// UART receiver
#[derive(Debug, Clone)]
pub struct Receiver {
    edge: EdgeDetector,
    timer: BitTimer,
    state: RxState,
    shift: RxShiftRegister,
    stats: RxStats,
}

impl Receiver {
    /// Create a receiver in the reset state
    pub fn new(timing: BitTiming) -> Self {
        Self {
            edge: EdgeDetector::new(),
            timer: BitTimer::new(timing, TimerMode::MidBit),
            state: RxState::Idle,
            shift: RxShiftRegister::new(),
            stats: RxStats::default(),
        }
    }

    /// Create a receiver from a line configuration
    pub fn from_config(config: &LineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.timing()?))
    }

    /// Advance one tick
    ///
    /// `enabled` only gates the start of new frames; clearing it does not
    /// abort a frame already in progress.
    pub fn tick(&mut self, enabled: bool, line: bool) -> RxOutputs {
        let edge = self.edge.step(line);
        let timer_pulse = self.timer.pulse();

        let (next, control) = self.state.transition(RxInputs {
            enabled,
            edge,
            timer_pulse,
            line,
        });

        let byte = self.shift.value();
        let mut outputs = RxOutputs {
            busy: control.busy,
            byte,
            ..RxOutputs::default()
        };

        if let Some(event) = control.event {
            self.stats.record(event);
            match event {
                RxEvent::Complete => {
                    debug!("rx: frame {=u8:#x}", byte);
                    outputs.done = true;
                }
                RxEvent::Failed(kind) => {
                    warn!("rx: {}", kind);
                    outputs.error = Some(kind);
                }
            }
        }

        self.timer.advance(TimerControl {
            restart: control.restart_timer,
            enable: true,
        });
        if control.shift_enable {
            self.shift.shift_in(line);
        }
        self.state = next;

        outputs
    }

    /// Current state
    pub fn state(&self) -> RxState {
        self.state
    }

    /// Check if a frame is in progress
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Current accumulator contents
    pub fn byte(&self) -> u8 {
        self.shift.value()
    }

    /// Frame counters since construction or the last [`Receiver::reset_stats`]
    pub fn stats(&self) -> RxStats {
        self.stats
    }

    /// Clear the frame counters
    pub fn reset_stats(&mut self) {
        self.stats = RxStats::default();
    }

    /// Bit timing this receiver was built with
    pub fn timing(&self) -> BitTiming {
        self.timer.timing()
    }

    /// Return every component to its reset state
    ///
    /// Counters are kept; use [`Receiver::reset_stats`] to clear them.
    pub fn reset(&mut self) {
        trace!("rx: reset");
        self.edge.reset();
        self.timer.reset();
        self.shift.reset();
        self.state = RxState::Idle;
    }
}
