//! Transmitter
//!
//! Serializes one byte at a time onto the line. Per tick:
//!
//! 1. The bit timer's pulse and the line level are read from current state
//! 2. The sequencer runs
//! 3. Frame register, timer and state are committed together
//!
//! The timer is re-armed when a frame is accepted so every bit, start bit
//! included, lasts exactly one bit period. Between frames it holds.

pub mod machine;

pub use machine::{TxControl, TxInputs, TxState};

use crate::config::{BitTiming, ConfigError, LineConfig};
use crate::shift::TxFrame;
use crate::timer::{BitTimer, TimerControl, TimerMode};

/// Transmitter outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxOutputs {
    /// A frame is in flight
    pub busy: bool,
    /// The stop bit finished this tick
    pub done: bool,
    /// Line level driven this tick
    pub line_out: bool,
}

impl Default for TxOutputs {
    fn default() -> Self {
        Self {
            busy: false,
            done: false,
            line_out: true,
        }
    }
}

/// UART transmitter
#[derive(Debug, Clone)]
pub struct Transmitter {
    timer: BitTimer,
    state: TxState,
    frame: TxFrame,
}

impl Transmitter {
    /// Create a transmitter in the reset state (line idle)
    pub fn new(timing: BitTiming) -> Self {
        Self {
            timer: BitTimer::new(timing, TimerMode::FullBit),
            state: TxState::Idle,
            frame: TxFrame::IDLE,
        }
    }

    /// Create a transmitter from a line configuration
    pub fn from_config(config: &LineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.timing()?))
    }

    /// Line level for the current state
    ///
    /// The frame bit at the current index while busy, idle-high otherwise.
    pub fn line_level(&self) -> bool {
        match self.state {
            TxState::Sending(i) => self.frame.bit(i),
            TxState::Idle => true,
        }
    }

    /// Advance one tick
    ///
    /// `load` with `enabled` set arms a frame for `data` if the transmitter
    /// is idle. While busy the request is dropped and the frame in flight is
    /// untouched.
    pub fn tick(&mut self, enabled: bool, load: bool, data: u8) -> TxOutputs {
        let timer_pulse = self.timer.pulse();
        let line_out = self.line_level();

        let (next, control) = self.state.transition(TxInputs {
            start: enabled && load,
            timer_pulse,
        });

        if load && control.busy {
            trace!("tx: load of {=u8:#x} ignored while busy", data);
        }
        if control.load_frame {
            debug!("tx: frame {=u8:#x}", data);
            self.frame.load(data);
        }
        if control.done {
            trace!("tx: frame done");
        }

        self.timer.advance(TimerControl {
            restart: control.restart_timer,
            enable: control.busy,
        });
        self.state = next;

        TxOutputs {
            busy: control.busy,
            done: control.done,
            line_out,
        }
    }

    /// Current state
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Check if a frame is in flight
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Frame register contents
    pub fn frame(&self) -> TxFrame {
        self.frame
    }

    /// Bit timing this transmitter was built with
    pub fn timing(&self) -> BitTiming {
        self.timer.timing()
    }

    /// Return to the reset state, abandoning any frame in flight
    pub fn reset(&mut self) {
        trace!("tx: reset");
        self.timer.reset();
        self.frame.reset();
        self.state = TxState::Idle;
    }
}
