//! Frame status and pulse capture
//!
//! The receiver reports each completed frame as a single-tick pulse. A
//! consumer polling slower than the tick rate captures it with a
//! [`StatusLatch`], a one-slot holding register. It is not a queue: a
//! second completion before the first is taken replaces it and flags an
//! overrun, like the overrun bit of a hardware UART.

use super::machine::RxError;

/// Outcome of one tick, from the consumer's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No frame completed
    #[default]
    Idle,
    /// Frame received with a valid stop bit
    Done(u8),
    /// Frame rejected
    Error(RxError),
}

impl Status {
    /// Check if nothing completed
    pub fn is_idle(&self) -> bool {
        matches!(self, Status::Idle)
    }

    /// Received byte, if any
    pub fn byte(&self) -> Option<u8> {
        match self {
            Status::Done(byte) => Some(*byte),
            _ => None,
        }
    }

    /// Receive error, if any
    pub fn error(&self) -> Option<RxError> {
        match self {
            Status::Error(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// One-slot capture of status pulses
#[derive(Debug, Clone, Default)]
pub struct StatusLatch {
    held: Status,
    overrun: bool,
}

impl StatusLatch {
    /// Create an empty latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture this tick's status (idle ticks leave the latch untouched)
    pub fn capture(&mut self, status: Status) {
        if status.is_idle() {
            return;
        }
        if !self.held.is_idle() {
            self.overrun = true;
            trace!("status latch overrun");
        }
        self.held = status;
    }

    /// Take the held status, leaving the latch empty
    ///
    /// The overrun flag is cleared along with it.
    pub fn take(&mut self) -> Status {
        self.overrun = false;
        core::mem::take(&mut self.held)
    }

    /// Look at the held status without clearing it
    pub fn peek(&self) -> Status {
        self.held
    }

    /// Check if a status was overwritten before being taken
    pub fn overrun(&self) -> bool {
        self.overrun
    }

    /// Empty the latch
    pub fn reset(&mut self) {
        self.held = Status::Idle;
        self.overrun = false;
    }
}
