//! Board-agnostic UART engine
//!
//! A software model of an asynchronous serial port, advanced one tick at a
//! time like the clocked logic it stands in for:
//!
//! - Tick source (the shared time base)
//! - Falling-edge detector (start bit candidate)
//! - Bit-period timer (mid-bit sample point / full-bit clock)
//! - Receive state machine with false-start and framing-error detection
//! - Transmit bit sequencer
//! - Shift storage for both directions
//! - Full-duplex engine and a pin-driven port on top of the HAL traits
//!
//! # Tick order
//!
//! Within one tick every combinational output (edge pulse, timer pulse,
//! transmit line level) is evaluated from the state left by the previous
//! tick, then the state machines run, then all state is committed. No
//! component ever sees a value produced later in the same tick.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod edge;
pub mod engine;
pub mod port;
pub mod rx;
pub mod shift;
pub mod tick;
#[cfg(test)]
mod testing;
pub mod timer;
pub mod tx;

pub use config::{BitTiming, ConfigError, LineConfig};
pub use engine::{Uart, UartInputs, UartOutputs};
pub use port::{PortError, SoftUart};
pub use rx::{Receiver, RxError, RxOutputs, Status, StatusLatch};
pub use tick::{Tick, TickSource};
pub use tx::{Transmitter, TxOutputs};
