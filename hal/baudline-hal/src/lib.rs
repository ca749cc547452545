//! Baudline Hardware Abstraction Layer
//!
//! This crate defines the traits the UART engine uses to reach the outside
//! world. A board support crate implements them for real pins; tests
//! implement them over a shared simulated wire.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / link layer               │
//! └─────────────────────────────────────────┘
//!                     │  UartTx / UartRx
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  baudline-core (SoftUart + engine)      │
//! └─────────────────────────────────────────┘
//!                     │  InputPin / OutputPin
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  baudline-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Serial line pins
//! - [`uart::UartTx`], [`uart::UartRx`] - Byte-level serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use uart::{UartConfig, UartRx, UartTx};
