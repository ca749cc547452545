//! Pin-driven software UART
//!
//! Binds the engine to a pair of HAL pins. Each [`SoftUart::poll`] is one
//! tick: sample the RX pin, advance the engine, drive the TX pin. The
//! caller is responsible for calling `poll` at the configured tick rate
//! (from a timer interrupt, a ticker task, or a simulation loop).
//!
//! The blocking [`UartTx`]/[`UartRx`] implementations simply poll until the
//! operation completes.

use baudline_hal::gpio::{InputPin, OutputPin};
use baudline_hal::uart::{UartRx, UartTx};

use crate::config::{ConfigError, LineConfig};
use crate::engine::{Uart, UartInputs, UartOutputs};
use crate::rx::{RxError, Status, StatusLatch};

/// Errors surfaced through the HAL UART traits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// A frame was rejected by the receiver
    Rx(RxError),
}

impl From<RxError> for PortError {
    fn from(kind: RxError) -> Self {
        PortError::Rx(kind)
    }
}

/// Software UART on two pins
pub struct SoftUart<RX, TX> {
    uart: Uart,
    rx_pin: RX,
    tx_pin: TX,
    rx_enabled: bool,
    latch: StatusLatch,
    pending: Option<u8>,
}

impl<RX, TX> SoftUart<RX, TX>
where
    RX: InputPin,
    TX: OutputPin,
{
    /// Create a port and drive the TX pin to the idle level
    pub fn new(config: LineConfig, rx_pin: RX, mut tx_pin: TX) -> Result<Self, ConfigError> {
        let uart = Uart::new(config)?;
        tx_pin.set_high();
        Ok(Self {
            uart,
            rx_pin,
            tx_pin,
            rx_enabled: true,
            latch: StatusLatch::new(),
            pending: None,
        })
    }

    /// Advance one tick
    pub fn poll(&mut self) -> UartOutputs {
        let mut inputs = UartInputs {
            rx_enabled: self.rx_enabled,
            line_in: self.rx_pin.is_high(),
            ..UartInputs::idle()
        };
        if let Some(byte) = self.pending.take() {
            inputs = inputs.with_load(byte);
        }

        let outputs = self.uart.tick(inputs);
        self.tx_pin.set_state(outputs.tx.line_out);
        self.latch.capture(outputs.rx.status());
        outputs
    }

    /// Queue `byte` for the next tick
    ///
    /// Returns `false` without queueing if a frame is still in flight or a
    /// byte is already waiting.
    pub fn try_write(&mut self, byte: u8) -> bool {
        if self.pending.is_some() || self.uart.tx().is_busy() {
            return false;
        }
        self.pending = Some(byte);
        true
    }

    /// Take the last completed frame, if any
    pub fn try_read(&mut self) -> Result<Option<u8>, PortError> {
        match self.latch.take() {
            Status::Idle => Ok(None),
            Status::Done(byte) => Ok(Some(byte)),
            Status::Error(kind) => Err(kind.into()),
        }
    }

    /// Check if a received frame was overwritten before it was read
    pub fn overrun(&self) -> bool {
        self.latch.overrun()
    }

    /// Arm or disarm the receiver (a frame in progress still completes)
    pub fn set_rx_enabled(&mut self, enabled: bool) {
        self.rx_enabled = enabled;
    }

    /// Underlying engine
    pub fn engine(&self) -> &Uart {
        &self.uart
    }

    /// Reset the engine, drop any queued byte and idle the TX pin
    pub fn reset(&mut self) {
        self.uart.reset();
        self.latch.reset();
        self.pending = None;
        self.tx_pin.set_high();
    }

    /// Release the pins
    pub fn release(self) -> (RX, TX) {
        (self.rx_pin, self.tx_pin)
    }
}

impl<RX, TX> UartTx for SoftUart<RX, TX>
where
    RX: InputPin,
    TX: OutputPin,
{
    type Error = PortError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            while !self.try_write(byte) {
                self.poll();
            }
            // Present the load so the frame is in flight on return
            self.poll();
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.pending.is_some() || self.uart.tx().is_busy() {
            self.poll();
        }
        Ok(())
    }
}

impl<RX, TX> UartRx for SoftUart<RX, TX>
where
    RX: InputPin,
    TX: OutputPin,
{
    type Error = PortError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        for slot in buf.iter_mut() {
            *slot = loop {
                if let Some(byte) = self.try_read()? {
                    break byte;
                }
                self.poll();
            };
        }
        Ok(buf.len())
    }
}
