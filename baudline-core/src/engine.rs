//! Full-duplex engine
//!
//! Owns one receiver, one transmitter and the tick source they share. The
//! two halves have no state in common; only the external line links them.
//!
//! # Tick order
//!
//! 1. The tick source advances
//! 2. The transmitter runs (its line output comes from the state left by
//!    the previous tick)
//! 3. The receiver runs on this tick's line input
//!
//! For [`Uart::loopback_tick`] the line input is the transmitter output of
//! step 2.

use crate::config::{BitTiming, ConfigError, LineConfig};
use crate::rx::{Receiver, RxOutputs, RxStats};
use crate::tick::{Tick, TickSource};
use crate::tx::{Transmitter, TxOutputs};

/// Engine inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartInputs {
    /// Receiver armed for new frames
    pub rx_enabled: bool,
    /// Received line level
    pub line_in: bool,
    /// Transmitter accepts loads
    pub tx_enabled: bool,
    /// Load and arm `data` (pulse)
    pub load: bool,
    /// Byte to transmit
    pub data: u8,
}

impl Default for UartInputs {
    fn default() -> Self {
        Self {
            rx_enabled: true,
            line_in: true,
            tx_enabled: true,
            load: false,
            data: 0,
        }
    }
}

impl UartInputs {
    /// Both halves enabled, idle line, nothing to send
    pub fn idle() -> Self {
        Self::default()
    }

    /// Sample `line` this tick
    pub fn with_line(mut self, line: bool) -> Self {
        self.line_in = line;
        self
    }

    /// Request transmission of `data` this tick
    pub fn with_load(mut self, data: u8) -> Self {
        self.load = true;
        self.data = data;
        self
    }
}

/// Engine outputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartOutputs {
    /// Tick these outputs belong to
    pub tick: Tick,
    /// Receiver outputs
    pub rx: RxOutputs,
    /// Transmitter outputs
    pub tx: TxOutputs,
}

/// Software UART
#[derive(Debug, Clone)]
pub struct Uart {
    config: LineConfig,
    clock: TickSource,
    rx: Receiver,
    tx: Transmitter,
}

impl Uart {
    /// Build an engine from a validated configuration
    pub fn new(config: LineConfig) -> Result<Self, ConfigError> {
        let timing = config.timing()?;
        debug!(
            "uart: {=u32} ticks/bit, sample at {=u32}",
            timing.divisor(),
            timing.mid_point()
        );
        Ok(Self {
            config,
            clock: TickSource::new(config.tick_rate),
            rx: Receiver::new(timing),
            tx: Transmitter::new(timing),
        })
    }

    /// Advance both halves one tick
    pub fn tick(&mut self, inputs: UartInputs) -> UartOutputs {
        let tick = self.clock.advance();
        let tx = self.tx.tick(inputs.tx_enabled, inputs.load, inputs.data);
        let rx = self.rx.tick(inputs.rx_enabled, inputs.line_in);
        UartOutputs { tick, rx, tx }
    }

    /// Advance one tick with the transmitter wired to the receiver
    ///
    /// `inputs.line_in` is ignored.
    pub fn loopback_tick(&mut self, inputs: UartInputs) -> UartOutputs {
        let tick = self.clock.advance();
        let tx = self.tx.tick(inputs.tx_enabled, inputs.load, inputs.data);
        let rx = self.rx.tick(inputs.rx_enabled, tx.line_out);
        UartOutputs { tick, rx, tx }
    }

    /// Line level the transmitter drives on the next tick
    pub fn line_out(&self) -> bool {
        self.tx.line_level()
    }

    /// Receiver half
    pub fn rx(&self) -> &Receiver {
        &self.rx
    }

    /// Transmitter half
    pub fn tx(&self) -> &Transmitter {
        &self.tx
    }

    /// Receiver frame counters
    pub fn rx_stats(&self) -> RxStats {
        self.rx.stats()
    }

    /// Ticks issued since construction or the last reset
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Tick source shared by both halves
    pub fn clock(&self) -> &TickSource {
        &self.clock
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Derived bit timing
    pub fn timing(&self) -> BitTiming {
        self.rx.timing()
    }

    /// Reset both halves and restart the time line
    pub fn reset(&mut self) {
        self.clock.reset();
        self.rx.reset();
        self.tx.reset();
    }
}
