//! Shift storage
//!
//! The data registers the state machines drive. They hold no control logic.
//!
//! - [`RxShiftRegister`]: serial-to-parallel, 8 bits, LSB arrives first
//! - [`TxFrame`]: parallel-to-serial, the full 10-bit frame

/// Bits in a frame (start + 8 data + stop)
pub const FRAME_LEN: u8 = 10;

/// Index of the stop bit within a frame
pub const STOP_BIT_INDEX: u8 = FRAME_LEN - 1;

/// Data bits per frame
pub const DATA_BITS: u8 = 8;

/// Receive accumulator
///
/// Each captured bit enters at the top and moves down one place per shift,
/// so after eight shifts the first bit received is bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxShiftRegister {
    value: u8,
}

impl RxShiftRegister {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Shift in one line sample
    pub fn shift_in(&mut self, bit: bool) {
        self.value = (self.value >> 1) | ((bit as u8) << 7);
    }

    /// Current contents
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Clear to zero
    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Transmit frame register
///
/// Bit 0 is the start bit, bits 1..=8 the data LSB first, bit 9 the stop
/// bit. The reset value is all ones so an unloaded register reads as an idle
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxFrame {
    bits: u16,
}

impl Default for TxFrame {
    fn default() -> Self {
        Self::IDLE
    }
}

impl TxFrame {
    /// All-ones idle pattern
    pub const IDLE: Self = Self {
        bits: (1 << FRAME_LEN) - 1,
    };

    /// Build the frame for `byte`
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            bits: ((byte as u16) << 1) | (1 << STOP_BIT_INDEX),
        }
    }

    /// Replace the contents with the frame for `byte`
    pub fn load(&mut self, byte: u8) {
        *self = Self::from_byte(byte);
    }

    /// Line level for bit `index` (indices past the stop bit read idle)
    pub const fn bit(&self, index: u8) -> bool {
        if index >= FRAME_LEN {
            return true;
        }
        (self.bits >> index) & 1 == 1
    }

    /// Data byte carried in bits 1..=8
    pub const fn data(&self) -> u8 {
        (self.bits >> 1) as u8
    }

    /// Raw 10-bit frame
    pub const fn bits(&self) -> u16 {
        self.bits
    }

    /// Return to the idle pattern
    pub fn reset(&mut self) {
        *self = Self::IDLE;
    }
}
