//! Line waveforms for unit tests

use crate::shift::{TxFrame, FRAME_LEN};

/// Line level at tick `t` for a 10-bit pattern whose start bit begins at
/// tick `start`, `divisor` ticks per bit. Idle high before and after.
pub fn frame_level(bits: u16, divisor: u32, start: u32, t: u32) -> bool {
    if t < start {
        return true;
    }
    let index = (t - start) / divisor;
    if index >= FRAME_LEN as u32 {
        return true;
    }
    (bits >> index) & 1 == 1
}

/// Well-formed frame for `byte`
pub fn byte_level(byte: u8, divisor: u32, start: u32, t: u32) -> bool {
    frame_level(TxFrame::from_byte(byte).bits(), divisor, start, t)
}
