//! GPIO pin abstractions
//!
//! A serial line is a single digital signal: the receiver samples an input
//! pin once per tick and the transmitter drives an output pin once per tick.

/// Digital output pin
///
/// Drives the transmit line. Idle level is high.
pub trait OutputPin {
    /// Set the pin high (logic 1, line idle)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations must return an already-synchronized level; the engine
/// does no debouncing.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
