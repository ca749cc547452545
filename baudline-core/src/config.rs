//! Line configuration
//!
//! The engine is configured once, at construction, from the tick rate of the
//! time base and the requested baud rate. Everything else is derived:
//!
//! - `divisor = tick_rate / baud_rate` ticks per bit
//! - `mid_point = divisor / 2`, the counter value at which the bit timer
//!   pulses (floor-biased toward the start of the bit for odd divisors)
//!
//! Configuration can be stored as postcard binary data when the `serde`
//! feature is enabled.

use baudline_hal::uart::{UartConfig, FRAME_BITS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest divisor that still has a mid-point distinct from the bit edge
pub const MIN_DIVISOR: u32 = 2;

/// Default time base: 16 ticks per bit at 115200 baud
pub const DEFAULT_TICK_RATE: u32 = 1_843_200;

/// Default baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default tolerated baud error (2%)
///
/// Two ends that are each off by 2% in opposite directions still land every
/// sample inside the bit over a 10-bit frame.
pub const DEFAULT_MAX_BAUD_ERROR_PPM: u32 = 20_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick rate or baud rate is zero
    ZeroRate,
    /// Fewer than [`MIN_DIVISOR`] ticks per bit
    DivisorTooSmall { divisor: u32 },
    /// Integer divisor leaves the achieved baud rate too far from the request
    BaudMismatch { error_ppm: u32 },
    /// Stored configuration could not be encoded or decoded
    Encoding,
}

/// Line configuration as supplied by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineConfig {
    /// Rate of the tick source in Hz
    pub tick_rate: u32,
    /// Requested baud rate in bits per second
    pub baud_rate: u32,
    /// Largest accepted deviation of the achieved baud rate (parts per million)
    pub max_baud_error_ppm: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            baud_rate: DEFAULT_BAUD_RATE,
            max_baud_error_ppm: DEFAULT_MAX_BAUD_ERROR_PPM,
        }
    }
}

impl LineConfig {
    /// Create a configuration with the default baud tolerance
    pub const fn new(tick_rate: u32, baud_rate: u32) -> Self {
        Self {
            tick_rate,
            baud_rate,
            max_baud_error_ppm: DEFAULT_MAX_BAUD_ERROR_PPM,
        }
    }

    /// Create a configuration from a HAL UART config and a tick rate
    pub const fn from_uart(tick_rate: u32, uart: &UartConfig) -> Self {
        Self::new(tick_rate, uart.baudrate)
    }

    /// Set the tolerated baud error
    pub const fn with_max_baud_error_ppm(mut self, ppm: u32) -> Self {
        self.max_baud_error_ppm = ppm;
        self
    }

    /// Validate the configuration and derive the bit timing
    pub fn timing(&self) -> Result<BitTiming, ConfigError> {
        if self.tick_rate == 0 || self.baud_rate == 0 {
            return Err(ConfigError::ZeroRate);
        }

        let timing = BitTiming::from_divisor(self.tick_rate / self.baud_rate)?;

        let error_ppm = self.baud_error_ppm(&timing);
        if error_ppm > self.max_baud_error_ppm {
            return Err(ConfigError::BaudMismatch { error_ppm });
        }

        Ok(timing)
    }

    /// Baud rate actually produced by the integer divisor
    pub fn achieved_baud(&self, timing: &BitTiming) -> u32 {
        self.tick_rate / timing.divisor
    }

    /// Deviation of the achieved baud rate from the requested one (ppm)
    pub fn baud_error_ppm(&self, timing: &BitTiming) -> u32 {
        let achieved = self.achieved_baud(timing) as u64;
        let requested = self.baud_rate as u64;
        if requested == 0 {
            return u32::MAX;
        }
        let ppm = achieved.abs_diff(requested) * 1_000_000 / requested;
        ppm.min(u32::MAX as u64) as u32
    }

    /// Encode this configuration as postcard bytes
    ///
    /// Returns the number of bytes written.
    #[cfg(feature = "serde")]
    pub fn to_postcard(&self, buffer: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| ConfigError::Encoding)
    }

    /// Decode a configuration stored with [`LineConfig::to_postcard`]
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)
    }
}

/// Derived bit timing, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    divisor: u32,
    mid_point: u32,
}

impl BitTiming {
    /// Build timing directly from a divisor
    pub const fn from_divisor(divisor: u32) -> Result<Self, ConfigError> {
        if divisor < MIN_DIVISOR {
            return Err(ConfigError::DivisorTooSmall { divisor });
        }
        Ok(Self {
            divisor,
            mid_point: divisor / 2,
        })
    }

    /// Ticks per bit
    pub const fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Counter value at which the bit timer pulses
    pub const fn mid_point(&self) -> u32 {
        self.mid_point
    }

    /// Ticks per complete 10-bit frame
    pub const fn frame_ticks(&self) -> u64 {
        self.divisor as u64 * FRAME_BITS as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = LineConfig::default().timing().unwrap();
        assert_eq!(timing.divisor(), 16);
        assert_eq!(timing.mid_point(), 8);
        assert_eq!(timing.frame_ticks(), 160);
    }

    #[test]
    fn test_odd_divisor_mid_point_floors() {
        let timing = BitTiming::from_divisor(7).unwrap();
        assert_eq!(timing.mid_point(), 3);
    }

    #[test]
    fn test_zero_rates_rejected() {
        assert_eq!(LineConfig::new(0, 9600).timing(), Err(ConfigError::ZeroRate));
        assert_eq!(LineConfig::new(1_000_000, 0).timing(), Err(ConfigError::ZeroRate));
    }

    #[test]
    fn test_divisor_too_small() {
        assert_eq!(
            LineConfig::new(9600, 9600).timing(),
            Err(ConfigError::DivisorTooSmall { divisor: 1 })
        );
        assert_eq!(
            LineConfig::new(4800, 9600).timing(),
            Err(ConfigError::DivisorTooSmall { divisor: 0 })
        );
    }

    #[test]
    fn test_baud_mismatch() {
        // 1 MHz / 115200 = 8 ticks per bit, achieved 125000 baud (+8.5%)
        let config = LineConfig::new(1_000_000, 115_200);
        assert!(matches!(
            config.timing(),
            Err(ConfigError::BaudMismatch { error_ppm }) if error_ppm > 80_000
        ));

        // Same line accepted once the tolerance is widened
        let relaxed = config.with_max_baud_error_ppm(100_000);
        assert_eq!(relaxed.timing().unwrap().divisor(), 8);
    }

    #[test]
    fn test_exact_divisor_has_no_error() {
        let config = LineConfig::new(48_000_000, 1_000_000);
        let timing = config.timing().unwrap();
        assert_eq!(config.achieved_baud(&timing), 1_000_000);
        assert_eq!(config.baud_error_ppm(&timing), 0);
    }

    #[test]
    fn test_frame_ticks_for_largest_divisor() {
        let timing = LineConfig::new(u32::MAX, 1).timing().unwrap();
        assert_eq!(timing.divisor(), u32::MAX);
        assert_eq!(timing.frame_ticks(), u32::MAX as u64 * 10);
    }

    #[test]
    fn test_from_uart_config() {
        let config = LineConfig::from_uart(153_600, &UartConfig::new(9600));
        assert_eq!(config.timing().unwrap().divisor(), 16);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_storage() {
        let config = LineConfig::new(921_600, 57_600).with_max_baud_error_ppm(5_000);
        let mut buffer = [0u8; 32];
        let len = config.to_postcard(&mut buffer).unwrap();
        let decoded = LineConfig::from_postcard(&buffer[..len]).unwrap();
        assert_eq!(decoded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_buffer_too_small() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            LineConfig::default().to_postcard(&mut buffer),
            Err(ConfigError::Encoding)
        );
    }
}
