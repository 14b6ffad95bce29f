//! SPI bus abstraction
//!
//! The AR1021 protocol is strictly byte-at-a-time: every request and
//! response byte is a separate full-duplex exchange with a mandatory
//! inter-byte gap in between. The trait therefore exposes only a
//! single-byte exchange; the pacing between exchanges is the protocol
//! engine's contract, not the bus implementation's.

/// SPI bus master for the AR1021
///
/// Chip-select is *not* part of this trait - the driver sequences it
/// separately through [`crate::gpio::OutputPin`] because calibration mode
/// holds the line asserted across several exchanges.
pub trait SpiBus {
    /// Exchange a single byte (simultaneous write/read)
    ///
    /// Clocks `write` out on MOSI and returns the byte captured on MISO.
    fn exchange(&mut self, write: u8) -> u8;
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    fn exchange(&mut self, write: u8) -> u8 {
        T::exchange(self, write)
    }
}

/// SPI configuration the AR1021 expects
///
/// Guidance for implementors wiring up the peripheral: the chip runs SPI
/// mode 1 at up to 500 kHz.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 500_000, // AR1021 datasheet maximum
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnSecondTransition,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}
