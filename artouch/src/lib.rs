//! AR1021 resistive touch controller driver
//!
//! The Microchip AR1021 is a resistive touch screen controller reachable
//! over a half-duplex, byte-oriented SPI command/response link. It
//! performs the geometric calibration internally and stores the transform
//! in on-board EEPROM, so a successfully calibrated panel needs no
//! re-calibration across power cycles - the driver's job is sequencing
//! the protocol:
//!
//! - the framing engine turns a logical command into paced SPI byte
//!   exchanges and validates the reply ([`engine`])
//! - the calibration sequencer steps the chip through its four-point
//!   calibration handshake ([`calibration`])
//! - the touch decoder turns raw 5-byte packets into de-duplicated,
//!   optionally rotated coordinate events ([`touch`])
//!
//! The driver assumes exclusive ownership of one chip-select line and the
//! SIQ data-ready line for the lifetime of the session. The board wires
//! those in through the `artouch-hal` traits.

#![no_std]
#![deny(unsafe_code)]

pub mod calibration;
pub mod driver;
pub mod engine;
pub mod touch;

#[cfg(test)]
pub(crate) mod mock;

pub use calibration::CalibrationState;
pub use driver::{Ar1021, Config, RegisterDump};
pub use touch::TouchCoordinate;

// Re-export the wire protocol so boards only name one crate
pub use artouch_protocol::{cmd, reg, status, ProtocolError};
