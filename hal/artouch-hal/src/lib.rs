//! Artouch Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the AR1021 driver needs
//! from the board. The driver owns one chip-select line, one
//! interrupt-capable input line (SIQ) and one SPI channel for its whole
//! session; the board supplies implementations of these traits at
//! construction time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  artouch (driver, protocol engine)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  artouch-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Board support (pins, SPI peripheral,   │
//! │  free-running timer)                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - chip-select and SIQ lines
//! - [`spi::SpiBus`] - single-byte full-duplex exchange
//! - [`timer::CountdownTimer`] - timeout capability for busy-wait loops

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use spi::SpiBus;
pub use timer::CountdownTimer;
