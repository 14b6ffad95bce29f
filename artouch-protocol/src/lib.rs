//! AR1021 SPI command/response wire protocol
//!
//! The AR1021 talks a fixed-format, byte-oriented protocol over SPI with a
//! mandatory inter-byte gap. This crate defines the vocabulary (command,
//! register and status codes) and the framing:
//!
//! ```text
//! Request:   ┌──────┬─────────────┬─────────┬──────────┐
//!            │ 0x55 │ payload + 1 │ opcode  │ payload  │
//!            └──────┴─────────────┴─────────┴──────────┘
//! Response:  ┌──────┬─────────────┬────────┬────────┬──────────┐
//!            │ 0x55 │ payload + 2 │ status │ opcode │ payload  │
//!            └──────┴─────────────┴────────┴────────┴──────────┘
//! ```
//!
//! Responses are validated byte by byte so the protocol engine can abort
//! at the first bad byte without clocking the rest of the frame.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;

pub use command::{cmd, reg, status};
pub use frame::{
    CommandFrame, ProtocolError, Response, ResponseParser, HEADER, MAX_COMMAND_PAYLOAD,
    MAX_RESPONSE_PAYLOAD,
};
