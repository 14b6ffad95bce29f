//! Request encoding and byte-fed response parsing
//!
//! Request format:
//! - HEADER (1 byte): 0x55 synchronization byte
//! - LENGTH (1 byte): payload length + 1 (the opcode counts)
//! - OPCODE (1 byte): command identifier
//! - PAYLOAD (0..): command-specific data
//!
//! Response format:
//! - HEADER (1 byte): 0x55
//! - LENGTH (1 byte): payload length + 2 (status and opcode count)
//! - STATUS (1 byte): 0x00 on success, chip error code otherwise
//! - OPCODE (1 byte): echo of the request opcode
//! - PAYLOAD (0..): command-specific data
//!
//! The chip clocks response bytes out one at a time with a mandatory gap
//! in between, so the parser consumes one byte per call and fails fast:
//! a bad header byte is an error immediately, before anything else is
//! clocked off the bus.

use heapless::Vec;

use crate::command::status;

/// Frame synchronization byte, both directions
pub const HEADER: u8 = 0x55;

/// Maximum request payload the driver ever sends (register write: 4 bytes)
pub const MAX_COMMAND_PAYLOAD: usize = 8;

/// Maximum response payload the driver ever reads back
pub const MAX_RESPONSE_PAYLOAD: usize = 32;

/// Protocol-level errors
///
/// `Timeout` is produced by the engine's data-ready wait rather than the
/// parser; it lives here so callers see one taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Response did not start with the 0x55 header byte
    NoHeader,
    /// Response length byte below the status + opcode minimum
    InvalidLength,
    /// Echoed opcode does not match the request
    InvalidResponseOpcode,
    /// Response payload exceeds the caller's buffer capacity
    ResponseTooLarge,
    /// Data-ready line never went active within the timeout
    Timeout,
    /// Chip returned a non-OK status code
    ChipStatus(u8),
}

impl ProtocolError {
    /// Check for the distinguished "calibration cancelled" chip status
    ///
    /// Callers should short-delay and resend the in-flight command once.
    pub fn is_calibration_cancelled(&self) -> bool {
        matches!(self, ProtocolError::ChipStatus(status::CANCEL_CALIBRATION))
    }
}

/// A request frame ready for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame<'a> {
    /// Command identifier
    pub opcode: u8,
    /// Command-specific data
    pub payload: &'a [u8],
}

impl<'a> CommandFrame<'a> {
    /// Create a request frame
    ///
    /// Payloads beyond [`MAX_COMMAND_PAYLOAD`] are a driver bug, not a
    /// runtime condition; the driver only ever sends fixed short frames.
    pub const fn new(opcode: u8, payload: &'a [u8]) -> Self {
        Self { opcode, payload }
    }

    /// Total number of bytes this frame occupies on the wire
    pub const fn encoded_len(&self) -> usize {
        3 + self.payload.len()
    }

    /// LENGTH byte value: the opcode counts toward it
    pub const fn length_byte(&self) -> u8 {
        self.payload.len() as u8 + 1
    }

    /// Encode into a byte buffer, returning the bytes written
    ///
    /// Returns `None` if the buffer cannot hold the frame.
    pub fn encode<'b>(&self, buffer: &'b mut [u8]) -> Option<&'b [u8]> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return None;
        }

        buffer[0] = HEADER;
        buffer[1] = self.length_byte();
        buffer[2] = self.opcode;
        buffer[3..len].copy_from_slice(self.payload);

        Some(&buffer[..len])
    }
}

/// A validated response frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Echoed command identifier
    pub opcode: u8,
    /// Response payload (`length - 2` bytes)
    pub payload: Vec<u8, MAX_RESPONSE_PAYLOAD>,
}

/// Byte-fed state machine for validating one response frame
///
/// Construct one parser per expected response. Each wire byte is fed in
/// order; the first rule violation is returned as an error and the frame
/// must be abandoned (the engine releases chip-select on any error, so a
/// broken frame never leaves the bus held).
#[derive(Debug, Clone)]
pub struct ResponseParser {
    state: ParseState,
    expected_opcode: u8,
    /// Caller's response buffer capacity; payloads beyond it are refused
    /// before any payload byte is clocked
    max_payload: usize,
    expected_payload: usize,
    payload: Vec<u8, MAX_RESPONSE_PAYLOAD>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the HEADER byte
    Header,
    /// Got HEADER, waiting for LENGTH
    Length,
    /// Got LENGTH, waiting for STATUS
    Status,
    /// Waiting for the echoed OPCODE
    Opcode,
    /// Reading payload bytes
    Payload,
}

impl ResponseParser {
    /// Create a parser for a response to `expected_opcode`
    ///
    /// `max_payload` is the caller's capacity for the response payload;
    /// it is clamped to [`MAX_RESPONSE_PAYLOAD`].
    pub fn new(expected_opcode: u8, max_payload: usize) -> Self {
        Self {
            state: ParseState::Header,
            expected_opcode,
            max_payload: max_payload.min(MAX_RESPONSE_PAYLOAD),
            expected_payload: 0,
            payload: Vec::new(),
        }
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(response))` when the frame is complete and valid,
    /// `Ok(None)` when more bytes are needed, or `Err` at the first
    /// offending byte. After an error the parser must be discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Response>, ProtocolError> {
        match self.state {
            ParseState::Header => {
                if byte != HEADER {
                    return Err(ProtocolError::NoHeader);
                }
                self.state = ParseState::Length;
                Ok(None)
            }
            ParseState::Length => {
                if byte < 2 {
                    return Err(ProtocolError::InvalidLength);
                }
                self.expected_payload = (byte - 2) as usize;
                self.state = ParseState::Status;
                Ok(None)
            }
            ParseState::Status => {
                if byte != status::OK {
                    return Err(ProtocolError::ChipStatus(byte));
                }
                self.state = ParseState::Opcode;
                Ok(None)
            }
            ParseState::Opcode => {
                if byte != self.expected_opcode {
                    return Err(ProtocolError::InvalidResponseOpcode);
                }
                // Refuse oversized payloads before clocking any of them
                if self.expected_payload > self.max_payload {
                    return Err(ProtocolError::ResponseTooLarge);
                }
                if self.expected_payload == 0 {
                    return Ok(Some(self.complete()));
                }
                self.state = ParseState::Payload;
                Ok(None)
            }
            ParseState::Payload => {
                // Cannot overflow: expected_payload was checked against
                // MAX_RESPONSE_PAYLOAD at the opcode step
                let _ = self.payload.push(byte);
                if self.payload.len() == self.expected_payload {
                    return Ok(Some(self.complete()));
                }
                Ok(None)
            }
        }
    }

    fn complete(&mut self) -> Response {
        self.state = ParseState::Header;
        Response {
            opcode: self.expected_opcode,
            payload: core::mem::take(&mut self.payload),
        }
    }
}
