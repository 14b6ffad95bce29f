//! Scripted fakes for driver tests
//!
//! The SPI mock plays a byte queue: every exchange records the written
//! byte and pops the next scripted read byte (zero once the script runs
//! dry). Request phases are padded with filler so scripted responses line
//! up with the exchanges the engine actually performs.

use core::cell::RefCell;

use artouch_hal::{CountdownTimer, InputPin, OutputPin, SpiBus};
use artouch_protocol::{status, HEADER};
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

pub struct MockSpi {
    written: Vec<u8, 1024>,
    incoming: Deque<u8, 1024>,
}

impl MockSpi {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            incoming: Deque::new(),
        }
    }

    /// Wire bytes of a successful response frame
    pub fn ok_response(opcode: u8, payload: &[u8]) -> Vec<u8, 40> {
        let mut bytes = Vec::new();
        bytes.push(HEADER).unwrap();
        bytes.push((payload.len() + 2) as u8).unwrap();
        bytes.push(status::OK).unwrap();
        bytes.push(opcode).unwrap();
        bytes.extend_from_slice(payload).unwrap();
        bytes
    }

    /// Wire bytes of an error response
    ///
    /// Only header, length and status: the engine stops clocking at the
    /// offending status byte, so the echoed opcode never hits the bus.
    pub fn error_response(_opcode: u8, status: u8) -> Vec<u8, 40> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[HEADER, 2, status]).unwrap();
        bytes
    }

    /// Queue one command exchange: filler for the request bytes, then the
    /// response the chip clocks back
    pub fn expect_command(&mut self, request_payload_len: usize, response: &[u8]) {
        for _ in 0..3 + request_payload_len {
            self.incoming.push_back(0).unwrap();
        }
        self.expect_response(response);
    }

    /// Queue raw response bytes (unsolicited frames, broken frames)
    pub fn expect_response(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.incoming.push_back(byte).unwrap();
        }
    }

    /// Queue one 5-byte touch packet
    pub fn expect_packet(&mut self, packet: &[u8; 5]) {
        self.expect_response(packet);
    }

    /// Everything the driver clocked out, in order
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Check that every scripted byte was consumed
    pub fn incoming_drained(&self) -> bool {
        self.incoming.is_empty()
    }
}

impl SpiBus for MockSpi {
    fn exchange(&mut self, write: u8) -> u8 {
        self.written.push(write).unwrap();
        self.incoming.pop_front().unwrap_or(0)
    }
}

/// Chip-select stand-in; starts released (high)
pub struct MockPin {
    high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { high: true }
    }

    pub fn is_released(&self) -> bool {
        self.high
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// SIQ stand-in with a scripted level sequence
///
/// Each `is_high` poll consumes one scripted level; once the script is
/// exhausted the line sits at the default level.
pub struct MockSiq {
    levels: RefCell<Deque<bool, 64>>,
    default: bool,
}

impl MockSiq {
    /// Line permanently active: every command reply is ready at once
    pub fn always_ready() -> Self {
        Self {
            levels: RefCell::new(Deque::new()),
            default: true,
        }
    }

    /// Line idle unless scripted
    pub fn never_ready() -> Self {
        Self {
            levels: RefCell::new(Deque::new()),
            default: false,
        }
    }

    pub fn push_levels(&mut self, levels: &[bool]) {
        let mut queue = self.levels.borrow_mut();
        for &level in levels {
            queue.push_back(level).unwrap();
        }
    }
}

impl InputPin for MockSiq {
    fn is_high(&self) -> bool {
        self.levels.borrow_mut().pop_front().unwrap_or(self.default)
    }
}

pub struct MockTimer {
    expired: bool,
    last_armed: Option<u32>,
}

impl MockTimer {
    /// Timer that never fires (the SIQ script drives the test)
    pub fn new() -> Self {
        Self {
            expired: false,
            last_armed: None,
        }
    }

    /// Timer that fires immediately, for timeout paths
    pub fn expired() -> Self {
        Self {
            expired: true,
            last_armed: None,
        }
    }

    pub fn last_armed(&self) -> Option<u32> {
        self.last_armed
    }
}

impl CountdownTimer for MockTimer {
    fn arm(&mut self, duration_ms: u32) {
        self.last_armed = Some(duration_ms);
    }

    fn is_expired(&self) -> bool {
        self.expired
    }
}

/// Delay provider that only counts
pub struct MockDelay {
    calls: usize,
    total_us: u32,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_us: 0,
        }
    }

    pub fn delay_calls(&self) -> usize {
        self.calls
    }

    pub fn total_us(&self) -> u32 {
        self.total_us
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_us += ns / 1000;
    }
}
