//! Framing engine
//!
//! Drives one command/response exchange at a time: asserts chip-select,
//! clocks the request out byte by byte with the chip-mandated 50 µs gap
//! after every byte, busy-polls the SIQ line for the reply (bounded by the
//! countdown timer), then clocks the response in through the byte-fed
//! parser with the same pacing.
//!
//! Chip-select discipline: the line is released at the end of every call
//! unless the caller asks for it to stay asserted (calibration-mode entry,
//! where the chip owns the line until its final acknowledgement). Every
//! error path releases the line, so a failed exchange never leaves the
//! bus held.

use artouch_hal::{CountdownTimer, InputPin, OutputPin, SpiBus};
use artouch_protocol::{CommandFrame, ProtocolError, Response, ResponseParser, HEADER};
use embedded_hal::delay::DelayNs;

/// Inter-byte gap required by the chip, datasheet constant
pub const INTER_BYTE_DELAY_US: u32 = 50;

/// Default wait for the SIQ line after a request
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Protocol engine: SPI channel, chip-select, SIQ line, timeout timer and
/// the delay provider for inter-byte pacing
pub(crate) struct Engine<SPI, CS, SIQ, TMR, D> {
    spi: SPI,
    cs: CS,
    siq: SIQ,
    timer: TMR,
    delay: D,
    timeout_ms: u32,
}

impl<SPI, CS, SIQ, TMR, D> Engine<SPI, CS, SIQ, TMR, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    SIQ: InputPin,
    TMR: CountdownTimer,
    D: DelayNs,
{
    pub fn new(spi: SPI, mut cs: CS, siq: SIQ, timer: TMR, delay: D, timeout_ms: u32) -> Self {
        // chip-select is active low; start released
        cs.set_high();
        Self {
            spi,
            cs,
            siq,
            timer,
            delay,
            timeout_ms,
        }
    }

    pub fn select(&mut self) {
        self.cs.set_low();
    }

    pub fn unselect(&mut self) {
        self.cs.set_high();
    }

    /// Check the SIQ data-ready line
    pub fn data_ready(&self) -> bool {
        self.siq.is_high()
    }

    /// One inter-byte (or inter-command) gap
    pub fn pace(&mut self) {
        self.delay.delay_us(INTER_BYTE_DELAY_US);
    }

    fn exchange_paced(&mut self, byte: u8) -> u8 {
        let read = self.spi.exchange(byte);
        self.pace();
        read
    }

    /// Issue one command and read its reply
    ///
    /// `capacity` is the caller's limit for the response payload; replies
    /// announcing more are refused with `ResponseTooLarge` before any
    /// payload byte is clocked. With `keep_selected` the chip-select line
    /// stays asserted after a *successful* exchange; errors always release
    /// it.
    pub fn command(
        &mut self,
        opcode: u8,
        payload: &[u8],
        capacity: usize,
        keep_selected: bool,
    ) -> Result<Response, ProtocolError> {
        self.select();
        let result = self.transact(opcode, payload, capacity);
        if result.is_err() || !keep_selected {
            self.unselect();
        }
        result
    }

    fn transact(
        &mut self,
        opcode: u8,
        payload: &[u8],
        capacity: usize,
    ) -> Result<Response, ProtocolError> {
        let frame = CommandFrame::new(opcode, payload);
        self.exchange_paced(HEADER);
        self.exchange_paced(frame.length_byte());
        self.exchange_paced(frame.opcode);
        for &byte in frame.payload {
            self.exchange_paced(byte);
        }

        // SIQ goes active when the reply is ready
        self.wait_for_data_ready(self.timeout_ms)?;
        self.read_response(opcode, capacity)
    }

    /// Wait for a response the chip pushes on its own
    ///
    /// Used for the calibration point acknowledgements: framing and
    /// validation are identical to [`Self::command`] minus the request.
    /// A zero timeout waits indefinitely. The line is force-released on
    /// any error; on success it is left untouched (calibration holds it).
    pub fn wait_unsolicited(
        &mut self,
        expected_opcode: u8,
        timeout_ms: u32,
    ) -> Result<Response, ProtocolError> {
        let result = self
            .wait_for_data_ready(timeout_ms)
            .and_then(|()| self.read_response(expected_opcode, 0));
        if result.is_err() {
            self.unselect();
        }
        result
    }

    fn wait_for_data_ready(&mut self, timeout_ms: u32) -> Result<(), ProtocolError> {
        if timeout_ms == 0 {
            while self.siq.is_low() {}
            return Ok(());
        }

        self.timer.arm(timeout_ms);
        while self.siq.is_low() {
            if self.timer.is_expired() {
                return Err(ProtocolError::Timeout);
            }
        }
        Ok(())
    }

    fn read_response(&mut self, opcode: u8, capacity: usize) -> Result<Response, ProtocolError> {
        let mut parser = ResponseParser::new(opcode, capacity);
        loop {
            let byte = self.exchange_paced(0);
            if let Some(response) = parser.feed(byte)? {
                // the trailing gap before the next command is already in
                // place: exchange_paced delays after every byte
                return Ok(response);
            }
        }
    }

    /// Read one raw 5-byte touch packet
    ///
    /// The caller has checked [`Self::data_ready`]; this owns chip-select
    /// for exactly one packet.
    pub fn read_packet(&mut self) -> [u8; crate::touch::PACKET_LEN] {
        self.select();
        self.pace();
        let mut packet = [0u8; crate::touch::PACKET_LEN];
        for byte in &mut packet {
            *byte = self.exchange_paced(0);
        }
        self.unselect();
        packet
    }
}

/// Attempt `operation` up to `attempts` times, short-circuiting on the
/// first success
///
/// Callers own retry policy; the engine itself never retries. `attempts`
/// of zero behaves as one.
pub(crate) fn retry<T, E>(
    attempts: u8,
    mut operation: impl FnMut() -> Result<T, E>,
) -> Result<T, E> {
    let mut result = operation();
    for _ in 1..attempts {
        if result.is_ok() {
            break;
        }
        result = operation();
    }
    result
}
