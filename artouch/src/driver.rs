//! AR1021 driver
//!
//! Public surface of the crate: session lifecycle (`init`), the polled
//! touch interface (`process_packets`/`read`), the calibration handshake
//! and register access. All chip traffic goes through the framing engine;
//! retry policy lives here, never in the engine.

use artouch_hal::{CountdownTimer, InputPin, OutputPin, SpiBus};
use artouch_protocol::{cmd, reg, ProtocolError};
use embedded_hal::delay::DelayNs;

use crate::calibration::{self, CalibrationState, CALIBRATION_POINTS};
use crate::engine::{retry, Engine, DEFAULT_TIMEOUT_MS};
use crate::touch::{decode_packet, TouchCoordinate};

/// Whole-sequence attempts for `init`
const INIT_ATTEMPTS: u8 = 2;
/// Whole-sequence attempts for `calibrate_start`
const CALIBRATE_ATTEMPTS: u8 = 2;

/// Number of registers a diagnostic dump covers
pub const REGISTER_DUMP_LEN: usize = reg::DUMP_COUNT as usize;

/// Driver configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Calibration inset, percent of dimension * 2 (25 = 12.5% per side)
    pub inset: u8,
    /// SIQ wait after each command, milliseconds
    pub command_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inset: 25,
            command_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Diagnostic snapshot of the chip's register file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDump {
    /// Register map base offset the chip reported
    pub register_offset: u8,
    /// Firmware version bytes
    pub version: [u8; 3],
    /// Register values, logical index 0 upward
    pub registers: [u8; REGISTER_DUMP_LEN],
}

/// AR1021 touch controller driver
///
/// Owns its chip-select and SIQ lines exclusively for the session. The
/// chip keeps register and calibration data in EEPROM, so `init` after a
/// power cycle restores a previously calibrated panel without a new
/// calibration pass.
pub struct Ar1021<SPI, CS, SIQ, TMR, D> {
    engine: Engine<SPI, CS, SIQ, TMR, D>,
    config: Config,
    width: u16,
    height: u16,
    rotated: bool,
    register_offset: u8,
    initialized: bool,
    calibration: CalibrationState,
    /// Latest decoded sample
    current: TouchCoordinate,
    /// Last sample handed out by [`Self::read`]
    last_reported: TouchCoordinate,
}

impl<SPI, CS, SIQ, TMR, D> Ar1021<SPI, CS, SIQ, TMR, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    SIQ: InputPin,
    TMR: CountdownTimer,
    D: DelayNs,
{
    /// Create a driver with the default configuration
    pub fn new(spi: SPI, cs: CS, siq: SIQ, timer: TMR, delay: D) -> Self {
        Self::with_config(spi, cs, siq, timer, delay, Config::default())
    }

    /// Create a driver with an explicit configuration
    pub fn with_config(spi: SPI, cs: CS, siq: SIQ, timer: TMR, delay: D, config: Config) -> Self {
        Self {
            engine: Engine::new(spi, cs, siq, timer, delay, config.command_timeout_ms),
            config,
            width: 0,
            height: 0,
            rotated: false,
            register_offset: 0,
            initialized: false,
            calibration: CalibrationState::Idle,
            current: TouchCoordinate::default(),
            last_reported: TouchCoordinate::default(),
        }
    }

    /// Check whether `init` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current calibration session state
    pub fn calibration_state(&self) -> CalibrationState {
        self.calibration
    }

    /// Initialize the chip for `width` x `height` reporting
    ///
    /// Disables touch reporting, discovers the register map offset,
    /// programs the touch options/filter/threshold registers, persists
    /// them to EEPROM and re-enables reporting. The whole sequence is
    /// attempted at most twice; a failed attempt carries nothing into the
    /// retry. With `rotated` the panel is treated as mounted 90° to the
    /// display.
    pub fn init(&mut self, width: u16, height: u16, rotated: bool) -> bool {
        self.width = width;
        self.height = height;
        self.rotated = rotated;
        self.initialized = false;

        let ok = retry(INIT_ATTEMPTS, || self.init_attempt()).is_ok();
        self.initialized = ok;
        ok
    }

    fn init_attempt(&mut self) -> Result<(), ProtocolError> {
        // A pending calibration on the chip cancels when we talk to it;
        // that one status short-delays and resends this single command.
        match self.engine.command(cmd::DISABLE_TOUCH, &[], 0, false) {
            Ok(_) => {}
            Err(err) if err.is_calibration_cancelled() => {
                self.engine.pace();
                self.engine.command(cmd::DISABLE_TOUCH, &[], 0, false)?;
            }
            Err(err) => return Err(err),
        }
        self.engine.pace();

        self.register_offset = self.query_register_offset()?;

        // report calibrated coordinates, median sensitivity, pen threshold
        self.write_register(reg::TOUCH_OPTIONS, 0x00)?;
        self.write_register(reg::SENSITIVITY_FILTER, 0x04)?;
        self.write_register(reg::TOUCH_THRESHOLD, 0xC5)?;

        self.engine
            .command(cmd::REGISTER_WRITE_TO_EEPROM, &[], 0, false)?;
        self.engine.command(cmd::ENABLE_TOUCH, &[], 0, false)?;
        Ok(())
    }

    /// Drain pending touch packets while the SIQ line is active
    ///
    /// Call from the SIQ interrupt handler or a poll loop. Each valid
    /// packet overwrites the current sample; noise packets are discarded.
    pub fn process_packets(&mut self) {
        if !self.initialized {
            return;
        }
        while self.engine.data_ready() {
            let packet = self.engine.read_packet();
            if let Some(sample) = decode_packet(&packet, self.width, self.height, self.rotated) {
                self.current = sample;
            }
        }
    }

    /// Latest coordinate, only when it changed
    ///
    /// Returns `None` before `init` and whenever the current sample
    /// equals the last one returned, so callers see each event once.
    pub fn read(&mut self) -> Option<TouchCoordinate> {
        if !self.initialized || self.current == self.last_reported {
            return None;
        }
        self.last_reported = self.current;
        Some(self.current)
    }

    /// Start a calibration session
    ///
    /// Suspends touch reporting, programs the inset register and switches
    /// the chip into calibration mode with chip-select held asserted -
    /// the chip owns the line until the final acknowledgement. Attempted
    /// at most twice; failure releases the line and leaves the session
    /// idle.
    pub fn calibrate_start(&mut self) -> bool {
        if !self.initialized {
            return false;
        }

        let inset = self.config.inset;
        match retry(CALIBRATE_ATTEMPTS, || self.calibrate_attempt(inset)) {
            Ok(()) => {
                self.calibration = CalibrationState::Active(0);
                true
            }
            Err(_) => {
                self.calibration = CalibrationState::Idle;
                false
            }
        }
    }

    fn calibrate_attempt(&mut self, inset: u8) -> Result<(), ProtocolError> {
        self.engine.command(cmd::DISABLE_TOUCH, &[], 0, false)?;
        self.register_offset = self.query_register_offset()?;
        self.write_register(reg::CALIBRATION_INSET, inset)?;
        // four-point calibration; the line stays asserted across the
        // per-point acknowledgements that follow
        self.engine
            .command(cmd::CALIBRATE_MODE, &[CALIBRATION_POINTS], 0, true)?;
        Ok(())
    }

    /// Display position the user must touch next
    ///
    /// Pure function of the session state and configured geometry; `None`
    /// outside an active session.
    pub fn next_calibrate_point(&self) -> Option<(u16, u16)> {
        if !self.initialized {
            return None;
        }
        match self.calibration {
            CalibrationState::Active(point) => {
                calibration::target_point(point, self.config.inset, self.width, self.height)
            }
            _ => None,
        }
    }

    /// Block until the chip acknowledges the current calibration point
    ///
    /// Returns `Some(more_points)`; after the last point the chip sends
    /// one extra acknowledgement for the EEPROM commit, then touch
    /// reporting is re-enabled and the session ends. A zero timeout waits
    /// indefinitely. Any failure releases chip-select and the calibration
    /// must restart from [`Self::calibrate_start`].
    pub fn wait_for_calibrate_point(&mut self, timeout_ms: u32) -> Option<bool> {
        if !self.initialized {
            return None;
        }
        let CalibrationState::Active(point) = self.calibration else {
            return None;
        };

        match self.wait_point_ack(point, timeout_ms) {
            Ok(more_points) => Some(more_points),
            Err(_) => {
                self.calibration = CalibrationState::Failed;
                self.engine.unselect();
                None
            }
        }
    }

    fn wait_point_ack(&mut self, point: u8, timeout_ms: u32) -> Result<bool, ProtocolError> {
        self.engine.wait_unsolicited(cmd::CALIBRATE_MODE, timeout_ms)?;

        let next = point + 1;
        if next < CALIBRATION_POINTS {
            self.calibration = CalibrationState::Active(next);
            return Ok(true);
        }

        // all points done: the chip acknowledges once more when the
        // calibration data has been committed to EEPROM
        self.engine.wait_unsolicited(cmd::CALIBRATE_MODE, timeout_ms)?;
        self.engine.unselect();
        self.engine.command(cmd::ENABLE_TOUCH, &[], 0, false)?;
        self.calibration = CalibrationState::Idle;
        Ok(false)
    }

    /// Write a logical register (session offset applied)
    pub fn set_register(&mut self, register: u8, value: u8) -> bool {
        if !self.initialized {
            return false;
        }
        self.write_register(register, value).is_ok()
    }

    /// Read a logical register (session offset applied)
    pub fn read_register(&mut self, register: u8) -> Option<u8> {
        if !self.initialized {
            return None;
        }
        self.read_register_raw(register.wrapping_add(self.register_offset))
            .ok()
    }

    /// Firmware version bytes
    pub fn version(&mut self) -> Option<[u8; 3]> {
        if !self.initialized {
            return None;
        }
        self.version_inner().ok()
    }

    /// Diagnostic dump: offset, firmware version and the register file
    ///
    /// Re-queries the register offset, so it also refreshes the session
    /// value. Read-only with respect to driver state otherwise.
    pub fn register_dump(&mut self) -> Option<RegisterDump> {
        if !self.initialized {
            return None;
        }
        let dump = self.register_dump_inner().ok()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "AR1021 register offset {}, version {}, registers {}",
            dump.register_offset,
            dump.version,
            dump.registers
        );

        Some(dump)
    }

    fn register_dump_inner(&mut self) -> Result<RegisterDump, ProtocolError> {
        let offset = self.query_register_offset()?;
        self.register_offset = offset;

        let version = self.version_inner()?;

        let mut registers = [0u8; REGISTER_DUMP_LEN];
        for (index, slot) in registers.iter_mut().enumerate() {
            *slot = self.read_register_raw(offset.wrapping_add(index as u8))?;
        }

        Ok(RegisterDump {
            register_offset: offset,
            version,
            registers,
        })
    }

    fn query_register_offset(&mut self) -> Result<u8, ProtocolError> {
        let response = self
            .engine
            .command(cmd::REGISTER_START_ADDR_REQUEST, &[], 1, false)?;
        response
            .payload
            .first()
            .copied()
            .ok_or(ProtocolError::InvalidLength)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), ProtocolError> {
        // payload: address high, address low, count, value
        let address = register.wrapping_add(self.register_offset);
        self.engine
            .command(cmd::REGISTER_WRITE, &[0x00, address, 0x01, value], 0, false)
            .map(|_| ())
    }

    fn read_register_raw(&mut self, address: u8) -> Result<u8, ProtocolError> {
        let response = self
            .engine
            .command(cmd::REGISTER_READ, &[0x00, address, 0x01], 1, false)?;
        response
            .payload
            .first()
            .copied()
            .ok_or(ProtocolError::InvalidLength)
    }

    fn version_inner(&mut self) -> Result<[u8; 3], ProtocolError> {
        let response = self.engine.command(cmd::GET_VERSION, &[], 3, false)?;
        if response.payload.len() < 3 {
            return Err(ProtocolError::InvalidLength);
        }
        let mut version = [0u8; 3];
        version.copy_from_slice(&response.payload[..3]);
        Ok(version)
    }
}
