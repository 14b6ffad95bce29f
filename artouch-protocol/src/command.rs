//! AR1021 command, register and status codes
//!
//! Values per the AR1021 datasheet. Register addresses are logical; the
//! chip maps them to a runtime-discovered base returned by
//! [`cmd::REGISTER_START_ADDR_REQUEST`], so every register access adds
//! that session offset.

/// Command opcodes
pub mod cmd {
    /// Firmware version request (3-byte reply)
    pub const GET_VERSION: u8 = 0x10;
    /// Resume touch reporting
    pub const ENABLE_TOUCH: u8 = 0x12;
    /// Suspend touch reporting (required before register access)
    pub const DISABLE_TOUCH: u8 = 0x13;
    /// Enter calibration mode; payload is the point count
    pub const CALIBRATE_MODE: u8 = 0x14;
    /// Read registers; payload: addr high, addr low, count
    pub const REGISTER_READ: u8 = 0x20;
    /// Write registers; payload: addr high, addr low, count, values
    pub const REGISTER_WRITE: u8 = 0x21;
    /// Query the register map base offset (1-byte reply)
    pub const REGISTER_START_ADDR_REQUEST: u8 = 0x22;
    /// Persist the current register file to EEPROM
    pub const REGISTER_WRITE_TO_EEPROM: u8 = 0x23;
    /// Read raw EEPROM
    pub const EEPROM_READ: u8 = 0x28;
    /// Write raw EEPROM
    pub const EEPROM_WRITE: u8 = 0x29;
    /// Reload the register file from EEPROM
    pub const EEPROM_WRITE_TO_REGISTERS: u8 = 0x2B;
}

/// Logical register addresses (add the session offset before use)
pub mod reg {
    /// Pen pressure threshold
    pub const TOUCH_THRESHOLD: u8 = 0x02;
    /// Sensitivity filter
    pub const SENSITIVITY_FILTER: u8 = 0x03;
    /// Sampling rate, fast phase
    pub const SAMPLING_FAST: u8 = 0x04;
    /// Sampling rate, slow phase
    pub const SAMPLING_SLOW: u8 = 0x05;
    /// Accuracy filter, fast phase
    pub const ACCURACY_FILTER_FAST: u8 = 0x06;
    /// Accuracy filter, slow phase
    pub const ACCURACY_FILTER_SLOW: u8 = 0x07;
    /// Pen speed threshold
    pub const SPEED_THRESHOLD: u8 = 0x08;
    /// Sleep mode delay
    pub const SLEEP_DELAY: u8 = 0x0A;
    /// Pen-up debounce delay
    pub const PEN_UP_DELAY: u8 = 0x0B;
    /// Touch reporting mode
    pub const TOUCH_MODE: u8 = 0x0C;
    /// Touch options (calibrated coordinate reporting)
    pub const TOUCH_OPTIONS: u8 = 0x0D;
    /// Calibration inset, percent of dimension * 2
    pub const CALIBRATION_INSET: u8 = 0x0E;
    /// Pen state report delay
    pub const PEN_STATE_REPORT_DELAY: u8 = 0x0F;
    /// Touch report delay
    pub const TOUCH_REPORT_DELAY: u8 = 0x11;

    /// Number of registers covered by a diagnostic dump
    pub const DUMP_COUNT: u8 = 0x12;
}

/// Response status codes
pub mod status {
    /// Command accepted
    pub const OK: u8 = 0x00;
    /// Unrecognized command
    pub const UNRECOGNIZED_COMMAND: u8 = 0x01;
    /// Unrecognized header
    pub const UNRECOGNIZED_HEADER: u8 = 0x03;
    /// Command timeout on the chip side
    pub const TIMEOUT: u8 = 0x04;
    /// Calibration mode was cancelled by the chip
    ///
    /// Distinguished: the caller should short-delay and resend the
    /// in-flight command once.
    pub const CANCEL_CALIBRATION: u8 = 0xFC;
}
