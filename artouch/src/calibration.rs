//! Calibration sequencing
//!
//! The chip performs the geometric calibration internally: the driver
//! only steps it through four fixed target points and the final EEPROM
//! commit. This module holds the session state and the target point
//! arithmetic; the handshake itself lives in [`crate::driver`].

/// Number of calibration target points
pub const CALIBRATION_POINTS: u8 = 4;

/// Calibration session state
///
/// `Active` carries the index of the point currently awaiting its
/// acknowledgement. Any failure mid-handshake lands in `Failed` and the
/// whole calibration must restart from `calibrate_start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationState {
    /// No session in progress
    #[default]
    Idle,
    /// Session running, waiting for point 0..=3
    Active(u8),
    /// Session aborted; restart required
    Failed,
}

impl CalibrationState {
    /// Check whether a session is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, CalibrationState::Active(_))
    }
}

/// Display position of one calibration target
///
/// Corner order is fixed: top-left, top-right, bottom-right, bottom-left.
/// `inset` is percent-of-dimension times two (the default 25 maps to a
/// 12.5% margin per axis), and that margin is split evenly between the
/// two sides.
pub fn target_point(index: u8, inset: u8, width: u16, height: u16) -> Option<(u16, u16)> {
    let x_inset = (u32::from(width) * u32::from(inset) / 200 / 2) as u16;
    let y_inset = (u32::from(height) * u32::from(inset) / 200 / 2) as u16;

    match index {
        0 => Some((x_inset, y_inset)),
        1 => Some((width - x_inset, y_inset)),
        2 => Some((width - x_inset, height - y_inset)),
        3 => Some((x_inset, height - y_inset)),
        _ => None,
    }
}
