//! Touch packet decoding
//!
//! While a pen is on the panel the chip streams 5-byte packets
//! `[pen, xlo, xhi, ylo, yhi]` and holds SIQ active. The pen byte carries
//! the contact state in bits 7 and 0; axis values arrive as two 7-bit
//! halves forming a 14-bit raw value with 12-bit resolution, which the
//! decoder scales to the configured display dimensions.

/// Pen state bits: bit 7 (valid) and bit 0 (contact)
pub const PEN_MASK: u8 = (1 << 7) | (1 << 0);

/// Raw touch packet length on the wire
pub const PACKET_LEN: usize = 5;

/// A decoded, display-space touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCoordinate {
    /// Horizontal position in display pixels
    pub x: i16,
    /// Vertical position in display pixels
    pub y: i16,
    /// Pen contact state
    pub touched: bool,
}

/// Decode the pen byte
///
/// Bit 7 set with bit 0 set is pen down, bit 7 alone is pen up; anything
/// else is electrical noise and the sample must be discarded.
pub(crate) fn pen_state(pen: u8) -> Option<bool> {
    match pen & PEN_MASK {
        0x81 => Some(true),
        0x80 => Some(false),
        _ => None,
    }
}

/// Combine the 7-bit halves and scale to a display dimension
///
/// The chip reports 12-bit-resolution coordinates, hence the shift by 12
/// after multiplying by the target dimension.
pub(crate) fn scale_axis(lo: u8, hi: u8, dimension: u16) -> i16 {
    let raw = (u32::from(hi) << 7) | u32::from(lo);
    ((raw * u32::from(dimension)) >> 12) as i16
}

/// Decode one raw packet into display coordinates
///
/// With `rotated` the axes swap scaling targets (the panel is mounted 90°
/// to the display): raw x scales by height into `y`, raw y by width into
/// `x`. Returns `None` for noise samples.
pub(crate) fn decode_packet(
    packet: &[u8; PACKET_LEN],
    width: u16,
    height: u16,
    rotated: bool,
) -> Option<TouchCoordinate> {
    let touched = pen_state(packet[0])?;
    let (x, y) = if rotated {
        (
            scale_axis(packet[3], packet[4], width),
            scale_axis(packet[1], packet[2], height),
        )
    } else {
        (
            scale_axis(packet[1], packet[2], width),
            scale_axis(packet[3], packet[4], height),
        )
    };
    Some(TouchCoordinate { x, y, touched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Split a 14-bit raw value into its wire halves
    fn split(raw: u16) -> (u8, u8) {
        ((raw & 0x7F) as u8, (raw >> 7) as u8)
    }

    #[test]
    fn pen_byte_truth_table() {
        // bit7 + bit0 -> down
        assert_eq!(pen_state(0x81), Some(true));
        // other bits are ignored by the mask
        assert_eq!(pen_state(0xFF), Some(true));
        // bit7 alone -> up
        assert_eq!(pen_state(0x80), Some(false));
        assert_eq!(pen_state(0xFE), Some(false));
        // bit7 clear -> noise
        assert_eq!(pen_state(0x00), None);
        assert_eq!(pen_state(0x01), None);
        assert_eq!(pen_state(0x7F), None);
    }

    #[test]
    fn scaling_saturates_at_dimension() {
        // raw 4095 is full scale for the 12-bit reporting range
        let (lo, hi) = split(4095);
        assert_eq!(scale_axis(lo, hi, 320), 319);
        assert_eq!(scale_axis(lo, hi, 240), 239);
        assert_eq!(scale_axis(0, 0, 320), 0);
    }

    #[test]
    fn noise_packet_is_dropped() {
        let (lo, hi) = split(2048);
        assert_eq!(decode_packet(&[0x40, lo, hi, lo, hi], 320, 240, false), None);
    }

    #[test]
    fn rotation_swaps_axes() {
        let (xlo, xhi) = split(1024); // quarter scale
        let (ylo, yhi) = split(3072); // three quarter scale
        let packet = [0x81, xlo, xhi, ylo, yhi];

        let plain = decode_packet(&packet, 320, 320, false).unwrap();
        let rotated = decode_packet(&packet, 320, 320, true).unwrap();

        assert_eq!(plain.x, 80);
        assert_eq!(plain.y, 240);
        assert_eq!(rotated.x, plain.y);
        assert_eq!(rotated.y, plain.x);
        assert!(rotated.touched);
    }

    proptest! {
        #[test]
        fn scaling_is_monotonic(a in 0u16..4096, b in 0u16..4096) {
            prop_assume!(a <= b);
            let (alo, ahi) = split(a);
            let (blo, bhi) = split(b);
            prop_assert!(scale_axis(alo, ahi, 320) <= scale_axis(blo, bhi, 320));
        }

        #[test]
        fn scaled_value_stays_on_screen(raw in 0u16..4096) {
            let (lo, hi) = split(raw);
            let x = scale_axis(lo, hi, 320);
            prop_assert!((0..320).contains(&x));
        }
    }
}
