//! VCOM adjust codec.
//!
//! The programmed magnitude is a 9-bit field in 10 mV steps, split across
//! the two adjust registers: low 8 bits in one, the ninth bit in bit 0 of
//! the next. The panel bias itself is negative; only the magnitude is
//! stored, and sign handling is left to the user-facing accessors.

use super::reg::VCOM_ADJUST_MASK;

/// Largest programmable magnitude in millivolts.
pub const VCOM_MAX_MV: u16 = 5000;

/// Decode the two adjust registers into a millivolt magnitude.
pub(crate) const fn decode_mv(low: u8, high: u8) -> u16 {
  ((low as u16 | (high as u16) << 8) & VCOM_ADJUST_MASK) * 10
}

/// Decode the two adjust registers into microvolts, the scale the regulator
/// framework consumes. Raw steps map directly: one step is 10 000 µV.
pub(crate) const fn decode_uv(low: u8, high: u8) -> u32 {
  ((low as u16 | (high as u16) << 8) & VCOM_ADJUST_MASK) as u32 * 10_000
}

/// Encode a millivolt magnitude into (low, high) register values.
///
/// Returns `None` outside `0..=5000` mV. Division truncates, so values that
/// are not multiples of 10 mV round toward zero.
pub(crate) const fn encode_mv(mv: u16) -> Option<(u8, u8)> {
  if mv > VCOM_MAX_MV {
    return None;
  }
  let raw = (mv / 10) & VCOM_ADJUST_MASK;
  Some((raw as u8, (raw >> 8) as u8))
}
