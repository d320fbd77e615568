use super::reg::QUERY_LEN;

/// Capability limits reported by the digitizer's query feature report.
///
/// Built once during [`WacomI2c::initialize`](super::WacomI2c::initialize)
/// and consumed by the platform to register input axes. Tilt ranges are
/// symmetric: the reported axis spans `-tilt_x_max..=tilt_x_max` (same for
/// Y); only the magnitude is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Features {
  pub x_max: u16,
  pub y_max: u16,
  pub pressure_max: u16,
  /// Opaque firmware version word.
  pub fw_version: u16,
  pub distance_max: u8,
  pub distance_physical_max: u8,
  pub tilt_x_max: u16,
  pub tilt_y_max: u16,
}

impl Features {
  /// Decode the 21-byte query response. All multi-byte fields are
  /// little-endian at fixed offsets.
  pub(crate) fn parse(raw: &[u8; QUERY_LEN]) -> Self {
    Self {
      x_max: le16(raw, 3),
      y_max: le16(raw, 5),
      pressure_max: le16(raw, 11),
      fw_version: le16(raw, 13),
      distance_max: raw[15],
      distance_physical_max: raw[16],
      tilt_x_max: le16(raw, 17),
      tilt_y_max: le16(raw, 19),
    }
  }
}

fn le16(raw: &[u8], at: usize) -> u16 {
  u16::from_le_bytes([raw[at], raw[at + 1]])
}

#[cfg(test)]
mod tests {
  use super::*;

  // Inverse of `parse`, for round-trip checks only.
  fn encode(f: &Features) -> [u8; QUERY_LEN] {
    let mut raw = [0u8; QUERY_LEN];
    raw[3..5].copy_from_slice(&f.x_max.to_le_bytes());
    raw[5..7].copy_from_slice(&f.y_max.to_le_bytes());
    raw[11..13].copy_from_slice(&f.pressure_max.to_le_bytes());
    raw[13..15].copy_from_slice(&f.fw_version.to_le_bytes());
    raw[15] = f.distance_max;
    raw[16] = f.distance_physical_max;
    raw[17..19].copy_from_slice(&f.tilt_x_max.to_le_bytes());
    raw[19..21].copy_from_slice(&f.tilt_y_max.to_le_bytes());
    raw
  }

  #[test]
  fn parse_roundtrip() {
    let features = Features {
      x_max: 20966,
      y_max: 15725,
      pressure_max: 4095,
      fw_version: 0x0150,
      distance_max: 63,
      distance_physical_max: 26,
      tilt_x_max: 9000,
      tilt_y_max: 9000,
    };
    assert_eq!(Features::parse(&encode(&features)), features);
  }

  #[test]
  fn parse_x_max_little_endian() {
    let mut raw = [0u8; QUERY_LEN];
    raw[3] = 0x00;
    raw[4] = 0x0A;
    raw[5] = 0x08;
    raw[6] = 0x58;
    assert_eq!(Features::parse(&raw).x_max, 2560);
  }

  #[test]
  fn distance_fields_are_single_bytes() {
    let mut raw = [0u8; QUERY_LEN];
    raw[15] = 0xFF;
    raw[16] = 0x1A;
    let f = Features::parse(&raw);
    assert_eq!(f.distance_max, 255);
    assert_eq!(f.distance_physical_max, 26);
  }
}
