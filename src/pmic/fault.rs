//! Fault flag register decoding.

use crate::Error;

use super::reg::FAULT_FLAG_PG;

/// Fault/state code reported by the chip, bits 1.. of the fault flag
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FaultState {
  NoFault = 0,
  UvpVp = 1,
  UvpVn = 2,
  UvpVpos = 3,
  UvpVneg = 4,
  UvpVddh = 5,
  UvpVee = 6,
  ScpVp = 7,
  ScpVn = 8,
  ScpVpos = 9,
  ScpVneg = 10,
  ScpVddh = 11,
  ScpVee = 12,
  ScpVcom = 13,
  Uvlo = 14,
  ThermalShutdown = 15,
}

impl FaultState {
  /// Human-readable description, matching the chip documentation.
  pub const fn as_str(self) -> &'static str {
    match self {
      FaultState::NoFault => "no fault event",
      FaultState::UvpVp => "UVP at VP rail",
      FaultState::UvpVn => "UVP at VN rail",
      FaultState::UvpVpos => "UVP at VPOS rail",
      FaultState::UvpVneg => "UVP at VNEG rail",
      FaultState::UvpVddh => "UVP at VDDH rail",
      FaultState::UvpVee => "UVP at VEE rail",
      FaultState::ScpVp => "SCP at VP rail",
      FaultState::ScpVn => "SCP at VN rail",
      FaultState::ScpVpos => "SCP at VPOS rail",
      FaultState::ScpVneg => "SCP at VNEG rail",
      FaultState::ScpVddh => "SCP at VDDH rail",
      FaultState::ScpVee => "SCP at VEE rail",
      FaultState::ScpVcom => "SCP at V COM rail",
      FaultState::Uvlo => "UVLO",
      FaultState::ThermalShutdown => "Thermal shutdown",
    }
  }

  const fn from_index(idx: u8) -> Option<Self> {
    Some(match idx {
      0 => FaultState::NoFault,
      1 => FaultState::UvpVp,
      2 => FaultState::UvpVn,
      3 => FaultState::UvpVpos,
      4 => FaultState::UvpVneg,
      5 => FaultState::UvpVddh,
      6 => FaultState::UvpVee,
      7 => FaultState::ScpVp,
      8 => FaultState::ScpVn,
      9 => FaultState::ScpVpos,
      10 => FaultState::ScpVneg,
      11 => FaultState::ScpVddh,
      12 => FaultState::ScpVee,
      13 => FaultState::ScpVcom,
      14 => FaultState::Uvlo,
      15 => FaultState::ThermalShutdown,
      _ => return None,
    })
  }
}

/// Decoded fault flag register: state code plus the live power-good bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fault {
  pub state: FaultState,
  pub power_good: bool,
}

impl Fault {
  /// Decode a raw fault flag register value. Power-good is bit 0, the state
  /// code sits above it. An undocumented code is an error, never a panic.
  pub(crate) fn from_register<E>(raw: u8) -> Result<Self, Error<E>> {
    let idx = raw >> 1;
    let state = FaultState::from_index(idx).ok_or(Error::UnknownFault(idx))?;
    Ok(Self { state, power_good: raw & FAULT_FLAG_PG != 0 })
  }

  /// "ON"/"OFF" presentation of the power-good bit.
  pub const fn power_good_label(&self) -> &'static str {
    if self.power_good {
      "ON"
    } else {
      "OFF"
    }
  }
}
