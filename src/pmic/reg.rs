/******************************************************************************
 * Refer to the Silergy SY7636A datasheet for more information.               *
 * ========================================================================== *
 *                       SY7636A - Registers & Memory Map                     *
*******************************************************************************/

use bitfield_struct::bitfield;

pub(crate) const I2C_ADDR: u8 = 0x62;

#[allow(dead_code)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  OperationModeControl = 0x00,
  VcomAdjustL = 0x01,
  VcomAdjustH = 0x02,
  VldoVoltageAdjust = 0x03,
  PowerOnDelayTime = 0x06,
  FaultFlag = 0x07,
  ThermistorReadout = 0x08,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// Operation mode control register (0x00).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct OperationMode {
  #[bits(6)]
  __: u8,
  /// VCOM adjust registers take effect instead of the external resistor.
  pub vcom_manual: bool,
  /// Master on/off for the output rails.
  pub rail_on: bool,
}

/// Nine-bit VCOM field mask, split low 8 bits / high 1 bit across the two
/// adjust registers.
pub(crate) const VCOM_ADJUST_MASK: u16 = 0x01FF;

/// Power-good is bit 0 of the fault flag register; the fault code occupies
/// the bits above it.
pub(crate) const FAULT_FLAG_PG: u8 = 0x01;
