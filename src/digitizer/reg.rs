/******************************************************************************
 * Wacom EMR over I²C — command set and report geometry.                      *
 * The digitizer speaks the HID-over-I²C style protocol: 16-bit command and   *
 * data registers, feature reports addressed by (report type | report id).   *
*******************************************************************************/

pub(crate) const I2C_ADDR: u8 = 0x09;

// Command/data register pair, transmitted LSB first.
pub(crate) const COMMAND_LSB: u8 = 0x04;
pub(crate) const COMMAND_MSB: u8 = 0x00;
pub(crate) const DATA_LSB: u8 = 0x05;
pub(crate) const DATA_MSB: u8 = 0x00;

// Report types
pub(crate) const REPORT_FEATURE: u8 = 0x30;

// Requests / operations
pub(crate) const OPCODE_GET_REPORT: u8 = 0x02;
pub(crate) const OPCODE_SET_POWER: u8 = 0x08;

// Report ids
pub(crate) const QUERY_REPORT: u8 = 3;

/// Size of a pen report delivered on each interrupt.
pub(crate) const REPORT_LEN: usize = 22;
/// Size of the capability query response (one byte less than a report).
pub(crate) const QUERY_LEN: usize = REPORT_LEN - 1;

/// Command frame requesting the feature report with the capability limits
/// (report id 3), to be followed by a read of [`QUERY_LEN`] bytes within the
/// same bus transaction.
pub(crate) const fn query_command() -> [u8; 6] {
  [COMMAND_LSB, COMMAND_MSB, REPORT_FEATURE | QUERY_REPORT, OPCODE_GET_REPORT, DATA_LSB, DATA_MSB]
}

/// Power states selectable through the SET_POWER command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PowerState {
  On = 0x00,
  Sleep = 0x01,
}

pub(crate) const fn set_power_command(state: PowerState) -> [u8; 4] {
  [COMMAND_LSB, COMMAND_MSB, state as u8, OPCODE_SET_POWER]
}
