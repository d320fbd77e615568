//! Silergy SY7636A power-management chip.
//!
//! The chip generates the e-paper panel's supply rails including the
//! negative VCOM bias, and reports rail health through a power-good GPIO
//! plus a fault flag register. The driver owns the I²C peripheral, the
//! power-good input and a delay provider, and exposes the rail sequencer,
//! the VCOM adjust codec and the fault surface.

mod fault;
mod rail;
mod reg;
mod vcom;

use embedded_hal::digital::{Error as _, InputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::Error;

pub use fault::{Fault, FaultState};
pub use rail::RailState;
pub use vcom::VCOM_MAX_MV;

use reg::{OperationMode, Reg};

/// Driver for the SY7636A.
///
/// Rail enable/disable calls are expected to be serialized by the caller;
/// the driver keeps no lock of its own.
pub struct Sy7636a<I, PG, D> {
  i2c: I,
  pgood: PG,
  delay: D,
  state: RailState,
}

impl<I, E, PG, D> Sy7636a<I, PG, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  PG: InputPin,
  D: DelayNs,
{
  /// Create a driver instance from the bus, the power-good input and a
  /// delay provider. No bus traffic happens until [`Sy7636a::init`].
  pub fn new(i2c: I, pgood: PG, delay: D) -> Self {
    Self { i2c, pgood, delay, state: RailState::Disabled }
  }

  /// One-time bring-up: clear the power-on delay so enable sequencing is
  /// governed by the power-good poll alone.
  pub async fn init(&mut self) -> Result<(), Error<E>> {
    self.write_reg(Reg::PowerOnDelayTime, 0x00).await
  }

  /// VCOM magnitude in millivolts as programmed into the adjust registers.
  pub async fn vcom_mv(&mut self) -> Result<u16, Error<E>> {
    let low = self.read_reg(Reg::VcomAdjustL).await?;
    let high = self.read_reg(Reg::VcomAdjustH).await?;
    Ok(vcom::decode_mv(low, high))
  }

  /// Signed user-facing VCOM reading. The bias is generated as a negative
  /// voltage, so this is the negated magnitude, always `<= 0`.
  pub async fn vcom(&mut self) -> Result<i16, Error<E>> {
    Ok(-(self.vcom_mv().await? as i16))
  }

  /// VCOM in microvolts, the scale a regulator framework consumes: raw
  /// 9-bit steps times 10 000, without the millivolt prescale.
  pub async fn vcom_uv(&mut self) -> Result<u32, Error<E>> {
    let low = self.read_reg(Reg::VcomAdjustL).await?;
    let high = self.read_reg(Reg::VcomAdjustH).await?;
    Ok(vcom::decode_uv(low, high))
  }

  /// Program a VCOM magnitude in millivolts, `0..=5000`.
  pub async fn set_vcom_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
    let (low, high) = vcom::encode_mv(mv).ok_or(Error::VcomOutOfRange(mv as i16))?;
    self.write_reg(Reg::VcomAdjustL, low).await?;
    self.write_reg(Reg::VcomAdjustH, high).await
  }

  /// Signed user-facing VCOM setter, accepting `-5000..=0` millivolts.
  /// Positive values are rejected before any register write.
  pub async fn set_vcom(&mut self, mv: i16) -> Result<(), Error<E>> {
    if mv > 0 || mv < -(VCOM_MAX_MV as i16) {
      return Err(Error::VcomOutOfRange(mv));
    }
    self.set_vcom_mv(mv.unsigned_abs()).await
  }

  /// Read and decode the fault flag register.
  pub async fn fault(&mut self) -> Result<Fault, Error<E>> {
    let raw = self.read_reg(Reg::FaultFlag).await?;
    Fault::from_register(raw)
  }

  /// Die temperature from the thermistor readout register, in °C.
  pub async fn temperature(&mut self) -> Result<i8, Error<E>> {
    let raw = self.read_reg(Reg::ThermistorReadout).await?;
    Ok(raw as i8)
  }

  /// Release the owned peripherals.
  pub fn free(self) -> (I, PG, D) {
    (self.i2c, self.pgood, self.delay)
  }

  // Register helpers

  pub(crate) async fn read_reg(&mut self, r: Reg) -> Result<u8, Error<E>> {
    let mut buf = [0u8; 1];
    self.i2c.write_read(reg::I2C_ADDR, &[r.into()], &mut buf).await.map_err(Error::I2c)?;
    Ok(buf[0])
  }

  pub(crate) async fn write_reg(&mut self, r: Reg, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(reg::I2C_ADDR, &[r.into(), value]).await.map_err(Error::I2c)
  }

  pub(crate) async fn update_mode<F>(&mut self, f: F) -> Result<(), Error<E>>
  where
    F: FnOnce(OperationMode) -> OperationMode,
  {
    let raw = self.read_reg(Reg::OperationModeControl).await?;
    let mode = f(OperationMode::from_bits(raw));
    self.write_reg(Reg::OperationModeControl, mode.into_bits()).await
  }

  pub(crate) fn read_pgood(&mut self) -> Result<bool, Error<E>> {
    self.pgood.is_high().map_err(|e| Error::Gpio(e.kind()))
  }
}
