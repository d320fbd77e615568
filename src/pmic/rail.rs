//! Rail enable/disable sequencing with power-good polling.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::Error;

use super::Sy7636a;

/// Where the rail sequencer left the output rails.
///
/// `Enabling` and `Failed` are transient: an enable call either lands in
/// `Enabled` or tears the rail back down to `Disabled` before returning.
/// A GPIO read failure aborts mid-poll and leaves `Enabling` standing,
/// mirroring the fact that the enable write was not rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RailState {
  Disabled,
  Enabling,
  Enabled,
  Failed,
}

/// Upper bound on power-good polls before an enable is declared failed.
const PGOOD_POLL_LIMIT: u32 = 500;
/// Pause between power-good polls. Keeps the total observation window at
/// [`PGOOD_POLL_LIMIT`] milliseconds minimum.
const PGOOD_POLL_INTERVAL_US: u32 = 1_000;
/// Analog ramp-down time after a disable write, before the rail may be
/// re-enabled or dependent circuitry powered off.
const RAMP_DOWN_US: u32 = 35_000;

impl<I, E, PG, D> Sy7636a<I, PG, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  PG: InputPin,
  D: DelayNs,
{
  /// Switch the output rails on and wait for power-good.
  ///
  /// The enable bit is written first, then power-good is polled up to 500
  /// times with millisecond pauses. Exhausting the poll budget forces the
  /// rail back off before the timeout error is returned. A GPIO read error
  /// aborts immediately without rolling back the enable write.
  pub async fn enable(&mut self) -> Result<(), Error<E>> {
    self.state = RailState::Enabling;
    self.update_mode(|m| m.with_rail_on(true)).await?;

    let mut waited_ms = 0u32;
    for polls in 0..PGOOD_POLL_LIMIT {
      match self.read_pgood() {
        Err(e) => {
          error!("failed to read power-good input");
          return Err(e);
        }
        Ok(true) => {
          self.state = RailState::Enabled;
          debug!("power good OK (took {} ms, {} polls)", waited_ms, polls);
          return Ok(());
        }
        Ok(false) => {
          self.delay.delay_us(PGOOD_POLL_INTERVAL_US).await;
          waited_ms += 1;
        }
      }
    }

    self.state = RailState::Failed;
    error!("power good signal timeout after {} ms", waited_ms);
    if self.disable().await.is_err() {
      error!("forced rail disable failed after power-good timeout");
    }
    Err(Error::PowerGoodTimeout { waited_ms })
  }

  /// Switch the output rails off and wait out the analog ramp-down.
  ///
  /// The ramp-down pause happens even when the disable write itself failed;
  /// the write's result is returned afterwards.
  pub async fn disable(&mut self) -> Result<(), Error<E>> {
    let written = self.update_mode(|m| m.with_rail_on(false)).await;
    self.delay.delay_us(RAMP_DOWN_US).await;
    self.state = RailState::Disabled;
    written
  }

  /// Direct register query of the on/off bit. No polling.
  pub async fn is_enabled(&mut self) -> Result<bool, Error<E>> {
    let raw = self.read_reg(super::reg::Reg::OperationModeControl).await?;
    Ok(super::reg::OperationMode::from_bits(raw).rail_on())
  }

  /// Poll power-good with the same bound as [`Sy7636a::enable`], without
  /// touching the enable bit.
  ///
  /// Returns the last observed level: `Ok(true)` as soon as the signal
  /// asserts, `Ok(false)` after exhausting the poll budget. Rail health is
  /// the caller's judgement; only a GPIO read failure is an error here.
  pub async fn poll_power_good(&mut self) -> Result<bool, Error<E>> {
    for _ in 0..PGOOD_POLL_LIMIT {
      if self.read_pgood()? {
        return Ok(true);
      }
      self.delay.delay_us(PGOOD_POLL_INTERVAL_US).await;
    }
    Ok(false)
  }

  /// Last state the sequencer drove the rails to.
  pub fn rail_state(&self) -> RailState {
    self.state
  }
}
