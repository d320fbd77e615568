//! Wacom EMR pen digitizer over I²C.
//!
//! The device answers a one-shot capability query at attach time and then
//! pushes a fixed-layout 22-byte pen report on every interrupt. The driver
//! owns the I²C peripheral and the interrupt line and forwards decoded
//! samples to an [`EventSink`] provided by the platform.

mod features;
mod reg;
mod report;

use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};

use crate::Error;

pub use features::Features;
pub use reg::PowerState;
pub use report::{decode, Axis, EventSink, Key, PenSample, PenStatus, ToolKind, ToolState};

/// Dedicated reset line for the digitizer.
///
/// The line is a platform resource; how long the pulse is held and how long
/// the part needs to come back is board knowledge, so both live behind this
/// trait. A driver built without one simply skips the reset.
pub trait ResetControl {
  async fn reset(&mut self);
}

/// Placeholder for drivers constructed without a reset line.
pub struct NoReset;

impl ResetControl for NoReset {
  async fn reset(&mut self) {}
}

/// Driver for the pen digitizer.
///
/// Create an instance with [`WacomI2c::new`] (or [`WacomI2c::with_reset`]
/// when the board wires up a dedicated reset line), call
/// [`WacomI2c::initialize`] once to retrieve the capability limits, then
/// service reports with [`WacomI2c::wait_for_report`].
pub struct WacomI2c<I, IRQ, RST = NoReset> {
  i2c: I,
  irq: IRQ,
  reset: Option<RST>,
  tool: ToolState,
}

impl<I, E, IRQ> WacomI2c<I, IRQ>
where
  I: I2c<SevenBitAddress, Error = E>,
  IRQ: Wait,
{
  /// Create a driver without a reset line.
  pub fn new(i2c: I, irq: IRQ) -> Self {
    Self { i2c, irq, reset: None, tool: ToolState::default() }
  }
}

impl<I, E, IRQ, RST> WacomI2c<I, IRQ, RST>
where
  I: I2c<SevenBitAddress, Error = E>,
  IRQ: Wait,
  RST: ResetControl,
{
  /// Create a driver that pulses `reset` before querying the device.
  pub fn with_reset(i2c: I, irq: IRQ, reset: RST) -> Self {
    Self { i2c, irq, reset: Some(reset), tool: ToolState::default() }
  }

  /// Reset the device (best effort) and run the capability query.
  ///
  /// Bring-up fails only on a bus error; a missing reset line is logged and
  /// skipped. The returned [`Features`] are meant to be handed to the
  /// platform's input-axis registration exactly once.
  pub async fn initialize(&mut self) -> Result<Features, Error<E>> {
    match self.reset.as_mut() {
      Some(rst) => rst.reset().await,
      None => warn!("digitizer has no reset control, continuing without reset"),
    }

    let features = self.query().await?;
    debug!(
      "digitizer limits: x {} y {} pressure {} fw {} distance {} tilt {}/{}",
      features.x_max,
      features.y_max,
      features.pressure_max,
      features.fw_version,
      features.distance_max,
      features.tilt_x_max,
      features.tilt_y_max,
    );

    Ok(features)
  }

  /// Issue the capability query as one atomic write-then-read transfer.
  ///
  /// The command frame and the 21-byte read must travel in a single
  /// transaction; the device aborts the exchange if the bus is released
  /// between the two messages.
  async fn query(&mut self) -> Result<Features, Error<E>> {
    let cmd = reg::query_command();
    let mut raw = [0u8; reg::QUERY_LEN];

    let mut ops = [Operation::Write(&cmd), Operation::Read(&mut raw)];
    self.i2c.transaction(reg::I2C_ADDR, &mut ops).await.map_err(Error::I2c)?;

    Ok(Features::parse(&raw))
  }

  /// Block until the interrupt line asserts, then handle one report.
  pub async fn wait_for_report<S: EventSink>(&mut self, sink: &mut S) -> Result<(), Error<E>> {
    self.irq.wait_for_low().await.map_err(|_| unreachable!())?;
    self.service_interrupt(sink).await;
    Ok(())
  }

  /// One interrupt's worth of work: read, decode, emit.
  ///
  /// A failed report read is logged and dropped without emitting anything —
  /// a bad poll must never wedge the interrupt line, so the cycle is always
  /// acknowledged.
  pub async fn service_interrupt<S: EventSink>(&mut self, sink: &mut S) {
    let mut raw = [0u8; reg::REPORT_LEN];
    if self.i2c.read(reg::I2C_ADDR, &mut raw).await.is_err() {
      warn!("pen report read failed, dropping sample");
      return;
    }

    let (sample, tool) = report::decode(&raw, self.tool);
    self.tool = tool;
    sample.emit(sink);
  }

  /// Switch the digitizer between its run and sleep power states.
  pub async fn set_power(&mut self, state: PowerState) -> Result<(), Error<E>> {
    let cmd = reg::set_power_command(state);
    self.i2c.write(reg::I2C_ADDR, &cmd).await.map_err(Error::I2c)
  }

  /// Release the owned peripherals.
  pub fn free(self) -> (I, IRQ, Option<RST>) {
    (self.i2c, self.irq, self.reset)
  }
}
