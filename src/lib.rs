#![no_std]
#![allow(async_fn_in_trait)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async, `no_std` drivers for the two I²C peripherals that bring up the pen
//! and panel bias of an e-paper display platform.
//!
//! The crate covers:
//!
//! - A Wacom EMR pen digitizer speaking the HID-over-I²C style query/report
//!   protocol: a one-shot capability query at attach time and an
//!   interrupt-driven 22-byte report decoder with a sticky pen/rubber tool
//!   latch ([`digitizer`])
//! - The Silergy SY7636A power-management chip that generates the panel's
//!   negative VCOM bias: rail enable/disable sequencing with power-good
//!   polling, the 9-bit VCOM adjust codec, and the fault/state register
//!   ([`pmic`])
//! - `embedded-hal` / `embedded-hal-async` 1.0 traits throughout so both
//!   drivers work across MCU families
//!
//! Anything above the wire protocol — input-device registration, regulator
//! framework glue, sysfs exposure — is the platform's job and is reached
//! through the small collaborator traits ([`digitizer::EventSink`],
//! [`digitizer::ResetControl`]) or the HAL traits themselves.
//!
//! ```no_run
//! use embedded_hal_async::{digital::Wait, i2c::{I2c, SevenBitAddress}};
//! use epd_periph::digitizer::{EventSink, WacomI2c};
//!
//! async fn example<I2C, IRQ, S, E>(i2c: I2C, irq: IRQ, sink: &mut S) -> Result<(), epd_periph::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   IRQ: Wait,
//!   S: EventSink,
//! {
//!   let mut pen = WacomI2c::new(i2c, irq);
//!   let _features = pen.initialize().await?;
//!   // register input axes from the features, then service reports forever
//!   loop {
//!     pen.wait_for_report(sink).await?;
//!   }
//! }
//! ```

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod digitizer;
pub mod pmic;

#[cfg(test)]
pub(crate) mod testutil;

pub use pmic::RailState;

/// Errors that can occur while interacting with either peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// The power-good GPIO could not be read.
  Gpio(embedded_hal::digital::ErrorKind),
  /// Power-good was never observed within the polling bound. The rail has
  /// already been forced back off when this is returned.
  PowerGoodTimeout {
    /// Total time spent waiting, in milliseconds.
    waited_ms: u32,
  },
  /// A VCOM value outside the chip's programmable range, rejected before any
  /// register write.
  VcomOutOfRange(i16),
  /// The fault register reported a state index outside the documented table.
  UnknownFault(u8),
}
