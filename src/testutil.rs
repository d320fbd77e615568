//! Host-side test support: a minimal executor and scripted stand-ins for the
//! bus, the power-good input, the interrupt line and the delay provider.

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::i2c::{self, Operation, SevenBitAddress};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::I2c;

use crate::digitizer::{Axis, EventSink, Key};

/// Drive a future to completion. The mocks never yield, so a no-op waker is
/// all this needs.
pub fn block_on<F: core::future::Future>(f: F) -> F::Output {
  use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

  fn noop_raw_waker() -> RawWaker {
    static VTABLE: RawWakerVTable = RawWakerVTable::new(|_| noop_raw_waker(), |_| {}, |_| {}, |_| {});
    RawWaker::new(core::ptr::null(), &VTABLE)
  }

  let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
  let mut cx = Context::from_waker(&waker);
  let mut f = core::pin::pin!(f);
  loop {
    if let Poll::Ready(out) = f.as_mut().poll(&mut cx) {
      return out;
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

impl i2c::Error for MockBusError {
  fn kind(&self) -> i2c::ErrorKind {
    i2c::ErrorKind::Other
  }
}

/// Register-file bus for the PMIC: one-byte address writes set the register
/// pointer, two-byte writes store a value, reads stream from the pointer.
#[derive(Default)]
pub struct RegBus {
  pub regs: [u8; 16],
  /// Every (register, value) pair written.
  pub writes: Vec<(u8, u8)>,
  /// Fail register-value writes while leaving pointer writes and reads alone.
  pub fail_writes: bool,
  pointer: u8,
}

impl i2c::ErrorType for RegBus {
  type Error = MockBusError;
}

impl I2c<SevenBitAddress> for RegBus {
  async fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    for op in operations {
      match op {
        Operation::Write(buf) => match **buf {
          [reg] => self.pointer = reg,
          [reg, value] => {
            if self.fail_writes {
              return Err(MockBusError);
            }
            self.regs[reg as usize] = value;
            self.writes.push((reg, value));
          }
          _ => return Err(MockBusError),
        },
        Operation::Read(buf) => {
          for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.regs[self.pointer as usize + i];
          }
        }
      }
    }
    Ok(())
  }
}

/// Frame-oriented bus for the digitizer: records writes, plays back queued
/// read buffers.
#[derive(Default)]
pub struct FrameBus {
  pub writes: Vec<Vec<u8>>,
  pub fail_next: bool,
  pub transactions: usize,
  reads: VecDeque<Vec<u8>>,
}

impl FrameBus {
  pub fn push_read(&mut self, data: &[u8]) {
    self.reads.push_back(data.to_vec());
  }
}

impl i2c::ErrorType for FrameBus {
  type Error = MockBusError;
}

impl I2c<SevenBitAddress> for FrameBus {
  async fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    if self.fail_next {
      self.fail_next = false;
      return Err(MockBusError);
    }
    self.transactions += 1;
    for op in operations {
      match op {
        Operation::Write(buf) => self.writes.push(buf.to_vec()),
        Operation::Read(buf) => {
          let data = self.reads.pop_front().ok_or(MockBusError)?;
          let n = buf.len().min(data.len());
          buf[..n].copy_from_slice(&data[..n]);
        }
      }
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError;

impl digital::Error for PinError {
  fn kind(&self) -> digital::ErrorKind {
    digital::ErrorKind::Other
  }
}

/// Power-good input following a script; the final entry repeats forever.
pub struct ScriptPin {
  script: Vec<Result<bool, ()>>,
  at: usize,
}

impl ScriptPin {
  pub fn new(script: &[Result<bool, ()>]) -> Self {
    Self { script: script.to_vec(), at: 0 }
  }

  pub fn always(level: bool) -> Self {
    Self::new(&[Ok(level)])
  }
}

impl digital::ErrorType for ScriptPin {
  type Error = PinError;
}

impl InputPin for ScriptPin {
  fn is_high(&mut self) -> Result<bool, Self::Error> {
    let step = self.script[self.at.min(self.script.len() - 1)];
    self.at += 1;
    step.map_err(|()| PinError)
  }

  fn is_low(&mut self) -> Result<bool, Self::Error> {
    self.is_high().map(|level| !level)
  }
}

/// Interrupt line that is always asserted.
pub struct ReadyLine;

impl digital::ErrorType for ReadyLine {
  type Error = core::convert::Infallible;
}

impl Wait for ReadyLine {
  async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}

/// Delay provider that only accounts for the requested time.
#[derive(Default)]
pub struct MockDelay {
  pub slept_ns: u64,
}

impl DelayNs for MockDelay {
  async fn delay_ns(&mut self, ns: u32) {
    self.slept_ns += u64::from(ns);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedEvent {
  Key(Key, bool),
  Axis(Axis, i32),
  Sync,
}

/// Event sink that records everything pushed into it.
#[derive(Default)]
pub struct RecordingSink {
  pub events: Vec<RecordedEvent>,
}

impl EventSink for RecordingSink {
  fn key(&mut self, key: Key, pressed: bool) {
    self.events.push(RecordedEvent::Key(key, pressed));
  }

  fn axis(&mut self, axis: Axis, value: i32) {
    self.events.push(RecordedEvent::Axis(axis, value));
  }

  fn sync(&mut self) {
    self.events.push(RecordedEvent::Sync);
  }
}
