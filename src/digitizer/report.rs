use bitfield_struct::bitfield;

use super::reg::REPORT_LEN;

/// Status byte at offset 3 of every pen report.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PenStatus {
  pub tip_switch: bool,
  pub barrel_switch: bool,
  pub eraser: bool,
  pub invert: bool,
  pub barrel_switch_2: bool,
  pub in_range: bool,
  #[bits(2)]
  __: u8,
}

impl PenStatus {
  /// Tool discriminator: bits 2–3 nonzero selects the rubber end.
  pub const fn tool_kind(self) -> ToolKind {
    if self.eraser() || self.invert() {
      ToolKind::Rubber
    } else {
      ToolKind::Pen
    }
  }
}

/// Which end of the pen is near the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToolKind {
  Pen,
  Rubber,
}

impl ToolKind {
  const fn key(self) -> Key {
    match self {
      ToolKind::Pen => Key::ToolPen,
      ToolKind::Rubber => Key::ToolRubber,
    }
  }
}

/// Tool latch carried from one report to the next.
///
/// The tool kind is only recomputed on a proximity-enter transition and held
/// for the rest of the stroke, so discriminator jitter mid-contact cannot
/// flip a pen stroke into an eraser stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToolState {
  pub in_proximity: bool,
  pub tool: ToolKind,
}

impl Default for ToolState {
  fn default() -> Self {
    Self { in_proximity: false, tool: ToolKind::Pen }
  }
}

/// One decoded pen report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PenSample {
  pub touch: bool,
  pub eraser: bool,
  pub stylus_button: bool,
  pub stylus_button_2: bool,
  pub in_proximity: bool,
  pub tool: ToolKind,
  pub x: u16,
  pub y: u16,
  pub pressure: u16,
  /// Hover distance. Only the byte at offset 10 is meaningful.
  pub distance: u8,
  pub tilt_x: i16,
  pub tilt_y: i16,
}

/// Decode one raw 22-byte report, threading the tool latch through.
///
/// The latch rule follows the stroke semantics: if the previous sample was
/// not in proximity the tool kind is recomputed from the current
/// discriminator bits, otherwise it is retained unconditionally.
pub fn decode(raw: &[u8; REPORT_LEN], prev: ToolState) -> (PenSample, ToolState) {
  let status = PenStatus::from_bits(raw[3]);

  let tool = if prev.in_proximity { prev.tool } else { status.tool_kind() };
  let state = ToolState { in_proximity: status.in_range(), tool };

  let sample = PenSample {
    touch: status.tip_switch(),
    eraser: status.eraser(),
    stylus_button: status.barrel_switch(),
    stylus_button_2: status.barrel_switch_2(),
    in_proximity: status.in_range(),
    tool,
    x: u16::from_le_bytes([raw[4], raw[5]]),
    y: u16::from_le_bytes([raw[6], raw[7]]),
    pressure: u16::from_le_bytes([raw[8], raw[9]]),
    distance: raw[10],
    tilt_x: i16::from_le_bytes([raw[11], raw[12]]),
    tilt_y: i16::from_le_bytes([raw[13], raw[14]]),
  };

  (sample, state)
}

/// Boolean channels reported to the [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
  Touch,
  ToolPen,
  ToolRubber,
  Stylus,
  Stylus2,
}

/// Absolute axis channels reported to the [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  X,
  Y,
  Pressure,
  Distance,
  TiltX,
  TiltY,
}

/// Consumer of decoded pen samples.
///
/// The driver pushes named field updates followed by a single [`sync`]
/// per sample, so the consumer always sees an atomic batch.
///
/// [`sync`]: EventSink::sync
pub trait EventSink {
  fn key(&mut self, key: Key, pressed: bool);
  fn axis(&mut self, axis: Axis, value: i32);
  fn sync(&mut self);
}

impl PenSample {
  /// Push this sample to the sink and commit it.
  pub fn emit<S: EventSink>(&self, sink: &mut S) {
    sink.key(Key::Touch, self.touch || self.eraser);
    sink.key(self.tool.key(), self.in_proximity);
    sink.key(Key::Stylus, self.stylus_button);
    sink.key(Key::Stylus2, self.stylus_button_2);
    sink.axis(Axis::X, i32::from(self.x));
    sink.axis(Axis::Y, i32::from(self.y));
    sink.axis(Axis::Pressure, i32::from(self.pressure));
    sink.axis(Axis::Distance, i32::from(self.distance));
    sink.axis(Axis::TiltX, i32::from(self.tilt_x));
    sink.axis(Axis::TiltY, i32::from(self.tilt_y));
    sink.sync();
  }
}
