//! Widget components for the barometer display.
//!
//! - [`gauges`]: The six pressure scales, needle steps and value labels
//! - [`humidity`]: Arc meter with temperature text and the trend bar
//! - [`readout`]: Live pressure line and the status strip
//! - [`primitives`]: Shared low-level drawing helpers
//!
//! All widgets draw into any `DrawTarget<Color = Rgb565>`: the firmware
//! framebuffer, the simulator window, or a recording canvas in tests. Draw
//! results are discarded with `.ok()`; every target used here is infallible.

pub mod gauges;
pub mod humidity;
pub mod primitives;
pub mod readout;

pub use gauges::{GaugeCanvas, NeedleSegments, draw_labels, draw_needle_step, draw_scales, needle_segments};
pub use humidity::HumidityMeter;
pub use readout::{draw_pressure_line, draw_status_line};
