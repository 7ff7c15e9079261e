//! The six pressure scales and their needles.
//!
//! # Scale Anatomy
//!
//! ```text
//!  +--caption--+   frame (grey), caption band on black
//!  |  ######   |
//!  |  #    -   |   white face, tick every 10 units at x+20
//!  |  #|>  --- |   red needle wedge at x+3..x+19, major tick every 50
//!  |  #    -   |
//!  |  ######   |
//!  +---label---+   green value label, right-aligned
//! ```
//!
//! # Incremental Needle Drawing
//!
//! The needle is a wedge with its base on the left and its tip 16 px to the
//! right. A one-unit move does not redraw the wedge: it erases the trailing
//! edge with the face color and draws the leading edge one row further
//! ([`needle_segments`]). A sweep of N units therefore costs 2N short lines.
//! A first placement clears the needle column and fills the whole wedge.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Rectangle, Triangle};
use embedded_graphics::text::Text;

use super::primitives::{draw_line, fill_rect};
use crate::config::layout::{
    CAPTION_OFFSET_Y,
    FACE_HEIGHT,
    FACE_OFFSET,
    FACE_WIDTH,
    LABEL_RIGHT_X,
    LABEL_Y,
    MAJOR_TICK_LEN,
    MINOR_TICK_LEN,
    NEEDLE_HALF_HEIGHT,
    NEEDLE_LENGTH,
    SCALE_HEIGHT,
    SCALE_ORIGINS,
    SCALE_PITCH,
    SCALE_TOP,
    SCALE_WIDTH,
    TICK_TOP,
    needle_row,
    needle_x,
};
use crate::config::{Cadence, GAUGE_COUNT, GaugeSlots, SCALE_LENGTH};
use crate::needle::{NeedleSink, NeedleStep};
use crate::readout::{caption, format_label};
use crate::ui::colors::{BLACK, WHITE};
use crate::ui::styles::{
    CAPTION_STYLE,
    CENTERED_TOP,
    ERASE_STROKE,
    FACE_FILL,
    FRAME_STYLE,
    LABEL_STYLE,
    NEEDLE_FILL,
    NEEDLE_STROKE,
    RIGHT_TOP,
    TICK_STYLE,
};

/// Distance between minor ticks in gauge units.
const MINOR_TICK_STEP: usize = 10;

/// Distance between major ticks in gauge units.
const MAJOR_TICK_STEP: usize = 50;

/// Width of the label band under each scale.
const LABEL_BAND_WIDTH: u32 = 29;

/// Height of the label band under each scale.
const LABEL_BAND_HEIGHT: u32 = 11;

// =============================================================================
// Static Layout
// =============================================================================

/// Draw frames, faces, ticks, captions and placeholder labels for all scales.
///
/// Needles are not drawn here; the first animation tick places them.
pub fn draw_scales<D>(
    display: &mut D,
    gauge_slots: &GaugeSlots,
    cadence: Cadence,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for (gauge, origin) in SCALE_ORIGINS.iter().enumerate() {
        draw_scale(display, *origin, caption(gauge_slots.slot(gauge), cadence).as_str());
    }
}

fn draw_scale<D>(
    display: &mut D,
    origin: Point,
    title: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(origin, Size::new(SCALE_WIDTH, SCALE_HEIGHT))
        .into_styled(FRAME_STYLE)
        .draw(display)
        .ok();
    Rectangle::new(origin + FACE_OFFSET, Size::new(FACE_WIDTH, FACE_HEIGHT))
        .into_styled(FACE_FILL)
        .draw(display)
        .ok();

    let center_x = origin.x + SCALE_WIDTH as i32 / 2;
    Text::with_text_style(title, Point::new(center_x, origin.y + CAPTION_OFFSET_Y), CAPTION_STYLE, CENTERED_TOP)
        .draw(display)
        .ok();

    let tick_x = origin.x + 20;
    for units in (0..=SCALE_LENGTH as usize).step_by(MINOR_TICK_STEP) {
        let len = if units % MAJOR_TICK_STEP == 0 { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
        let y = origin.y + TICK_TOP + units as i32;
        draw_line(display, Line::new(Point::new(tick_x, y), Point::new(tick_x + len - 1, y)), TICK_STYLE);
    }

    Text::with_text_style("---", Point::new(center_x, LABEL_Y), LABEL_STYLE, CENTERED_TOP)
        .draw(display)
        .ok();
}

// =============================================================================
// Needles
// =============================================================================

/// Erase and draw edges for a one-unit needle move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeedleSegments {
    /// Trailing edge, painted with the face color.
    pub erase: Line,
    /// Leading edge, painted with the needle color.
    pub draw: Line,
}

/// Edges to repaint for a move step; `None` for a placement.
#[must_use]
pub fn needle_segments(step: NeedleStep) -> Option<NeedleSegments> {
    let NeedleStep::Moved { gauge, from, to } = step else {
        return None;
    };

    let x = needle_x(gauge);
    let tip_x = x + NEEDLE_LENGTH;
    let row = needle_row(from);
    let h = NEEDLE_HALF_HEIGHT;

    let segments = if to < from {
        // Moving down the screen
        NeedleSegments {
            erase: Line::new(Point::new(x, row - h), Point::new(tip_x, row)),
            draw: Line::new(Point::new(x, row + h + 1), Point::new(tip_x, row + 1)),
        }
    } else {
        NeedleSegments {
            erase: Line::new(Point::new(x, row + h), Point::new(tip_x, row)),
            draw: Line::new(Point::new(x, row - h - 1), Point::new(tip_x, row - 1)),
        }
    };
    Some(segments)
}

/// Apply one animation step to the display.
pub fn draw_needle_step<D>(
    display: &mut D,
    step: NeedleStep,
) where
    D: DrawTarget<Color = Rgb565>,
{
    match step {
        NeedleStep::Placed { gauge, position } => draw_full_needle(display, gauge, position),
        NeedleStep::Moved { .. } => {
            if let Some(segments) = needle_segments(step) {
                draw_line(display, segments.erase, ERASE_STROKE);
                draw_line(display, segments.draw, NEEDLE_STROKE);
            }
        }
    }
}

fn draw_full_needle<D>(
    display: &mut D,
    gauge: usize,
    position: i16,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let x = needle_x(gauge);
    let row = needle_row(position);
    let h = NEEDLE_HALF_HEIGHT;

    // Clear the needle column of the face, leaving the ticks intact
    let face_top = SCALE_TOP + FACE_OFFSET.y;
    fill_rect(display, Point::new(x, face_top), Size::new(NEEDLE_LENGTH as u32 + 1, FACE_HEIGHT), WHITE);

    let base_top = Point::new(x, row - h);
    let base_bottom = Point::new(x, row + h);
    let tip = Point::new(x + NEEDLE_LENGTH, row);
    Triangle::new(base_top, tip, Point::new(x, row))
        .into_styled(NEEDLE_FILL)
        .draw(display)
        .ok();
    Triangle::new(Point::new(x, row), tip, base_bottom)
        .into_styled(NEEDLE_FILL)
        .draw(display)
        .ok();
    draw_line(display, Line::new(Point::new(x, row), tip), NEEDLE_STROKE);
}

/// Draw the numeric gauge values under the scales.
pub fn draw_labels<D>(
    display: &mut D,
    labels: &[i32; GAUGE_COUNT],
) where
    D: DrawTarget<Color = Rgb565>,
{
    for (gauge, &units) in labels.iter().enumerate() {
        let right = LABEL_RIGHT_X + gauge as i32 * SCALE_PITCH;
        fill_rect(
            display,
            Point::new(right + 1 - LABEL_BAND_WIDTH as i32, LABEL_Y),
            Size::new(LABEL_BAND_WIDTH, LABEL_BAND_HEIGHT),
            BLACK,
        );
        Text::with_text_style(format_label(units).as_str(), Point::new(right, LABEL_Y), LABEL_STYLE, RIGHT_TOP)
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Sink Adapter
// =============================================================================

/// Draws needle steps straight into a display.
///
/// Binaries that need to flush after every tick wrap this in their own sink.
pub struct GaugeCanvas<'a, D> {
    display: &'a mut D,
}

impl<'a, D> GaugeCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(display: &'a mut D) -> Self { Self { display } }

    pub fn display(&mut self) -> &mut D { self.display }
}

impl<D> NeedleSink for GaugeCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn needle(
        &mut self,
        step: NeedleStep,
    ) {
        draw_needle_step(self.display, step);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
