//! Live pressure line and the one-line status strip.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::primitives::draw_text_band;
use crate::config::layout::{PRESSURE_TEXT_HEIGHT, PRESSURE_TEXT_POS, PRESSURE_TEXT_WIDTH, SCREEN_WIDTH};
use crate::ui::colors::{BLACK, WHITE, YELLOW};
use crate::ui::styles::{LEFT_TOP, PRESSURE_FONT, STATUS_STYLE};

/// Height of the status strip band.
const STATUS_HEIGHT: u32 = 10;

/// Redraw the live pressure text, white when in range and yellow otherwise.
pub fn draw_pressure_line<D>(
    display: &mut D,
    text: &str,
    in_range: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let color = if in_range { WHITE } else { YELLOW };
    draw_text_band(
        display,
        PRESSURE_TEXT_POS,
        Size::new(PRESSURE_TEXT_WIDTH, PRESSURE_TEXT_HEIGHT),
        BLACK,
        text,
        PRESSURE_TEXT_POS,
        MonoTextStyle::new(PRESSURE_FONT, color),
        LEFT_TOP,
    );
}

/// Redraw a full-width status strip whose top-left corner is `origin`.
pub fn draw_status_line<D>(
    display: &mut D,
    origin: Point,
    text: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let width = SCREEN_WIDTH.saturating_sub(origin.x.max(0) as u32);
    draw_text_band(display, origin, Size::new(width, STATUS_HEIGHT), BLACK, text, origin, STATUS_STYLE, LEFT_TOP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::canvas::Canvas;

    fn pressure_band() -> Size { Size::new(PRESSURE_TEXT_WIDTH, PRESSURE_TEXT_HEIGHT) }

    #[test]
    fn test_pressure_line_in_range_is_white() {
        let mut canvas = Canvas::default();
        draw_pressure_line(&mut canvas, "   1013.25 mb", true);

        assert!(canvas.count_in(WHITE, PRESSURE_TEXT_POS, pressure_band()) > 0);
        assert_eq!(canvas.count(YELLOW), 0);
    }

    #[test]
    fn test_pressure_line_out_of_range_is_yellow() {
        let mut canvas = Canvas::default();
        draw_pressure_line(&mut canvas, "++ 1040.00 mb", false);

        assert!(canvas.count_in(YELLOW, PRESSURE_TEXT_POS, pressure_band()) > 0);
        assert_eq!(canvas.count(WHITE), 0);
    }

    #[test]
    fn test_pressure_line_clears_previous_text() {
        let mut canvas = Canvas::default();
        draw_pressure_line(&mut canvas, "++ 1040.00 mb", false);
        draw_pressure_line(&mut canvas, "", true);

        assert_eq!(canvas.count_in(YELLOW, PRESSURE_TEXT_POS, pressure_band()), 0);
        assert_eq!(canvas.count(BLACK) as u32, PRESSURE_TEXT_WIDTH * PRESSURE_TEXT_HEIGHT);
    }

    #[test]
    fn test_status_line_spans_to_right_edge() {
        let mut canvas = Canvas::default();
        draw_status_line(&mut canvas, Point::new(0, 300), "#1 1013hPa IN RANGE");

        assert_eq!(canvas.at(239, 300), Some(BLACK));
        assert!(canvas.count(WHITE) > 0);
    }
}
