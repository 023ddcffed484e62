//! Surface test double that records every primitive it is asked to draw.

use beebot_core::{Point, SpriteId};

use crate::{Color, ScreenRect, Surface};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCall {
    Fill(Color, ScreenRect),
    Blit(SpriteId, Point),
    Polygon(Color, Vec<Point>),
    Text(String, Color, Point),
}

/// Measures text as 10 pixels per character and `font_size` pixels tall.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) calls: Vec<DrawCall>,
}

impl Surface for RecordingSurface {
    fn fill(&mut self, colour: Color, rect: ScreenRect) {
        self.calls.push(DrawCall::Fill(colour, rect));
    }

    fn blit(&mut self, sprite: SpriteId, position: Point) {
        self.calls.push(DrawCall::Blit(sprite, position));
    }

    fn fill_polygon(&mut self, colour: Color, vertices: &[Point]) {
        self.calls.push(DrawCall::Polygon(colour, vertices.to_vec()));
    }

    fn measure_text(&mut self, text: &str, font_size: u16) -> (i32, i32) {
        (text.chars().count() as i32 * 10, i32::from(font_size))
    }

    fn draw_text(&mut self, text: &str, colour: Color, top_left: Point, _font_size: u16) {
        self.calls
            .push(DrawCall::Text(text.to_owned(), colour, top_left));
    }
}
