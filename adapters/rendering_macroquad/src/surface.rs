//! [`Surface`] implementation drawing through macroquad's immediate-mode API.

use beebot_core::{Point, SpriteId};
use beebot_rendering::{triangulate, Color, ScreenRect, SpriteKey, Surface};
use macroquad::math::Vec2 as MacroquadVec2;

use crate::{sprites::SpriteAtlas, to_macroquad_color};

/// Draws one frame onto the macroquad window.
///
/// Sprites missing from the atlas, or every sprite when no atlas was loaded,
/// are drawn as flat squares so a level stays playable without image assets.
pub(crate) struct MacroquadSurface<'a> {
    atlas: Option<&'a SpriteAtlas>,
    tile_size: f32,
}

impl<'a> MacroquadSurface<'a> {
    pub(crate) fn new(atlas: Option<&'a SpriteAtlas>, tile_size: i32) -> Self {
        Self {
            atlas,
            tile_size: tile_size as f32,
        }
    }
}

/// Flat colour standing in for a sprite image.
pub(crate) fn placeholder_colour(sprite: SpriteId) -> Color {
    match SpriteKey::from_sprite_id(sprite) {
        Some(SpriteKey::BeeBot) => Color::from_rgb_u8(250, 190, 20),
        Some(SpriteKey::BeeBotAlternate) => Color::from_rgb_u8(230, 160, 10),
        Some(SpriteKey::Goal) => Color::from_rgb_u8(90, 170, 80),
        Some(SpriteKey::Obstacle) => Color::from_rgb_u8(120, 85, 60),
        None => Color::from_rgb_u8(200, 0, 200),
    }
}

fn to_macroquad_vec(point: Point) -> MacroquadVec2 {
    MacroquadVec2::new(point.x as f32, point.y as f32)
}

impl Surface for MacroquadSurface<'_> {
    fn fill(&mut self, colour: Color, rect: ScreenRect) {
        macroquad::shapes::draw_rectangle(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
            to_macroquad_color(colour),
        );
    }

    fn blit(&mut self, sprite: SpriteId, position: Point) {
        let drawn = match (self.atlas, SpriteKey::from_sprite_id(sprite)) {
            (Some(atlas), Some(key)) if atlas.contains(key) => atlas
                .draw(key, to_macroquad_vec(position), self.tile_size)
                .is_ok(),
            _ => false,
        };
        if drawn {
            return;
        }

        let inset = self.tile_size * 0.15;
        macroquad::shapes::draw_rectangle(
            position.x as f32 + inset,
            position.y as f32 + inset,
            self.tile_size - 2.0 * inset,
            self.tile_size - 2.0 * inset,
            to_macroquad_color(placeholder_colour(sprite)),
        );
    }

    fn fill_polygon(&mut self, colour: Color, vertices: &[Point]) {
        let colour = to_macroquad_color(colour);
        for [a, b, c] in triangulate(vertices) {
            macroquad::shapes::draw_triangle(
                to_macroquad_vec(a),
                to_macroquad_vec(b),
                to_macroquad_vec(c),
                colour,
            );
        }
    }

    fn measure_text(&mut self, text: &str, font_size: u16) -> (i32, i32) {
        let dimensions = macroquad::text::measure_text(text, None, font_size, 1.0);
        (
            dimensions.width.round() as i32,
            dimensions.height.round() as i32,
        )
    }

    fn draw_text(&mut self, text: &str, colour: Color, top_left: Point, font_size: u16) {
        // macroquad positions text by its baseline.
        let dimensions = macroquad::text::measure_text(text, None, font_size, 1.0);
        let _ = macroquad::text::draw_text(
            text,
            top_left.x as f32,
            top_left.y as f32 + dimensions.offset_y,
            f32::from(font_size),
            to_macroquad_color(colour),
        );
    }
}
