#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for BeeBot adapters.
//!
//! Everything drawable is expressed against the [`Surface`] trait so the
//! presentation logic can be exercised without a window. Backends implement
//! [`Surface`] on top of their graphics library and [`RenderingBackend`] for
//! the frame loop.

mod button;
mod panel;
mod polygon;
#[cfg(test)]
mod recording;

use std::{str::FromStr, time::Duration};

use anyhow::Result as AnyResult;
use beebot_core::{BeeBot, BoardEntity, Component, Goal, Obstacle, Point, SpriteId};
use glam::Vec2;
use thiserror::Error;

pub use button::{Arrow, Button, BUTTON_FONT_SIZE};
pub use panel::{ControlPanel, PanelAction};
pub use polygon::triangulate;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(location: Point, width: i32, height: i32) -> Self {
        Self {
            x: location.x,
            y: location.y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Centre pixel, rounded towards the top-left.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether `position` lies strictly inside the rectangle; edges do not count.
    #[must_use]
    pub fn contains_strictly(&self, position: Vec2) -> bool {
        position.x > self.x as f32
            && position.y > self.y as f32
            && position.x < self.right() as f32
            && position.y < self.bottom() as f32
    }
}

/// Drawing primitives a graphics backend provides.
pub trait Surface {
    /// Fills `rect` with a solid colour.
    fn fill(&mut self, colour: Color, rect: ScreenRect);

    /// Draws a sprite with its top-left corner at `position`.
    fn blit(&mut self, sprite: SpriteId, position: Point);

    /// Fills the simple polygon outlined by `vertices`.
    fn fill_polygon(&mut self, colour: Color, vertices: &[Point]);

    /// Size in pixels of `text` rendered at `font_size`.
    fn measure_text(&mut self, text: &str, font_size: u16) -> (i32, i32);

    /// Draws `text` with its bounding box's top-left corner at `top_left`.
    fn draw_text(&mut self, text: &str, colour: Color, top_left: Point, font_size: u16);
}

/// Anything that knows how to put itself on a [`Surface`].
pub trait Drawable {
    /// Draws the value for the current frame.
    fn display<S: Surface>(&self, surface: &mut S);
}

impl Drawable for Component {
    fn display<S: Surface>(&self, surface: &mut S) {
        if let Some(frame) = self.current_frame() {
            surface.blit(frame, self.screen_location());
        }
    }
}

impl Drawable for Goal {
    fn display<S: Surface>(&self, surface: &mut S) {
        self.component().display(surface);
    }
}

impl Drawable for Obstacle {
    fn display<S: Surface>(&self, surface: &mut S) {
        self.component().display(surface);
    }
}

impl Drawable for BeeBot {
    fn display<S: Surface>(&self, surface: &mut S) {
        self.component().display(surface);
    }
}

/// Images a backend loads for the board entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// First BeeBot animation frame.
    BeeBot,
    /// Second BeeBot animation frame.
    BeeBotAlternate,
    /// Goal marker.
    Goal,
    /// Obstacle.
    Obstacle,
}

impl SpriteKey {
    /// Every key, in manifest loading order.
    pub const ALL: [SpriteKey; 4] = [
        SpriteKey::BeeBot,
        SpriteKey::BeeBotAlternate,
        SpriteKey::Goal,
        SpriteKey::Obstacle,
    ];

    /// Handle under which the image is referenced by board components.
    #[must_use]
    pub const fn sprite_id(self) -> SpriteId {
        SpriteId::new(self as u32)
    }

    /// Key owning the provided handle, if any.
    #[must_use]
    pub fn from_sprite_id(id: SpriteId) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.sprite_id() == id)
    }

    /// Name used for the key in sprite manifests.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeeBot => "BeeBot",
            Self::BeeBotAlternate => "BeeBotAlternate",
            Self::Goal => "Goal",
            Self::Obstacle => "Obstacle",
        }
    }
}

impl FromStr for SpriteKey {
    type Err = RenderingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| RenderingError::UnknownSpriteKey {
                name: name.to_owned(),
            })
    }
}

/// Describes the square board drawn beneath the components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of columns contained in the board.
    pub columns: u32,
    /// Number of rows contained in the board.
    pub rows: u32,
    /// Pixel side length of a single square.
    pub step: i32,
    /// Colour of the squares.
    pub fill_color: Color,
    /// Colour used when drawing grid lines.
    pub line_color: Color,
}

impl BoardPresentation {
    /// Thickness of the grid lines in pixels.
    pub const LINE_THICKNESS: i32 = 2;

    /// Total board width in pixels.
    #[must_use]
    pub fn width(&self) -> i32 {
        span(self.columns, self.step)
    }

    /// Total board height in pixels.
    #[must_use]
    pub fn height(&self) -> i32 {
        span(self.rows, self.step)
    }

    /// Rectangle covered by the board.
    #[must_use]
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(Point::new(0, 0), self.width(), self.height())
    }
}

/// Pixel length covered by `squares` squares, saturating at `i32::MAX`.
fn span(squares: u32, step: i32) -> i32 {
    i32::try_from(squares).map_or(i32::MAX, |squares| squares.saturating_mul(step))
}

impl Drawable for BoardPresentation {
    fn display<S: Surface>(&self, surface: &mut S) {
        surface.fill(self.fill_color, self.rect());

        let half = Self::LINE_THICKNESS / 2;
        for column in 0..=self.columns {
            surface.fill(
                self.line_color,
                ScreenRect::new(
                    Point::new(span(column, self.step) - half, 0),
                    Self::LINE_THICKNESS,
                    self.height(),
                ),
            );
        }
        for row in 0..=self.rows {
            surface.fill(
                self.line_color,
                ScreenRect::new(
                    Point::new(0, span(row, self.step) - half),
                    self.width(),
                    Self::LINE_THICKNESS,
                ),
            );
        }
    }
}

/// Scene description combining the board, its inhabitants and the control panel.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Board drawn beneath every component.
    pub board: BoardPresentation,
    /// Board entities in paint order.
    pub components: Vec<Component>,
    /// Clickable controls.
    pub control_panel: ControlPanel,
    /// Single line of feedback shown beneath the board.
    pub status: String,
    /// Colour of the status line.
    pub status_color: Color,
}

impl Scene {
    /// Font size of the status line.
    pub const STATUS_FONT_SIZE: u16 = 22;

    /// Vertical gap between the board and the status line.
    pub const STATUS_MARGIN: i32 = 12;

    /// Window size needed to show the board, status line and panel side by side.
    #[must_use]
    pub fn required_size(&self) -> (i32, i32) {
        let panel = self.control_panel.rect();
        let width = self
            .board
            .width()
            .max(panel.right())
            .saturating_add(ControlPanel::MARGIN);
        let board_and_status = self
            .board
            .height()
            .saturating_add(2 * Self::STATUS_MARGIN + i32::from(Self::STATUS_FONT_SIZE));
        let height = board_and_status.max(panel.bottom() + ControlPanel::MARGIN);
        (width, height)
    }
}

impl Drawable for Scene {
    fn display<S: Surface>(&self, surface: &mut S) {
        self.board.display(surface);
        for component in &self.components {
            component.display(surface);
        }
        self.control_panel.display(surface);

        if !self.status.is_empty() {
            surface.draw_text(
                &self.status,
                self.status_color,
                Point::new(Self::STATUS_MARGIN, self.board.height() + Self::STATUS_MARGIN),
                Self::STATUS_FONT_SIZE,
            );
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in screen pixels.
    pub cursor: Vec2,
    /// Control activated this frame by a click or keyboard shortcut.
    pub action: Option<PanelAction>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting BeeBot scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// A sprite manifest referenced an image name that has no [`SpriteKey`].
    #[error("unknown sprite key `{name}`")]
    UnknownSpriteKey {
        /// Name found in the manifest.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::recording::{DrawCall, RecordingSurface};
    use super::*;
    use beebot_core::{Heading, Sprite};

    const STEP: i32 = 100;

    #[test]
    fn contains_strictly_excludes_every_edge() {
        let rect = ScreenRect::new(Point::new(10, 20), 100, 50);

        assert!(rect.contains_strictly(Vec2::new(11.0, 21.0)));
        assert!(rect.contains_strictly(Vec2::new(109.5, 69.5)));
        for edge in [
            Vec2::new(10.0, 40.0),
            Vec2::new(110.0, 40.0),
            Vec2::new(50.0, 20.0),
            Vec2::new(50.0, 70.0),
            Vec2::new(10.0, 20.0),
        ] {
            assert!(!rect.contains_strictly(edge), "{edge:?} lies on an edge");
        }
        assert!(!rect.contains_strictly(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn component_without_sprite_draws_nothing() {
        let mut surface = RecordingSurface::default();
        Component::new(None, Point::new(1, 1), STEP).display(&mut surface);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn component_blits_at_pixel_position() {
        let mut surface = RecordingSurface::default();
        let goal = Goal::new(Some(Sprite::Static(SpriteId::new(7))), Point::new(2, 3), STEP);

        goal.display(&mut surface);

        assert_eq!(
            surface.calls,
            vec![DrawCall::Blit(SpriteId::new(7), Point::new(200, 300))]
        );
    }

    #[test]
    fn animated_component_draws_the_selected_frame_only() {
        let frames = [SpriteId::new(1), SpriteId::new(2)];
        let mut beebot =
            BeeBot::new(Some(Sprite::Animated(frames)), Point::new(0, 0), Heading::North, STEP);
        let mut surface = RecordingSurface::default();

        beebot.display(&mut surface);
        beebot.advance_sprite();
        beebot.display(&mut surface);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Blit(frames[0], Point::new(0, 0)),
                DrawCall::Blit(frames[1], Point::new(0, 0)),
            ]
        );

        let mut stalled = Component::new(Some(Sprite::Animated(frames)), Point::new(0, 0), STEP);
        stalled.increment_sprite();
        stalled.increment_sprite();
        let mut surface = RecordingSurface::default();
        stalled.display(&mut surface);
        assert!(surface.calls.is_empty(), "frames past the second draw nothing");
    }

    #[test]
    fn sprite_keys_map_to_distinct_handles() {
        for key in SpriteKey::ALL {
            assert_eq!(SpriteKey::from_sprite_id(key.sprite_id()), Some(key));
            assert_eq!(key.name().parse::<SpriteKey>(), Ok(key));
        }
        assert_eq!(
            "Flower".parse::<SpriteKey>(),
            Err(RenderingError::UnknownSpriteKey {
                name: "Flower".to_owned()
            })
        );
    }

    fn board() -> BoardPresentation {
        BoardPresentation {
            columns: 3,
            rows: 2,
            step: STEP,
            fill_color: Color::from_rgb_u8(240, 240, 240),
            line_color: Color::from_rgb_u8(0, 0, 0),
        }
    }

    #[test]
    fn board_draws_background_and_grid_lines() {
        let mut surface = RecordingSurface::default();
        board().display(&mut surface);

        let fills: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill(_, rect) => Some(*rect),
                _ => None,
            })
            .collect();
        // Background, four vertical lines, three horizontal lines.
        assert_eq!(fills.len(), 1 + 4 + 3);
        assert_eq!(fills[0], ScreenRect::new(Point::new(0, 0), 300, 200));
        assert_eq!(fills[4], ScreenRect::new(Point::new(299, 0), 2, 200));
    }

    #[test]
    fn oversized_board_dimensions_saturate() {
        let board = BoardPresentation {
            columns: u32::MAX,
            rows: 3,
            step: 1_500_000_000,
            ..board()
        };

        assert_eq!(board.width(), i32::MAX);
        assert_eq!(board.height(), i32::MAX);
        assert_eq!(board.rect().right(), i32::MAX);
    }

    #[test]
    fn scene_draws_status_below_the_board() {
        let scene = Scene {
            board: board(),
            components: vec![Component::new(
                Some(Sprite::Static(SpriteId::new(3))),
                Point::new(1, 1),
                STEP,
            )],
            control_panel: ControlPanel::new(Point::new(320, 0)),
            status: "Ready".to_owned(),
            status_color: Color::from_rgb_u8(0, 0, 0),
        };
        let mut surface = RecordingSurface::default();

        scene.display(&mut surface);

        assert!(surface
            .calls
            .contains(&DrawCall::Blit(SpriteId::new(3), Point::new(100, 100))));
        assert!(matches!(
            surface.calls.last(),
            Some(DrawCall::Text(text, _, Point { x: 12, y: 212 })) if text == "Ready"
        ));

        let (width, height) = scene.required_size();
        assert!(width > scene.control_panel.rect().right());
        assert!(height >= scene.board.height());
    }
}
