//! Clickable screen buttons showing either a label or an arrow icon.

use beebot_core::{Instruction, Point};
use glam::Vec2;

use crate::{Color, Drawable, ScreenRect, Surface};

/// Font size used for button labels.
pub const BUTTON_FONT_SIZE: u16 = 22;

/// Arrow icons drawn in place of the label on the four movement buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrow {
    /// Upward arrow.
    Forward,
    /// Arrow curling to the left.
    Left,
    /// Arrow curling to the right.
    Right,
    /// Downward arrow.
    Backward,
}

const FORWARD: [(i32, i32); 7] = [
    (20, -20),
    (0, -40),
    (-20, -20),
    (-10, -20),
    (-10, 40),
    (10, 40),
    (10, -20),
];

const LEFT: [(i32, i32); 11] = [
    (-20, -40),
    (-40, -20),
    (-20, 0),
    (-20, -10),
    (10, -10),
    (10, 20),
    (-30, 20),
    (-30, 40),
    (30, 40),
    (30, -30),
    (-20, -30),
];

const RIGHT: [(i32, i32); 11] = [
    (20, -40),
    (40, -20),
    (20, 0),
    (20, -10),
    (-10, -10),
    (-10, 20),
    (30, 20),
    (30, 40),
    (-30, 40),
    (-30, -30),
    (20, -30),
];

const BACKWARD: [(i32, i32); 7] = [
    (20, 20),
    (0, 40),
    (-20, 20),
    (-10, 20),
    (-10, -40),
    (10, -40),
    (10, 20),
];

impl Arrow {
    /// Arrow associated with a button label, if the label names one.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Forward" => Some(Self::Forward),
            "Turn Left" => Some(Self::Left),
            "Turn Right" => Some(Self::Right),
            "Backward" => Some(Self::Backward),
            _ => None,
        }
    }

    /// Label that selects this arrow.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Left => "Turn Left",
            Self::Right => "Turn Right",
            Self::Backward => "Backward",
        }
    }

    /// Instruction the arrow stands for.
    #[must_use]
    pub const fn instruction(self) -> Instruction {
        match self {
            Self::Forward => Instruction::Forward,
            Self::Left => Instruction::TurnLeft,
            Self::Right => Instruction::TurnRight,
            Self::Backward => Instruction::Backward,
        }
    }

    /// Outline relative to the button centre.
    #[must_use]
    pub const fn outline(self) -> &'static [(i32, i32)] {
        match self {
            Self::Forward => &FORWARD,
            Self::Left => &LEFT,
            Self::Right => &RIGHT,
            Self::Backward => &BACKWARD,
        }
    }

    fn vertices_around(self, center: Point) -> Vec<Point> {
        self.outline()
            .iter()
            .map(|&(dx, dy)| center.offset(dx, dy))
            .collect()
    }
}

/// A clickable rectangle showing a label or an arrow.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    text: Option<String>,
    text_colour: Option<Color>,
    background_colour: Option<Color>,
    rect: ScreenRect,
    vertices: Vec<Point>,
    swapped: bool,
}

impl Button {
    /// Creates a button whose top-left corner sits at `screen_location`.
    ///
    /// The labels "Forward", "Turn Left", "Turn Right" and "Backward" are
    /// drawn as arrows instead of text.
    #[must_use]
    pub fn new(
        text: Option<&str>,
        text_colour: Option<Color>,
        background_colour: Option<Color>,
        screen_location: Point,
        size: (i32, i32),
    ) -> Self {
        let rect = ScreenRect::new(screen_location, size.0, size.1);
        let vertices = text
            .and_then(Arrow::from_label)
            .map(|arrow| arrow.vertices_around(rect.center()))
            .unwrap_or_default();

        Self {
            text: text.map(str::to_owned),
            text_colour,
            background_colour,
            rect,
            vertices,
            swapped: false,
        }
    }

    /// Label the button was created with.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Colour of the label or arrow.
    #[must_use]
    pub const fn text_colour(&self) -> Option<Color> {
        self.text_colour
    }

    /// Colour filling the button rectangle.
    #[must_use]
    pub const fn background_colour(&self) -> Option<Color> {
        self.background_colour
    }

    /// Screen area covered by the button.
    #[must_use]
    pub const fn rect(&self) -> ScreenRect {
        self.rect
    }

    /// Arrow outline in screen pixels; empty for text buttons.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Whether the colours are currently swapped.
    #[must_use]
    pub const fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Exchanges the label and background colours.
    pub fn swap_colours(&mut self) {
        std::mem::swap(&mut self.text_colour, &mut self.background_colour);
        self.swapped = !self.swapped;
    }

    /// Whether the cursor lies strictly inside the button.
    #[must_use]
    pub fn is_mouse_over_button(&self, mouse_position: Vec2) -> bool {
        self.rect.contains_strictly(mouse_position)
    }
}

impl Drawable for Button {
    fn display<S: Surface>(&self, surface: &mut S) {
        if let Some(background) = self.background_colour {
            surface.fill(background, self.rect);
        }

        if !self.vertices.is_empty() {
            if let Some(colour) = self.text_colour {
                surface.fill_polygon(colour, &self.vertices);
            }
            return;
        }

        let (Some(text), Some(colour)) = (self.text.as_deref(), self.text_colour) else {
            return;
        };
        let (width, height) = surface.measure_text(text, BUTTON_FONT_SIZE);
        let center = self.rect.center();
        let top_left = Point::new(center.x - width / 2, center.y - height / 2);
        surface.draw_text(text, colour, top_left, BUTTON_FONT_SIZE);
    }
}
