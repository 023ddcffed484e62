//! Board entities drawn on top of the board squares.

use crate::{Heading, Point, Sprite, SpriteId};

/// Presentation state shared by every board entity.
///
/// The pixel position is derived from the logical position and the step size
/// given at construction and is never stored independently of it.
#[derive(Clone, Debug)]
pub struct Component {
    sprite: Option<Sprite>,
    logical_position: Point,
    screen_location: Point,
    step: i32,
    sprite_count: u32,
}

impl Component {
    /// Creates a component on the square `start_logical_position`, with squares
    /// `step` pixels wide.
    #[must_use]
    pub fn new(sprite: Option<Sprite>, start_logical_position: Point, step: i32) -> Self {
        Self {
            sprite,
            logical_position: start_logical_position,
            screen_location: start_logical_position.scale(step),
            step,
            sprite_count: 0,
        }
    }

    /// Sprite shown for the component, if any.
    #[must_use]
    pub const fn sprite(&self) -> Option<Sprite> {
        self.sprite
    }

    /// Board square currently occupied by the component.
    #[must_use]
    pub const fn logical_position(&self) -> Point {
        self.logical_position
    }

    /// Top-left pixel position of the component.
    #[must_use]
    pub const fn screen_location(&self) -> Point {
        self.screen_location
    }

    /// Pixel side length of a board square.
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Animation frame counter.
    #[must_use]
    pub const fn sprite_count(&self) -> u32 {
        self.sprite_count
    }

    /// Moves the component to another square, keeping the pixel position in sync.
    pub fn move_to(&mut self, logical_position: Point) {
        self.logical_position = logical_position;
        self.screen_location = logical_position.scale(self.step);
    }

    /// Advances the animation frame counter by one.
    ///
    /// The counter does not wrap; frames past the last one render nothing
    /// until [`reset_sprite`](Self::reset_sprite) is called.
    pub fn increment_sprite(&mut self) {
        self.sprite_count = self.sprite_count.saturating_add(1);
    }

    /// Returns the animation to its first frame.
    pub fn reset_sprite(&mut self) {
        self.sprite_count = 0;
    }

    /// Image that should be drawn this frame.
    ///
    /// Returns `None` when no sprite is assigned, or when an animated sprite's
    /// frame counter points past its two frames.
    #[must_use]
    pub fn current_frame(&self) -> Option<SpriteId> {
        match self.sprite? {
            Sprite::Static(id) => Some(id),
            Sprite::Animated(frames) => match self.sprite_count {
                0 => Some(frames[0]),
                1 => Some(frames[1]),
                _ => None,
            },
        }
    }
}

/// Two components are equal when they show the same sprite at the same pixel
/// position. Logical position and animation frame are not compared.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.sprite == other.sprite && self.screen_location == other.screen_location
    }
}

impl Eq for Component {}

/// Capability shared by everything placed on the board.
pub trait BoardEntity {
    /// Presentation state backing the entity.
    fn component(&self) -> &Component;

    /// Board square currently occupied by the entity.
    fn logical_position(&self) -> Point {
        self.component().logical_position()
    }
}

impl BoardEntity for Component {
    fn component(&self) -> &Component {
        self
    }
}

/// Square the player is asked to visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal(Component);

impl Goal {
    /// Creates a goal on the provided square.
    #[must_use]
    pub fn new(sprite: Option<Sprite>, position: Point, step: i32) -> Self {
        Self(Component::new(sprite, position, step))
    }
}

impl BoardEntity for Goal {
    fn component(&self) -> &Component {
        &self.0
    }
}

/// Square the BeeBot cannot enter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstacle(Component);

impl Obstacle {
    /// Creates an obstacle on the provided square.
    #[must_use]
    pub fn new(sprite: Option<Sprite>, position: Point, step: i32) -> Self {
        Self(Component::new(sprite, position, step))
    }
}

impl BoardEntity for Obstacle {
    fn component(&self) -> &Component {
        &self.0
    }
}

/// The programmable robot.
#[derive(Clone, Debug)]
pub struct BeeBot {
    component: Component,
    heading: Heading,
    start_position: Point,
    start_heading: Heading,
    crashed: bool,
}

impl BeeBot {
    /// Creates a BeeBot standing on `position`, facing `heading`.
    #[must_use]
    pub fn new(sprite: Option<Sprite>, position: Point, heading: Heading, step: i32) -> Self {
        Self {
            component: Component::new(sprite, position, step),
            heading,
            start_position: position,
            start_heading: heading,
            crashed: false,
        }
    }

    /// Direction the BeeBot is facing.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Whether the BeeBot has run into an obstacle or the board edge.
    #[must_use]
    pub const fn is_crashed(&self) -> bool {
        self.crashed
    }

    /// Square directly ahead of the BeeBot, or behind it when `backwards` is set.
    #[must_use]
    pub fn square_ahead(&self, backwards: bool) -> Point {
        let heading = if backwards {
            self.heading.reversed()
        } else {
            self.heading
        };
        let (dx, dy) = heading.offset();
        self.component.logical_position().offset(dx, dy)
    }

    /// Rotates the BeeBot in place.
    pub fn face(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Moves the BeeBot to another square.
    pub fn move_to(&mut self, position: Point) {
        self.component.move_to(position);
    }

    /// Marks the BeeBot as crashed.
    pub fn crash(&mut self) {
        self.crashed = true;
    }

    /// Advances the animation by one frame, looping back after the last frame.
    pub fn advance_sprite(&mut self) {
        let frames = self.component.sprite().map_or(1, |sprite| sprite.frame_count());
        if self.component.sprite_count().saturating_add(1) >= frames {
            self.component.reset_sprite();
        } else {
            self.component.increment_sprite();
        }
    }

    /// Restores the starting square, heading and animation frame.
    pub fn reset(&mut self) {
        self.component.move_to(self.start_position);
        self.component.reset_sprite();
        self.heading = self.start_heading;
        self.crashed = false;
    }
}

impl BoardEntity for BeeBot {
    fn component(&self) -> &Component {
        &self.component
    }
}
