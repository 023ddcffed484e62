#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the BeeBot game.
//!
//! This crate defines the board entities and the message surface that connects
//! adapters, the authoritative world, and pure systems. Adapters and systems
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically.

mod component;
mod goal_group;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use component::{BeeBot, BoardEntity, Component, Goal, Obstacle};
pub use goal_group::GoalGroup;

/// Two-dimensional integer coordinate used for both board squares and pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component, growing to the right.
    pub x: i32,
    /// Vertical component, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a new point from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Multiplies both components by `step`.
    #[must_use]
    pub const fn scale(self, step: i32) -> Self {
        Self {
            x: self.x * step,
            y: self.y * step,
        }
    }

    /// Translates the point by the provided offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Direction the BeeBot is facing on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing row indices.
    #[default]
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
    /// Facing toward decreasing column indices.
    West,
}

impl Heading {
    /// Heading obtained after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Heading obtained after a quarter turn clockwise.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Unit offset of a single square step in this heading.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Single instruction the player can store in the BeeBot's memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Move one square along the current heading.
    Forward,
    /// Move one square against the current heading.
    Backward,
    /// Rotate a quarter turn counter-clockwise without moving.
    TurnLeft,
    /// Rotate a quarter turn clockwise without moving.
    TurnRight,
}

/// Opaque handle to a loaded sprite image.
///
/// Handle equality stands in for image identity: two components showing the
/// same handle show the same image, no pixel comparison is performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(u32);

impl SpriteId {
    /// Creates a new sprite handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

/// Image shown for a board entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// A single image drawn every frame.
    Static(SpriteId),
    /// Two alternating frames selected by the owning component's frame counter.
    Animated([SpriteId; 2]),
}

impl Sprite {
    /// Number of frames contained in the sprite.
    #[must_use]
    pub const fn frame_count(&self) -> u32 {
        match self {
            Self::Static(_) => 1,
            Self::Animated(frames) => frames.len() as u32,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the BeeBot carry out a single instruction.
    Execute {
        /// Instruction taken from the BeeBot's memory.
        instruction: Instruction,
    },
    /// Puts the BeeBot back on its starting square and forgets visited goals.
    ResetLevel,
    /// Advances the BeeBot's animation to its next frame, looping after the last.
    AdvanceSprite,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the BeeBot moved between two squares.
    BeeBotMoved {
        /// Square occupied before moving.
        from: Point,
        /// Square occupied after moving.
        to: Point,
    },
    /// Confirms that the BeeBot rotated in place.
    BeeBotTurned {
        /// Heading after the rotation.
        heading: Heading,
    },
    /// Reports that the BeeBot tried to enter a blocked or off-board square.
    BeeBotCrashed {
        /// Square the BeeBot attempted to enter.
        at: Point,
    },
    /// Confirms that the BeeBot landed on a goal it had not visited yet.
    GoalReached {
        /// Square holding the goal.
        position: Point,
    },
    /// Announces that the visited goals match the level's target configuration.
    LevelCompleted,
    /// Confirms that the level returned to its starting configuration.
    LevelReset,
}
