#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for BeeBot.

mod level;

use beebot_core::{
    BeeBot, BoardEntity, Command, Event, Goal, GoalGroup, Instruction, Obstacle, Point, Sprite,
};
use log::{debug, info};

pub use level::{BeeBotPlacement, LevelConfig, LevelError, MAX_BOARD_PIXELS};

/// Sprites assigned to each kind of board entity when a level is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelSprites {
    /// Sprite used for the BeeBot.
    pub beebot: Option<Sprite>,
    /// Sprite used for every goal.
    pub goal: Option<Sprite>,
    /// Sprite used for every obstacle.
    pub obstacle: Option<Sprite>,
}

/// Dimensions of the square board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    columns: u32,
    rows: u32,
    step: i32,
}

impl Board {
    pub(crate) const fn new(columns: u32, rows: u32, step: i32) -> Self {
        Self {
            columns,
            rows,
            step,
        }
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Pixel side length of a single square.
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

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

    /// Whether the square lies on the board.
    #[must_use]
    pub fn contains(&self, square: Point) -> bool {
        u32::try_from(square.x).is_ok_and(|x| x < self.columns)
            && u32::try_from(square.y).is_ok_and(|y| y < self.rows)
    }
}

/// Pixel length covered by `squares` squares, saturating at `i32::MAX`.
fn span(squares: u32, step: i32) -> i32 {
    i32::try_from(squares).map_or(i32::MAX, |squares| squares.saturating_mul(step))
}

/// Progress of the current attempt at the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelStatus {
    /// The BeeBot is waiting for, or carrying out, instructions.
    Programming,
    /// The BeeBot ran into an obstacle or the board edge.
    Crashed,
    /// Every goal was visited as required.
    Completed,
}

/// Represents the authoritative BeeBot level state.
#[derive(Debug)]
pub struct World {
    name: String,
    board: Board,
    beebot: BeeBot,
    goals: GoalGroup,
    visited: GoalGroup,
    obstacles: Vec<Obstacle>,
    completed: bool,
}

impl World {
    /// Creates the built-in level without sprites.
    #[must_use]
    pub fn new() -> Self {
        Self::build(&LevelConfig::default(), LevelSprites::default())
    }

    /// Validates the level description and builds a world from it.
    pub fn from_level(config: &LevelConfig, sprites: LevelSprites) -> Result<Self, LevelError> {
        config.validate()?;
        Ok(Self::build(config, sprites))
    }

    fn build(config: &LevelConfig, sprites: LevelSprites) -> Self {
        let step = config.step;
        let mut goals = GoalGroup::with_ordering(config.ordered_goals);
        goals.extend(
            config
                .goals
                .iter()
                .map(|position| Goal::new(sprites.goal, *position, step)),
        );
        let obstacles = config
            .obstacles
            .iter()
            .map(|position| Obstacle::new(sprites.obstacle, *position, step))
            .collect();

        info!(
            "loaded level '{}' ({}x{}, {} goals, {} obstacles)",
            config.name,
            config.columns,
            config.rows,
            config.goals.len(),
            config.obstacles.len()
        );

        Self {
            name: config.name.clone(),
            board: Board::new(config.columns, config.rows, step),
            beebot: BeeBot::new(
                sprites.beebot,
                config.beebot.position,
                config.beebot.heading,
                step,
            ),
            goals,
            visited: GoalGroup::with_ordering(config.ordered_goals),
            obstacles,
            completed: false,
        }
    }

    fn is_blocked(&self, square: Point) -> bool {
        !self.board.contains(square)
            || self
                .obstacles
                .iter()
                .any(|obstacle| obstacle.logical_position() == square)
    }

    fn step_beebot(&mut self, backwards: bool, out_events: &mut Vec<Event>) {
        let from = self.beebot.logical_position();
        let to = self.beebot.square_ahead(backwards);

        if self.is_blocked(to) {
            self.beebot.crash();
            info!("beebot crashed moving from {from:?} to {to:?}");
            out_events.push(Event::BeeBotCrashed { at: to });
            return;
        }

        self.beebot.move_to(to);
        out_events.push(Event::BeeBotMoved { from, to });

        let Some(goal) = self.goals.goal_at(to).cloned() else {
            return;
        };
        if self.visited.contains(&goal) {
            return;
        }
        if self.goals.is_ordered && self.goals.iter().nth(self.visited.len()) != Some(&goal) {
            debug!("goal at {to:?} reached out of order; not counted");
            return;
        }

        self.visited.add(goal);
        debug!("goal reached at {to:?}");
        out_events.push(Event::GoalReached { position: to });

        if self.visited == self.goals {
            self.completed = true;
            info!("level '{}' completed", self.name);
            out_events.push(Event::LevelCompleted);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::Execute { instruction } => {
            if world.completed || world.beebot.is_crashed() {
                debug!("ignoring {instruction:?}: level is no longer accepting instructions");
                return;
            }

            match instruction {
                Instruction::Forward => world.step_beebot(false, out_events),
                Instruction::Backward => world.step_beebot(true, out_events),
                Instruction::TurnLeft | Instruction::TurnRight => {
                    let heading = if instruction == Instruction::TurnLeft {
                        world.beebot.heading().turned_left()
                    } else {
                        world.beebot.heading().turned_right()
                    };
                    world.beebot.face(heading);
                    out_events.push(Event::BeeBotTurned { heading });
                }
            }
        }
        Command::ResetLevel => {
            world.beebot.reset();
            world.visited.clear();
            world.completed = false;
            debug!("level '{}' reset", world.name);
            out_events.push(Event::LevelReset);
        }
        Command::AdvanceSprite => {
            world.beebot.advance_sprite();
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use beebot_core::{BeeBot, BoardEntity, Component, GoalGroup, Obstacle};

    use super::{Board, LevelStatus, World};

    /// Name of the level being played.
    #[must_use]
    pub fn level_name(world: &World) -> &str {
        &world.name
    }

    /// Dimensions of the board.
    #[must_use]
    pub fn board(world: &World) -> Board {
        world.board
    }

    /// Provides read-only access to the BeeBot.
    #[must_use]
    pub fn beebot(world: &World) -> &BeeBot {
        &world.beebot
    }

    /// Goals the level asks the player to visit.
    #[must_use]
    pub fn goals(world: &World) -> &GoalGroup {
        &world.goals
    }

    /// Goals visited so far during the current attempt.
    #[must_use]
    pub fn visited_goals(world: &World) -> &GoalGroup {
        &world.visited
    }

    /// Obstacles placed on the board.
    #[must_use]
    pub fn obstacles(world: &World) -> &[Obstacle] {
        &world.obstacles
    }

    /// Progress of the current attempt.
    #[must_use]
    pub fn status(world: &World) -> LevelStatus {
        if world.completed {
            LevelStatus::Completed
        } else if world.beebot.is_crashed() {
            LevelStatus::Crashed
        } else {
            LevelStatus::Programming
        }
    }

    /// Components of every board entity in paint order: obstacles, goals, BeeBot.
    #[must_use]
    pub fn components(world: &World) -> Vec<Component> {
        obstacles(world)
            .iter()
            .map(|obstacle| obstacle.component().clone())
            .chain(goals(world).iter().map(|goal| goal.component().clone()))
            .chain(std::iter::once(beebot(world).component().clone()))
            .collect()
    }
}
