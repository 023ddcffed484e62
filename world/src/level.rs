//! Level descriptions loaded from TOML files.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use beebot_core::{Heading, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest board side, in pixels, a level may request.
pub const MAX_BOARD_PIXELS: i32 = 16_384;

/// Declarative description of a single level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Title shown in the window and status line.
    pub name: String,
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Pixel side length of a single square.
    pub step: i32,
    /// Whether the goals must be visited in the listed order.
    #[serde(default)]
    pub ordered_goals: bool,
    /// Starting placement of the BeeBot.
    pub beebot: BeeBotPlacement,
    /// Squares the BeeBot has to visit.
    pub goals: Vec<Point>,
    /// Squares the BeeBot cannot enter.
    #[serde(default)]
    pub obstacles: Vec<Point>,
}

/// Starting square and heading of the BeeBot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeeBotPlacement {
    /// Square the BeeBot starts on.
    pub position: Point,
    /// Direction the BeeBot initially faces.
    #[serde(default)]
    pub heading: Heading,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: "First steps".to_owned(),
            columns: 5,
            rows: 5,
            step: 100,
            ordered_goals: false,
            beebot: BeeBotPlacement {
                position: Point::new(0, 4),
                heading: Heading::North,
            },
            goals: vec![Point::new(0, 1), Point::new(3, 1)],
            obstacles: vec![Point::new(1, 2), Point::new(2, 2)],
        }
    }
}

impl LevelConfig {
    /// Parses and validates a level from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, LevelError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the level stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks that every entity fits on the board and nothing overlaps an obstacle.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(LevelError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.step <= 0 {
            return Err(LevelError::InvalidStep { step: self.step });
        }
        let fits = |squares: u32| {
            i64::from(squares) * i64::from(self.step) <= i64::from(MAX_BOARD_PIXELS)
        };
        if !fits(self.columns) || !fits(self.rows) {
            return Err(LevelError::BoardTooLarge {
                columns: self.columns,
                rows: self.rows,
                step: self.step,
            });
        }
        if self.goals.is_empty() {
            return Err(LevelError::NoGoals);
        }

        let placed = std::iter::once(("beebot", self.beebot.position))
            .chain(self.goals.iter().map(|goal| ("goal", *goal)))
            .chain(self.obstacles.iter().map(|obstacle| ("obstacle", *obstacle)));
        for (entity, position) in placed {
            if !self.contains(position) {
                return Err(LevelError::OutOfBounds {
                    entity,
                    position,
                    columns: self.columns,
                    rows: self.rows,
                });
            }
        }

        let obstacles: HashSet<Point> = self.obstacles.iter().copied().collect();
        if obstacles.contains(&self.beebot.position) {
            return Err(LevelError::BlockedSquare {
                entity: "beebot",
                position: self.beebot.position,
            });
        }

        let mut seen = HashSet::with_capacity(self.goals.len());
        for goal in &self.goals {
            if obstacles.contains(goal) {
                return Err(LevelError::BlockedSquare {
                    entity: "goal",
                    position: *goal,
                });
            }
            if !seen.insert(*goal) {
                return Err(LevelError::DuplicateGoal { position: *goal });
            }
        }

        Ok(())
    }

    fn contains(&self, position: Point) -> bool {
        u32::try_from(position.x).is_ok_and(|x| x < self.columns)
            && u32::try_from(position.y).is_ok_and(|y| y < self.rows)
    }
}

/// Errors that can occur while loading a level description.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level file {}", path.display())]
    Io {
        /// Location of the level file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The level file is not valid TOML or does not match the level schema.
    #[error("failed to parse level: {0}")]
    Parse(#[from] toml::de::Error),
    /// The board has no squares.
    #[error("board must have at least one column and row (received {columns}x{rows})")]
    EmptyBoard {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Squares must have a positive pixel size.
    #[error("square size must be positive (received {step})")]
    InvalidStep {
        /// Configured square size.
        step: i32,
    },
    /// The board would not fit in a window.
    #[error(
        "{columns}x{rows} board with {step}px squares exceeds {MAX_BOARD_PIXELS}px per side"
    )]
    BoardTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
        /// Configured square size.
        step: i32,
    },
    /// A level without goals can never be completed.
    #[error("level must contain at least one goal")]
    NoGoals,
    /// An entity lies outside the board.
    #[error("{entity} at {position:?} lies outside the {columns}x{rows} board")]
    OutOfBounds {
        /// Kind of entity that was misplaced.
        entity: &'static str,
        /// Square the entity was placed on.
        position: Point,
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The BeeBot or a goal shares its square with an obstacle.
    #[error("{entity} at {position:?} overlaps an obstacle")]
    BlockedSquare {
        /// Kind of entity that overlaps the obstacle.
        entity: &'static str,
        /// Square shared with the obstacle.
        position: Point,
    },
    /// Two goals share the same square.
    #[error("more than one goal placed at {position:?}")]
    DuplicateGoal {
        /// Square holding the duplicated goal.
        position: Point,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"
        name = "Corner to corner"
        columns = 4
        rows = 3
        step = 120
        ordered_goals = true

        [beebot]
        position = { x = 0, y = 2 }
        heading = "East"

        [[goals]]
        x = 3
        y = 2

        [[goals]]
        x = 3
        y = 0

        [[obstacles]]
        x = 1
        y = 1
    "#;

    #[test]
    fn parses_level_file() {
        let level = LevelConfig::from_toml_str(LEVEL).expect("level should parse");

        assert_eq!(level.name, "Corner to corner");
        assert_eq!((level.columns, level.rows, level.step), (4, 3, 120));
        assert!(level.ordered_goals);
        assert_eq!(level.beebot.position, Point::new(0, 2));
        assert_eq!(level.beebot.heading, Heading::East);
        assert_eq!(level.goals, vec![Point::new(3, 2), Point::new(3, 0)]);
        assert_eq!(level.obstacles, vec![Point::new(1, 1)]);
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let level = LevelConfig::from_toml_str(
            r#"
            name = "Minimal"
            columns = 2
            rows = 1
            step = 50
            beebot = { position = { x = 0, y = 0 } }
            goals = [{ x = 1, y = 0 }]
            "#,
        )
        .expect("minimal level should parse");

        assert!(!level.ordered_goals);
        assert_eq!(level.beebot.heading, Heading::North);
        assert!(level.obstacles.is_empty());
    }

    #[test]
    fn default_level_is_valid() {
        LevelConfig::default()
            .validate()
            .expect("built-in level must validate");
    }

    #[test]
    fn rejects_unknown_keys() {
        let contents = format!("{LEVEL}\nspeed = 3\n");
        assert!(matches!(
            LevelConfig::from_toml_str(&contents),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn rejects_entities_outside_the_board() {
        let mut level = LevelConfig::default();
        level.goals.push(Point::new(5, 0));

        assert!(matches!(
            level.validate(),
            Err(LevelError::OutOfBounds {
                entity: "goal",
                position: Point { x: 5, y: 0 },
                ..
            })
        ));

        let mut level = LevelConfig::default();
        level.beebot.position = Point::new(-1, 0);
        assert!(matches!(
            level.validate(),
            Err(LevelError::OutOfBounds {
                entity: "beebot",
                ..
            })
        ));
    }

    #[test]
    fn rejects_goals_on_obstacles_and_duplicates() {
        let mut level = LevelConfig::default();
        level.goals.push(level.obstacles[0]);
        assert!(matches!(
            level.validate(),
            Err(LevelError::BlockedSquare { entity: "goal", .. })
        ));

        let mut level = LevelConfig::default();
        level.goals.push(level.goals[0]);
        assert!(matches!(
            level.validate(),
            Err(LevelError::DuplicateGoal { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_boards() {
        let level = LevelConfig {
            columns: 0,
            ..LevelConfig::default()
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::EmptyBoard { columns: 0, .. })
        ));

        let level = LevelConfig {
            step: 0,
            ..LevelConfig::default()
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::InvalidStep { step: 0 })
        ));

        let level = LevelConfig {
            goals: Vec::new(),
            ..LevelConfig::default()
        };
        assert!(matches!(level.validate(), Err(LevelError::NoGoals)));
    }

    #[test]
    fn rejects_boards_wider_than_a_window() {
        let level = LevelConfig {
            columns: 3,
            rows: 1,
            step: 1_500_000_000,
            beebot: BeeBotPlacement {
                position: Point::new(0, 0),
                heading: Heading::East,
            },
            goals: vec![Point::new(2, 0)],
            obstacles: Vec::new(),
            ..LevelConfig::default()
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::BoardTooLarge {
                columns: 3,
                rows: 1,
                step: 1_500_000_000,
            })
        ));

        let tall = LevelConfig {
            rows: u32::MAX,
            ..LevelConfig::default()
        };
        assert!(matches!(
            tall.validate(),
            Err(LevelError::BoardTooLarge { .. })
        ));

        let edge = LevelConfig {
            step: MAX_BOARD_PIXELS / 5,
            ..LevelConfig::default()
        };
        edge.validate().expect("a board just inside the limit is accepted");
    }

    #[test]
    fn load_reports_missing_file() {
        let error = LevelConfig::load("does/not/exist.toml").expect_err("missing file");
        assert!(matches!(error, LevelError::Io { .. }));
        assert!(error.to_string().contains("does/not/exist.toml"));
    }
}
