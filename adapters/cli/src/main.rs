#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that opens a BeeBot level in a window.

mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use beebot_core::Sprite;
use beebot_rendering::{Color, Presentation, RenderingBackend, SpriteKey};
use beebot_rendering_macroquad::{MacroquadBackend, SpriteAtlas};
use beebot_system_program::{Program, DEFAULT_STEP_INTERVAL};
use beebot_world::{LevelConfig, LevelSprites, World};
use clap::Parser;

use self::session::Session;

const CLEAR_COLOR: Color = Color::from_rgb_u8(235, 235, 235);

/// Program a BeeBot to visit every goal on the board.
#[derive(Debug, Parser)]
#[command(name = "beebot", version)]
struct Cli {
    /// Level description to play; the built-in level is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Sprite manifest listing the images to load.
    #[arg(long, value_name = "PATH", default_value_os_t = SpriteAtlas::default_manifest_path())]
    manifest: PathBuf,

    /// Draw flat placeholder squares instead of loading sprites.
    #[arg(long)]
    no_sprites: bool,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render as fast as possible.
    #[arg(long, overrides_with = "vsync")]
    no_vsync: bool,

    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,

    /// Milliseconds between two replayed instructions.
    #[arg(
        long,
        value_name = "MILLIS",
        default_value_t = DEFAULT_STEP_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    step_ms: u64,
}

impl Cli {
    fn vsync(&self) -> Option<bool> {
        if self.vsync {
            Some(true)
        } else if self.no_vsync {
            Some(false)
        } else {
            None
        }
    }

    fn sprite_manifest(&self) -> Option<PathBuf> {
        (!self.no_sprites).then(|| self.manifest.clone())
    }

    fn level(&self) -> Result<LevelConfig> {
        match &self.level {
            Some(path) => LevelConfig::load(path)
                .with_context(|| format!("failed to load level from {}", path.display())),
            None => Ok(LevelConfig::default()),
        }
    }
}

fn level_sprites() -> LevelSprites {
    LevelSprites {
        beebot: Some(Sprite::Animated([
            SpriteKey::BeeBot.sprite_id(),
            SpriteKey::BeeBotAlternate.sprite_id(),
        ])),
        goal: Some(Sprite::Static(SpriteKey::Goal.sprite_id())),
        obstacle: Some(Sprite::Static(SpriteKey::Obstacle.sprite_id())),
    }
}

/// Entry point for the BeeBot command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.level()?;
    let world = World::from_level(&config, level_sprites())
        .with_context(|| format!("level \"{}\" is not playable", config.name))?;

    let mut session = Session::new(world, Program::new(Duration::from_millis(cli.step_ms)));
    let presentation = Presentation::new(
        format!("BeeBot: {}", config.name),
        CLEAR_COLOR,
        session.scene(),
    );

    let mut backend = MacroquadBackend::new()
        .with_show_fps(cli.show_fps)
        .with_sprite_manifest(cli.sprite_manifest());
    if let Some(vsync) = cli.vsync() {
        backend = backend.with_vsync(vsync);
    }

    backend.run(presentation, move |dt, input, scene| {
        session.update(dt, input, scene);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_use_built_in_level_and_sprites() {
        let cli = Cli::try_parse_from(["beebot"]).expect("defaults parse");

        assert_eq!(cli.level().expect("built-in level"), LevelConfig::default());
        assert_eq!(cli.sprite_manifest(), Some(PathBuf::from("assets/manifest.toml")));
        assert_eq!(cli.vsync(), None);
        assert_eq!(cli.step_ms, 600);
    }

    #[test]
    fn last_vsync_flag_wins() {
        let cli = Cli::try_parse_from(["beebot", "--vsync", "--no-vsync"]).expect("flags parse");
        assert_eq!(cli.vsync(), Some(false));

        let cli = Cli::try_parse_from(["beebot", "--no-vsync", "--vsync"]).expect("flags parse");
        assert_eq!(cli.vsync(), Some(true));
    }

    #[test]
    fn no_sprites_disables_the_manifest() {
        let cli = Cli::try_parse_from(["beebot", "--no-sprites", "--manifest", "other.toml"])
            .expect("flags parse");
        assert_eq!(cli.sprite_manifest(), None);
    }

    #[test]
    fn zero_step_interval_is_rejected() {
        assert!(Cli::try_parse_from(["beebot", "--step-ms", "0"]).is_err());
    }

    #[test]
    fn missing_level_file_reports_its_path() {
        let cli = Cli::try_parse_from(["beebot", "--level", "no/such/level.toml"])
            .expect("flags parse");

        let error = cli.level().expect_err("missing file must fail");
        assert!(error.to_string().contains("no/such/level.toml"));
    }

    #[test]
    fn level_sprites_animate_the_beebot() {
        let sprites = level_sprites();

        assert_eq!(sprites.beebot.map(|sprite| sprite.frame_count()), Some(2));
        assert_eq!(sprites.goal.map(|sprite| sprite.frame_count()), Some(1));
    }
}
