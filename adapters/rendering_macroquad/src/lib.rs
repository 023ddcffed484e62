#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for BeeBot.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod sprites;
mod surface;

use anyhow::{Context, Result};
use beebot_core::Instruction;
use beebot_rendering::{
    ControlPanel, Drawable, FrameInput, PanelAction, Presentation, RenderingBackend,
};
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position, KeyCode,
    MouseButton,
};
use std::{path::PathBuf, sync::mpsc, time::Duration};

pub use self::sprites::SpriteAtlas;
use self::surface::MacroquadSurface;

/// Pairs mouse presses with releases so a click only fires when both land on
/// the same enabled button.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlPanelInputState {
    pressed: Option<PanelAction>,
}

impl ControlPanelInputState {
    /// Records the button under the cursor when the mouse button went down.
    pub fn press(&mut self, target: Option<PanelAction>) {
        self.pressed = target;
    }

    /// Returns the clicked action when the release happens over the pressed
    /// button, clearing the latch either way.
    pub fn release(&mut self, target: Option<PanelAction>) -> Option<PanelAction> {
        let pressed = self.pressed.take()?;
        (target == Some(pressed)).then_some(pressed)
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Panel action bound to a key pressed this frame.
    action: Option<PanelAction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self::from_pressed(is_key_pressed)
    }

    fn from_pressed(pressed: impl Fn(KeyCode) -> bool) -> Self {
        let quit_requested = pressed(KeyCode::Escape) || pressed(KeyCode::Q);
        let bindings = [
            (KeyCode::Up, PanelAction::Record(Instruction::Forward)),
            (KeyCode::Down, PanelAction::Record(Instruction::Backward)),
            (KeyCode::Left, PanelAction::Record(Instruction::TurnLeft)),
            (KeyCode::Right, PanelAction::Record(Instruction::TurnRight)),
            (KeyCode::Enter, PanelAction::Go),
            (KeyCode::Space, PanelAction::Stop),
            (KeyCode::Backspace, PanelAction::Clear),
            (KeyCode::R, PanelAction::Reset),
        ];
        let action = bindings
            .into_iter()
            .find(|(key, _)| pressed(*key))
            .map(|(_, action)| action);

        Self {
            quit_requested,
            action,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            sprite_manifest: Some(SpriteAtlas::default_manifest_path()),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Selects the sprite manifest to load; `None` draws placeholder squares instead.
    #[must_use]
    pub fn with_sprite_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.sprite_manifest = manifest;
        self
    }
}

/// Averages the frame rate over one-second windows.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut beebot_rendering::Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            sprite_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let (window_width, window_height) = scene.required_size();
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = match sprite_manifest {
                Some(path) => match SpriteAtlas::from_manifest_path(&path)
                    .context("failed to initialise sprite atlas")
                {
                    Ok(atlas) => {
                        log::info!(
                            "loaded {} sprites from {}",
                            atlas.texture_count(),
                            path.display()
                        );
                        Some(atlas)
                    }
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                },
                None => {
                    log::info!("sprite loading disabled; drawing placeholders");
                    None
                }
            };
            let _ = atlas_init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut panel_input = ControlPanelInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    log::info!("quit requested");
                    break;
                }

                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let frame_input =
                    gather_frame_input(&scene.control_panel, &mut panel_input, keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);
                let mut surface = MacroquadSurface::new(sprite_atlas.as_ref(), scene.board.step);
                scene.display(&mut surface);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        log::info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn gather_frame_input(
    panel: &ControlPanel,
    panel_input: &mut ControlPanelInputState,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let cursor = Vec2::new(cursor_x, cursor_y);

    if is_mouse_button_pressed(MouseButton::Left) {
        panel_input.press(panel.action_at(cursor));
    }
    let clicked = if is_mouse_button_released(MouseButton::Left) {
        panel_input.release(panel.action_at(cursor))
    } else {
        None
    };

    FrameInput {
        cursor,
        action: clicked.or_else(|| keyboard.action.filter(|action| panel.is_enabled(*action))),
    }
}

fn to_macroquad_color(color: beebot_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
