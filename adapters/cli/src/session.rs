//! Glue between the panel, the systems and the world for one play session.

use std::time::Duration;

use beebot_core::{Command, Event, Point};
use beebot_rendering::{
    BoardPresentation, Color, ControlPanel, FrameInput, PanelAction, Scene,
};
use beebot_system_animation::Animation;
use beebot_system_program::Program;
use beebot_world::{apply, query, LevelStatus, World};
use log::warn;

const BOARD_FILL: Color = Color::from_rgb_u8(250, 246, 228);
const GRID_LINES: Color = Color::from_rgb_u8(60, 60, 60);
const STATUS_NEUTRAL: Color = Color::from_rgb_u8(30, 30, 30);
const STATUS_CRASHED: Color = Color::from_rgb_u8(200, 40, 40);
const STATUS_COMPLETED: Color = Color::from_rgb_u8(30, 140, 60);

/// Owns the world and the systems driving it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    program: Program,
    animation: Animation,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    pub(crate) fn new(world: World, program: Program) -> Self {
        Self {
            world,
            program,
            animation: Animation::default(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Builds the first scene shown for the session.
    pub(crate) fn scene(&self) -> Scene {
        let board = query::board(&self.world);
        let mut scene = Scene {
            board: BoardPresentation {
                columns: board.columns(),
                rows: board.rows(),
                step: board.step(),
                fill_color: BOARD_FILL,
                line_color: GRID_LINES,
            },
            components: Vec::new(),
            control_panel: ControlPanel::new(Point::new(
                board.width() + ControlPanel::MARGIN,
                ControlPanel::MARGIN,
            )),
            status: String::new(),
            status_color: STATUS_NEUTRAL,
        };
        self.refresh(&mut scene);
        scene
    }

    /// Processes one frame of input and time, then mirrors the result into `scene`.
    pub(crate) fn update(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        if let Some(action) = input.action {
            self.perform(action);
        }
        self.pump(Command::Tick { dt });
        self.refresh(scene);
    }

    fn perform(&mut self, action: PanelAction) {
        match action {
            PanelAction::Record(instruction) => self.program.record(instruction),
            PanelAction::Go => match query::status(&self.world) {
                LevelStatus::Programming => self.program.start(),
                status => warn!("ignoring Go while the level is {status:?}; reset first"),
            },
            PanelAction::Stop => self.program.stop(),
            PanelAction::Clear => self.program.clear(),
            PanelAction::Reset => {
                self.program.stop();
                self.pump(Command::ResetLevel);
            }
        }
    }

    /// Applies `command` and feeds the resulting events through the systems
    /// until no further commands are produced.
    fn pump(&mut self, command: Command) {
        let mut pending = vec![command];
        while !pending.is_empty() {
            self.events.clear();
            for command in pending.drain(..) {
                apply(&mut self.world, command, &mut self.events);
            }
            self.program.handle(&self.events, &mut self.commands);
            self.animation.handle(&self.events, &mut self.commands);
            std::mem::swap(&mut pending, &mut self.commands);
        }
    }

    fn refresh(&self, scene: &mut Scene) {
        scene.components = query::components(&self.world);
        scene
            .control_panel
            .set_program_running(self.program.is_running());

        let recorded = self.program.instructions().len();
        let (status, colour) = match query::status(&self.world) {
            LevelStatus::Completed => (
                "Level complete! Press Reset to play again.".to_owned(),
                STATUS_COMPLETED,
            ),
            LevelStatus::Crashed => (
                "Crashed! Press Reset to try again.".to_owned(),
                STATUS_CRASHED,
            ),
            LevelStatus::Programming if self.program.is_running() => {
                (format!("Running {recorded} instructions..."), STATUS_NEUTRAL)
            }
            LevelStatus::Programming => (
                format!(
                    "{}: {} of {} goals, {recorded} instructions recorded",
                    query::level_name(&self.world),
                    query::visited_goals(&self.world).len(),
                    query::goals(&self.world).len(),
                ),
                STATUS_NEUTRAL,
            ),
        };
        scene.status = status;
        scene.status_color = colour;
    }
}
