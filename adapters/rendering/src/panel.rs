//! Control panel holding the BeeBot's programming buttons.

use beebot_core::{Instruction, Point};
use glam::Vec2;

use crate::{Arrow, Button, Color, Drawable, ScreenRect, Surface};

const BUTTON_SIZE: i32 = 100;
const TEXT_ROW_HEIGHT: i32 = 50;
const GAP: i32 = 10;

const FOREGROUND: Color = Color::from_rgb_u8(20, 20, 20);
const BACKGROUND: Color = Color::from_rgb_u8(255, 204, 0);

/// Operation requested through the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelAction {
    /// Append an instruction to the BeeBot's memory.
    Record(Instruction),
    /// Run the recorded program.
    Go,
    /// Halt a running program.
    Stop,
    /// Forget the recorded program.
    Clear,
    /// Put the BeeBot back on its starting square.
    Reset,
}

impl PanelAction {
    const fn disabled_while_running(self) -> bool {
        matches!(self, Self::Record(_) | Self::Go | Self::Clear)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PanelButton {
    action: PanelAction,
    button: Button,
}

/// Buttons laid out as a direction pad with a row of text buttons beneath.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPanel {
    origin: Point,
    buttons: Vec<PanelButton>,
    program_running: bool,
}

impl ControlPanel {
    /// Space kept between the panel and the window edges.
    pub const MARGIN: i32 = 20;

    /// Lays the panel out with its top-left corner at `origin`.
    #[must_use]
    pub fn new(origin: Point) -> Self {
        let arrows = [
            (1, 0, Arrow::Forward),
            (0, 1, Arrow::Left),
            (2, 1, Arrow::Right),
            (1, 2, Arrow::Backward),
        ];
        let pad = arrows
            .into_iter()
            .map(|(column, row, arrow)| {
                (column, row, PanelAction::Record(arrow.instruction()), arrow.label())
            })
            .chain(std::iter::once((1, 1, PanelAction::Go, "Go")));
        let text_row = [
            (0, PanelAction::Stop, "Stop"),
            (1, PanelAction::Clear, "Clear"),
            (2, PanelAction::Reset, "Reset"),
        ];

        let cell = |column: i32, row: i32| {
            origin.offset(column * (BUTTON_SIZE + GAP), row * (BUTTON_SIZE + GAP))
        };
        let button = |location: Point, label: &str, height: i32| {
            Button::new(
                Some(label),
                Some(FOREGROUND),
                Some(BACKGROUND),
                location,
                (BUTTON_SIZE, height),
            )
        };

        let buttons = pad
            .map(|(column, row, action, label)| PanelButton {
                action,
                button: button(cell(column, row), label, BUTTON_SIZE),
            })
            .chain(text_row.into_iter().map(|(column, action, label)| PanelButton {
                action,
                button: button(cell(column, 3), label, TEXT_ROW_HEIGHT),
            }))
            .collect();

        Self {
            origin,
            buttons,
            program_running: false,
        }
    }

    /// Screen area covered by the panel.
    #[must_use]
    pub const fn rect(&self) -> ScreenRect {
        ScreenRect::new(
            self.origin,
            3 * BUTTON_SIZE + 2 * GAP,
            3 * (BUTTON_SIZE + GAP) + TEXT_ROW_HEIGHT,
        )
    }

    /// Buttons together with the action each one triggers.
    pub fn buttons(&self) -> impl Iterator<Item = (PanelAction, &Button)> {
        self.buttons
            .iter()
            .map(|entry| (entry.action, &entry.button))
    }

    /// Action of the enabled button under the cursor, if any.
    #[must_use]
    pub fn action_at(&self, cursor: Vec2) -> Option<PanelAction> {
        self.buttons
            .iter()
            .find(|entry| !entry.button.is_swapped() && entry.button.is_mouse_over_button(cursor))
            .map(|entry| entry.action)
    }

    /// Whether the button triggering `action` currently accepts input.
    #[must_use]
    pub fn is_enabled(&self, action: PanelAction) -> bool {
        self.buttons
            .iter()
            .filter(|entry| entry.action == action)
            .all(|entry| !entry.button.is_swapped())
    }

    /// Whether the panel currently shows a running program.
    #[must_use]
    pub const fn is_program_running(&self) -> bool {
        self.program_running
    }

    /// Greys out the programming buttons while a program runs by swapping
    /// their colours, and restores them once it stops.
    pub fn set_program_running(&mut self, running: bool) {
        if running == self.program_running {
            return;
        }
        for entry in &mut self.buttons {
            if entry.action.disabled_while_running() {
                entry.button.swap_colours();
            }
        }
        self.program_running = running;
    }
}

impl Drawable for ControlPanel {
    fn display<S: Surface>(&self, surface: &mut S) {
        for entry in &self.buttons {
            entry.button.display(surface);
        }
    }
}
