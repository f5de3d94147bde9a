//! Menu command dispatcher
//!
//! Runs once per acquisition loop iteration with the latest button states.
//! Only release edges act, and at most one action is taken per call:
//!
//! - Home toggles the menu, whatever else is going on
//! - With the menu shown, Up/Down move the cursor and Left/Right/A step
//!   the setting on the highlighted line or trigger its action
//! - With the menu hidden, nothing happens here; the matrix handler
//!   forwards the buttons to the console

use crate::input::{Button, ButtonSet, ButtonTracker};
use crate::settings::Settings;
use crate::traits::{ConsoleReset, Overlay};

use super::lines::{render_menu, MenuLine};

/// Action taken by one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Show or hide the menu
    ToggleMenu,
    /// Move the cursor up (-1) or down (+1)
    MoveCursor(i8),
    ChangeScheme(i8),
    ChangeBorder(i8),
    ChangeEffect(i8),
    ChangeAccent(i8),
    /// Pulse the console reset line
    ResetConsole,
    /// Hide the menu from its Exit line
    CloseMenu,
}

/// Routes button releases to the menu, the settings and the reset line
pub struct Dispatcher<'a, O: Overlay, R: ConsoleReset> {
    settings: &'a Settings,
    overlay: O,
    reset: R,
    tracker: ButtonTracker,
}

impl<'a, O: Overlay, R: ConsoleReset> Dispatcher<'a, O, R> {
    /// Create a dispatcher and render the initial menu text
    pub fn new(settings: &'a Settings, mut overlay: O, reset: R) -> Self {
        render_menu(&mut overlay, settings);
        Self {
            settings,
            overlay,
            reset,
            tracker: ButtonTracker::new(),
        }
    }

    /// Handle one set of button states
    pub fn dispatch(&mut self, buttons: ButtonSet) -> Option<MenuAction> {
        self.tracker.update(buttons);
        let action = self.decide();
        if let Some(action) = action {
            self.apply(action);
        }
        self.tracker.latch();
        action
    }

    fn decide(&self) -> Option<MenuAction> {
        let released = |b| self.tracker.was_released(b);

        if released(Button::Home) {
            return Some(MenuAction::ToggleMenu);
        }
        if !self.overlay.is_enabled() {
            return None;
        }

        if released(Button::Down) {
            Some(MenuAction::MoveCursor(1))
        } else if released(Button::Up) {
            Some(MenuAction::MoveCursor(-1))
        } else if released(Button::Right) || released(Button::Left) || released(Button::A) {
            let step = if released(Button::Left) { -1 } else { 1 };
            let action = match MenuLine::from_index(self.overlay.active_line())? {
                MenuLine::ColorScheme => MenuAction::ChangeScheme(step),
                MenuLine::BorderColor => MenuAction::ChangeBorder(step),
                MenuLine::Effects => MenuAction::ChangeEffect(step),
                MenuLine::FxScheme => MenuAction::ChangeAccent(step),
                MenuLine::ResetConsole => MenuAction::ResetConsole,
                MenuLine::Exit => MenuAction::CloseMenu,
            };
            Some(action)
        } else {
            None
        }
    }

    fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::ToggleMenu => {
                self.overlay.toggle();
                if self.overlay.is_enabled() {
                    render_menu(&mut self.overlay, self.settings);
                }
            }
            MenuAction::MoveCursor(step) => {
                self.overlay.change_line(step);
                self.overlay.update_framebuffer();
            }
            MenuAction::ChangeScheme(step) => {
                self.settings.change_scheme(step);
                render_menu(&mut self.overlay, self.settings);
            }
            MenuAction::ChangeBorder(step) => {
                self.settings.change_border(step);
                render_menu(&mut self.overlay, self.settings);
            }
            MenuAction::ChangeEffect(step) => {
                self.settings.change_effect(step);
                render_menu(&mut self.overlay, self.settings);
            }
            MenuAction::ChangeAccent(step) => {
                self.settings.change_accent(step);
                render_menu(&mut self.overlay, self.settings);
            }
            MenuAction::ResetConsole => self.reset.reset(),
            MenuAction::CloseMenu => self.overlay.set_enabled(false),
        }
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }
}
