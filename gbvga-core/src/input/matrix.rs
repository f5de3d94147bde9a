//! Button matrix mirroring
//!
//! The console scans its buttons as a 2x4 matrix. It pulls one select line
//! low to read the direction keys and the other to read the action keys,
//! and samples four shared return lines. We sit on the return lines:
//!
//! | Select event        | RIGHT_A | LEFT_B | UP_SELECT | DOWN_START |
//! |---------------------|---------|--------|-----------|------------|
//! | P14 falling         | Right   | Left   | Up        | Down       |
//! | P14 rising          | A       | B      | Select    | Start      |
//! | P15 rising          | released on all four                      |
//!
//! Outputs are active-low. The handler runs from a pin interrupt and must
//! not block.

use gbvga_hal::OutputPin;

use super::buttons::{Button, ButtonSet};

/// Select line transition reported by the console's matrix scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixEvent {
    /// Direction keys requested (P14 falling)
    DirectionSelect,
    /// Action keys requested (P14 rising)
    ActionSelect,
    /// Scan cycle finished (P15 rising)
    ScanComplete,
}

/// Levels for the four return lines; `true` is high, i.e. released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixLevels {
    pub right_a: bool,
    pub left_b: bool,
    pub up_select: bool,
    pub down_start: bool,
}

impl MatrixLevels {
    /// Every line released
    pub const RELEASED: Self = Self {
        right_a: true,
        left_b: true,
        up_select: true,
        down_start: true,
    };

    /// Levels for the given event and button states
    ///
    /// While the menu is shown nothing reaches the console.
    pub fn for_event(event: MatrixEvent, buttons: ButtonSet, menu_open: bool) -> Self {
        if menu_open {
            return Self::RELEASED;
        }
        match event {
            MatrixEvent::DirectionSelect => Self::from_keys(buttons, [
                Button::Right,
                Button::Left,
                Button::Up,
                Button::Down,
            ]),
            MatrixEvent::ActionSelect => Self::from_keys(release_lockup_combo(buttons), [
                Button::A,
                Button::B,
                Button::Select,
                Button::Start,
            ]),
            MatrixEvent::ScanComplete => Self::RELEASED,
        }
    }

    fn from_keys(buttons: ButtonSet, keys: [Button; 4]) -> Self {
        Self {
            right_a: !buttons.is_pressed(keys[0]),
            left_b: !buttons.is_pressed(keys[1]),
            up_select: !buttons.is_pressed(keys[2]),
            down_start: !buttons.is_pressed(keys[3]),
        }
    }
}

/// A, B, Select and Start held together
pub const LOCKUP_COMBO: ButtonSet = ButtonSet::NONE
    .with(Button::A, true)
    .with(Button::B, true)
    .with(Button::Select, true)
    .with(Button::Start, true);

/// Release A, B, Select and Start if all four are held
///
/// Some games soft-reset on that combination and then wait for it to be
/// released, which a held wireless pad never does.
pub fn release_lockup_combo(buttons: ButtonSet) -> ButtonSet {
    if buttons.contains(LOCKUP_COMBO) {
        buttons.without(LOCKUP_COMBO)
    } else {
        buttons
    }
}

/// The four matrix return line outputs
pub struct ButtonMatrix<P: OutputPin> {
    right_a: P,
    left_b: P,
    up_select: P,
    down_start: P,
}

impl<P: OutputPin> ButtonMatrix<P> {
    /// Take the outputs and drive them released
    pub fn new(right_a: P, left_b: P, up_select: P, down_start: P) -> Self {
        let mut matrix = Self {
            right_a,
            left_b,
            up_select,
            down_start,
        };
        matrix.apply(MatrixLevels::RELEASED);
        matrix
    }

    /// Drive the outputs to `levels`
    pub fn apply(&mut self, levels: MatrixLevels) {
        self.right_a.set_state(levels.right_a);
        self.left_b.set_state(levels.left_b);
        self.up_select.set_state(levels.up_select);
        self.down_start.set_state(levels.down_start);
    }

    /// React to one select line event
    pub fn handle(&mut self, event: MatrixEvent, buttons: ButtonSet, menu_open: bool) {
        self.apply(MatrixLevels::for_event(event, buttons, menu_open));
    }

    /// Current output levels
    pub fn levels(&self) -> MatrixLevels {
        MatrixLevels {
            right_a: self.right_a.is_set_high(),
            left_b: self.left_b.is_set_high(),
            up_select: self.up_select.is_set_high(),
            down_start: self.down_start.is_set_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn matrix() -> ButtonMatrix<MockPin> {
        ButtonMatrix::new(
            MockPin { high: false },
            MockPin { high: false },
            MockPin { high: false },
            MockPin { high: false },
        )
    }

    fn set(buttons: &[Button]) -> ButtonSet {
        buttons.iter().copied().collect()
    }

    #[test]
    fn test_starts_released() {
        assert_eq!(matrix().levels(), MatrixLevels::RELEASED);
    }

    #[test]
    fn test_direction_select_mirrors_dpad() {
        let mut m = matrix();
        m.handle(MatrixEvent::DirectionSelect, set(&[Button::Left, Button::Down, Button::A]), false);
        assert_eq!(
            m.levels(),
            MatrixLevels {
                right_a: true,
                left_b: false,
                up_select: true,
                down_start: false,
            }
        );
    }

    #[test]
    fn test_action_select_mirrors_buttons() {
        let mut m = matrix();
        m.handle(MatrixEvent::ActionSelect, set(&[Button::A, Button::Start, Button::Up]), false);
        assert_eq!(
            m.levels(),
            MatrixLevels {
                right_a: false,
                left_b: true,
                up_select: true,
                down_start: false,
            }
        );

        m.handle(MatrixEvent::ScanComplete, set(&[Button::A]), false);
        assert_eq!(m.levels(), MatrixLevels::RELEASED);
    }

    #[test]
    fn test_lockup_combo_released_before_mirroring() {
        let held = set(&[Button::A, Button::B, Button::Select, Button::Start, Button::Up]);
        assert_eq!(release_lockup_combo(held), set(&[Button::Up]));

        let mut m = matrix();
        m.handle(MatrixEvent::ActionSelect, held, false);
        assert_eq!(m.levels(), MatrixLevels::RELEASED);
    }

    #[test]
    fn test_partial_combo_passes_through() {
        let held = set(&[Button::A, Button::B, Button::Start]);
        assert_eq!(release_lockup_combo(held), held);
    }

    #[test]
    fn test_menu_open_holds_released() {
        let mut m = matrix();
        m.handle(MatrixEvent::DirectionSelect, set(&[Button::Right, Button::Up]), true);
        assert_eq!(m.levels(), MatrixLevels::RELEASED);
    }
}
