//! Button states

use portable_atomic::{AtomicU16, Ordering};

/// Logical controller buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    A = 0,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    Home,
}

impl Button {
    /// All buttons in index order
    pub const ALL: [Button; 9] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Home,
    ];

    const fn mask(self) -> u16 {
        1 << self as u8
    }
}

/// Set of pressed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u16);

impl ButtonSet {
    /// Nothing pressed
    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & 0x01FF)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_pressed(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub const fn with(self, button: Button, pressed: bool) -> Self {
        if pressed {
            Self(self.0 | button.mask())
        } else {
            Self(self.0 & !button.mask())
        }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        *self = self.with(button, pressed);
    }

    /// True if any button is held
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    /// This set with every button in `other` released
    pub const fn without(self, other: ButtonSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// True if every button in `other` is held
    pub const fn contains(self, other: ButtonSet) -> bool {
        self.0 & other.0 == other.0
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ButtonSet::NONE, |set, b| set.with(b, true))
    }
}

/// Current and previous button states
///
/// `update` stores a fresh poll, `latch` copies it into the previous states
/// once it has been acted on. A release is seen exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    current: ButtonSet,
    previous: ButtonSet,
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            current: ButtonSet::NONE,
            previous: ButtonSet::NONE,
        }
    }

    /// Record the latest states
    pub fn update(&mut self, buttons: ButtonSet) {
        self.current = buttons;
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.current.is_pressed(button)
    }

    /// Pressed last time, released now
    pub fn was_released(&self, button: Button) -> bool {
        self.previous.is_pressed(button) && !self.current.is_pressed(button)
    }

    /// Make the current states the previous ones
    pub fn latch(&mut self) {
        self.previous = self.current;
    }
}

/// Button states shared between the polling loop and the matrix handler
pub struct SharedButtons(AtomicU16);

impl SharedButtons {
    pub const fn new() -> Self {
        Self(AtomicU16::new(0))
    }

    pub fn load(&self) -> ButtonSet {
        ButtonSet::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, buttons: ButtonSet) {
        self.0.store(buttons.bits(), Ordering::Relaxed);
    }
}

impl Default for SharedButtons {
    fn default() -> Self {
        Self::new()
    }
}
