//! # Input Module
//!
//! Keyboard sampling and the per-frame input snapshot handed to the simulation.
//!
//! [`InputHandler`] is the only code that reads the keyboard. Everything downstream
//! sees a [`FrameInput`], which tests can build by hand.

use macroquad::input::{is_key_down, KeyCode};
use macroquad::math::Vec2;
use std::collections::HashSet;

/// Logical actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Start from the main menu
    Confirm,
    Pause,
    Restart,
    Save,
    Load,
    ToggleGodMode,
    Quit,
}

/// Held actions for this frame and the previous one.
///
/// Keeping both lets callers tell a fresh press from a key that is being held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    current: HashSet<InputAction>,
    previous: HashSet<InputAction>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next frame with `held` as the actions now down.
    pub fn advance(&mut self, held: impl IntoIterator<Item = InputAction>) {
        self.previous = std::mem::take(&mut self.current);
        self.current.extend(held);
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.current.contains(&action)
    }

    /// True only on the frame the action went down.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.current.contains(&action) && !self.previous.contains(&action)
    }
}

/// Everything the simulation needs to know about input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Unit-length or zero movement intent, y pointing down
    pub movement: Vec2,
    pub actions: ActionState,
}

impl FrameInput {
    /// No keys down.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Holding a direction. `direction` is normalized.
    pub fn moving(direction: Vec2) -> Self {
        Self {
            movement: direction.normalize_or_zero(),
            actions: ActionState::default(),
        }
    }

    /// A frame on which `action` was just pressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrawl::{FrameInput, InputAction};
    ///
    /// let input = FrameInput::pressed(InputAction::Pause);
    /// assert!(input.was_pressed(InputAction::Pause));
    /// assert!(!input.was_pressed(InputAction::Save));
    /// ```
    pub fn pressed(action: InputAction) -> Self {
        let mut actions = ActionState::default();
        actions.advance([action]);
        Self {
            movement: Vec2::ZERO,
            actions,
        }
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.actions.was_pressed(action)
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.actions.is_held(action)
    }
}

/// Converts four held directions into a unit movement vector.
///
/// Opposite directions cancel.
pub fn movement_intent(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let axis = |negative: bool, positive: bool| (positive as i8 - negative as i8) as f32;
    Vec2::new(axis(left, right), axis(up, down)).normalize_or_zero()
}

/// Reads the macroquad keyboard once per frame.
pub struct InputHandler {
    bindings: Vec<(KeyCode, InputAction)>,
    state: ActionState,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a handler with the default key layout.
    ///
    /// Movement is on WASD and the arrow keys. Enter starts, P pauses, R restarts,
    /// F5 saves, F9 loads, G toggles god mode and Escape quits.
    pub fn new() -> Self {
        Self {
            bindings: vec![
                (KeyCode::W, InputAction::MoveUp),
                (KeyCode::Up, InputAction::MoveUp),
                (KeyCode::S, InputAction::MoveDown),
                (KeyCode::Down, InputAction::MoveDown),
                (KeyCode::A, InputAction::MoveLeft),
                (KeyCode::Left, InputAction::MoveLeft),
                (KeyCode::D, InputAction::MoveRight),
                (KeyCode::Right, InputAction::MoveRight),
                (KeyCode::Enter, InputAction::Confirm),
                (KeyCode::P, InputAction::Pause),
                (KeyCode::R, InputAction::Restart),
                (KeyCode::F5, InputAction::Save),
                (KeyCode::F9, InputAction::Load),
                (KeyCode::G, InputAction::ToggleGodMode),
                (KeyCode::Escape, InputAction::Quit),
            ],
            state: ActionState::default(),
        }
    }

    /// Adds a key for an action alongside the defaults.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.push((key, action));
    }

    /// Samples the keyboard and returns this frame's input.
    pub fn poll(&mut self) -> FrameInput {
        let held: Vec<InputAction> = self
            .bindings
            .iter()
            .filter(|(key, _)| is_key_down(*key))
            .map(|(_, action)| *action)
            .collect();
        self.state.advance(held);

        let movement = movement_intent(
            self.state.is_held(InputAction::MoveUp),
            self.state.is_held(InputAction::MoveDown),
            self.state.is_held(InputAction::MoveLeft),
            self.state.is_held(InputAction::MoveRight),
        );

        FrameInput {
            movement,
            actions: self.state.clone(),
        }
    }
}
