use super::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

/// One tick's worth of player input. Movement actions report held state;
/// interact/save/load flags are edge-triggered and true for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    interact_pressed: bool,
    interact_alternate_pressed: bool,
    save_pressed: bool,
    load_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn interact_alternate_pressed(&self) -> bool {
        self.interact_alternate_pressed
    }

    pub fn save_pressed(&self) -> bool {
        self.save_pressed
    }

    pub fn load_pressed(&self) -> bool {
        self.load_pressed
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_interact_alternate_pressed(mut self, interact_alternate_pressed: bool) -> Self {
        self.interact_alternate_pressed = interact_alternate_pressed;
        self
    }

    pub fn with_save_pressed(mut self, save_pressed: bool) -> Self {
        self.save_pressed = save_pressed;
        self
    }

    pub fn with_load_pressed(mut self, load_pressed: bool) -> Self {
        self.load_pressed = load_pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    /// Normalized movement direction on the input plane, components in [-1, 1].
    pub fn movement_vector(&self) -> Vec2 {
        let mut x = 0.0f32;
        let mut y = 0.0f32;

        if self.is_down(InputAction::MoveRight) {
            x += 1.0;
        }
        if self.is_down(InputAction::MoveLeft) {
            x -= 1.0;
        }
        if self.is_down(InputAction::MoveUp) {
            y += 1.0;
        }
        if self.is_down(InputAction::MoveDown) {
            y -= 1.0;
        }

        Vec2 { x, y }.normalized_or_zero()
    }
}

/// Produces one snapshot per simulation tick. The headless runner polls this
/// instead of a window event loop.
pub trait InputSource {
    fn next_snapshot(&mut self) -> InputSnapshot;
}
