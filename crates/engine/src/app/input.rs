#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Quit,
}

const ACTION_COUNT: usize = 7;

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
            InputAction::Jump => 4,
            InputAction::Attack => 5,
            InputAction::Quit => 6,
        }
    }
}

/// Immutable per-frame input value handed to gameplay. Direction and
/// action flags are independent level states (held keys stay true every
/// frame); `toggle_fullscreen` is edge-triggered and fires for exactly
/// one frame per physical press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    toggle_fullscreen_pressed: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        toggle_fullscreen_pressed: bool,
        actions: ActionStates,
    ) -> Self {
        Self {
            quit_requested,
            toggle_fullscreen_pressed,
            actions,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested || self.actions.is_down(InputAction::Quit)
    }

    pub fn toggle_fullscreen_pressed(&self) -> bool {
        self.toggle_fullscreen_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn up(&self) -> bool {
        self.actions.is_down(InputAction::MoveUp)
    }

    pub fn down(&self) -> bool {
        self.actions.is_down(InputAction::MoveDown)
    }

    pub fn left(&self) -> bool {
        self.actions.is_down(InputAction::MoveLeft)
    }

    pub fn right(&self) -> bool {
        self.actions.is_down(InputAction::MoveRight)
    }

    pub fn jump(&self) -> bool {
        self.actions.is_down(InputAction::Jump)
    }

    pub fn attack(&self) -> bool {
        self.actions.is_down(InputAction::Attack)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_toggle_fullscreen_pressed(mut self, pressed: bool) -> Self {
        self.toggle_fullscreen_pressed = pressed;
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }
}
