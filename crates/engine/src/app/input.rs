use super::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Inspect,
}

const ACTION_COUNT: usize = 5;

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
            InputAction::Inspect => 4,
        }
    }
}

/// Per-tick snapshot of semantic input. The event wiring that turns raw
/// key/mouse events into this snapshot lives outside the simulation;
/// cursor coordinates arrive already camera-adjusted (world space).
/// `*_pressed` fields are edges for the tick, `primary_held` is a level.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    cursor_position_world: Option<Vec2>,
    primary_pressed: bool,
    primary_held: bool,
    pause_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_cursor_position_world(mut self, cursor_position_world: Option<Vec2>) -> Self {
        self.cursor_position_world = cursor_position_world;
        self
    }

    pub fn with_primary_pressed(mut self, primary_pressed: bool) -> Self {
        self.primary_pressed = primary_pressed;
        self
    }

    pub fn with_primary_held(mut self, primary_held: bool) -> Self {
        self.primary_held = primary_held;
        self
    }

    pub fn with_pause_pressed(mut self, pause_pressed: bool) -> Self {
        self.pause_pressed = pause_pressed;
        self
    }

    pub fn cursor_position_world(&self) -> Option<Vec2> {
        self.cursor_position_world
    }

    pub fn primary_pressed(&self) -> bool {
        self.primary_pressed
    }

    pub fn primary_held(&self) -> bool {
        self.primary_held
    }

    pub fn pause_pressed(&self) -> bool {
        self.pause_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_nothing_down() {
        let snapshot = InputSnapshot::empty();
        assert!(!snapshot.is_down(InputAction::MoveUp));
        assert!(!snapshot.primary_pressed());
        assert!(!snapshot.primary_held());
        assert!(!snapshot.pause_pressed());
        assert!(snapshot.cursor_position_world().is_none());
    }

    #[test]
    fn builders_set_independent_fields() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::Inspect, true)
            .with_cursor_position_world(Some(Vec2 { x: 10.0, y: 20.0 }))
            .with_primary_held(true);

        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(snapshot.is_down(InputAction::Inspect));
        assert!(!snapshot.is_down(InputAction::MoveRight));
        assert!(snapshot.primary_held());
        assert!(!snapshot.primary_pressed());
        assert_eq!(
            snapshot.cursor_position_world(),
            Some(Vec2 { x: 10.0, y: 20.0 })
        );
    }

    #[test]
    fn action_can_be_released_again() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveDown, true)
            .with_action_down(InputAction::MoveDown, false);
        assert!(!snapshot.is_down(InputAction::MoveDown));
    }
}
