// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Held modifier
    Run,

    // Moves
    Dodge,
    Jump,
    Punch,
    Kick,

    // Meta actions
    Pause,
    Menu,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for Player 1
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD)
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        (InputSource::key(KeyCode::ShiftLeft), Action::Run),
        // Moves
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ControlLeft), Action::Dodge),
        (InputSource::key(KeyCode::KeyQ), Action::Dodge),
        (InputSource::key(KeyCode::KeyJ), Action::Punch),
        (InputSource::key(KeyCode::KeyK), Action::Kick),
        (InputSource::mouse(MouseButton::Left), Action::Punch),
        (InputSource::mouse(MouseButton::Right), Action::Kick),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_every_move_is_bound() {
        let bindings = default_p1_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
            Action::Run,
            Action::Dodge,
            Action::Jump,
            Action::Punch,
            Action::Kick,
        ] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "{:?} has no default binding",
                action
            );
        }
    }

    #[test]
    fn test_attacks_on_mouse_buttons() {
        let bindings = default_p1_bindings();
        assert!(bindings.contains(&(InputSource::mouse(MouseButton::Left), Action::Punch)));
        assert!(bindings.contains(&(InputSource::mouse(MouseButton::Right), Action::Kick)));
    }

    #[test]
    fn test_no_duplicate_inputs_in_p1() {
        let bindings = default_p1_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in P1 bindings"
            );
        }
    }

    #[test]
    fn test_global_bindings_exist() {
        let bindings = global_bindings();
        assert!(bindings.iter().any(|(_, action)| *action == Action::Pause));
    }
}
