// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Kick the bird upwards
    Flap,

    // Meta actions
    Pause,
    Quit,
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

/// Default bindings: a left click flaps, P pauses, Escape quits
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::mouse(MouseButton::Left), Action::Flap),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyP),
            InputSource::Keyboard(KeyCode::KeyP)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_left_click_flaps() {
        let bindings = default_bindings();
        let flap = bindings
            .iter()
            .find(|(_, action)| *action == Action::Flap);

        assert!(matches!(
            flap,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in default_bindings() {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
