// Input handling system
//
// Maps raw winit mouse and keyboard events onto game actions.
//
// ## Architecture
//
// - `action`: Defines game actions and default bindings
// - `manager`: Listener that turns events into a queue of actions
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, InputManager};
//
// let mut input = InputManager::new();
// input.attach();
//
// // In your event loop
// input.process_mouse_button(state, button);
//
// for action in input.drain() {
//     if action == Action::Flap {
//         // Kick the bird upwards
//     }
// }
// ```

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
