// Input manager - turns window events into game actions

use super::action::{default_bindings, Action, InputSource};
use std::collections::{HashMap, VecDeque};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Event listener mapping bound inputs to queued actions
///
/// Events are only recorded while the listener is attached. Detaching drops
/// anything still queued.
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Actions waiting to be handled, oldest first
    pending: VecDeque<Action>,

    /// Whether events are currently being listened to
    attached: bool,
}

impl InputManager {
    /// Create a detached listener with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    /// Create a detached listener from a list of bindings
    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            pending: VecDeque::new(),
            attached: false,
        }
    }

    /// Start listening
    pub fn attach(&mut self) {
        if !self.attached {
            self.attached = true;
            log::debug!("Input listener attached");
        }
    }

    /// Stop listening and drop pending actions
    pub fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.pending.clear();
            log::debug!("Input listener detached");
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Get the action bound to an input source
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if state == ElementState::Pressed {
            self.trigger(InputSource::mouse(button));
        }
    }

    /// Process a key press or release
    pub fn process_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        // Held keys do not retrigger
        if state == ElementState::Pressed && !repeat {
            self.trigger(InputSource::key(code));
        }
    }

    /// Take every pending action, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.pending.drain(..)
    }

    /// Number of actions waiting to be handled
    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn trigger(&mut self, source: InputSource) {
        if !self.attached {
            return;
        }
        if let Some(action) = self.action_for(source) {
            self.pending.push_back(action);
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
