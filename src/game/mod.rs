// Game layer
//
// Everything specific to the flapping-bird game:
// - Tunable constants and their validation
// - The bird and the boundary walls
// - Pipe generation, scrolling and bookkeeping
// - The view that mounts, drives and tears down a game

pub mod bird;
pub mod config;
pub mod pipes;
pub mod view;
pub mod walls;

// Re-export commonly used types
pub use config::GameConfig;
pub use view::{GameView, ViewControl};
