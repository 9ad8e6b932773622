//! Fixed-step runner for the physics simulation
//!
//! Turns measured frame time into a whole number of fixed 1/60 s physics
//! steps. The runner is the "continuous stepping" loop of the game view: it
//! produces steps only between `start()` and `stop()`, and none while paused.
use std::collections::VecDeque;
use std::time::Duration;

/// Target physics rate (60 steps per second)
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Fixed-step runner state
pub struct GameLoop {
    /// Frame time not yet consumed by a physics step
    accumulator: Duration,

    /// Whether stepping has been started and not stopped
    running: bool,

    /// Whether the game is paused
    paused: bool,

    /// Recent frame durations for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Frames seen while running
    frame_count: u64,

    /// Physics steps handed out
    step_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a stopped runner
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            running: false,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            step_count: 0,
            current_fps: 0.0,
        }
    }

    /// Start handing out physics steps
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = Duration::ZERO;
            log::debug!("Simulation stepping started");
        }
    }

    /// Stop stepping for good; later frames produce no steps
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.accumulator = Duration::ZERO;
            log::debug!(
                "Simulation stepping stopped after {} steps",
                self.step_count
            );
        }
    }

    /// Whether the runner is started
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Account for one frame of `frame_time`, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        self.frame_count += 1;
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop the backlog instead of carrying it into the next frame
        if steps == MAX_PHYSICS_STEPS && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.step_count += steps as u64;
        steps
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Frames seen while running
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of physics steps handed out
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
