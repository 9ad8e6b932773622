// Game tuning constants

use glam::Vec2;
use std::time::Duration;

use crate::core::math::TICK_MILLIS;

/// Reasons a `GameConfig` cannot be played
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("minimum pipe height {min} is above maximum {max}")]
    InvertedPipeBounds { min: u32, max: u32 },

    #[error("a {max}-tall top pipe plus a {gap} gap does not fit in a play area {play} tall")]
    GapTooTall { max: u32, gap: u32, play: u32 },

    #[error("{0} must be a non-zero duration")]
    NonPositiveInterval(&'static str),

    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

/// Every tunable of the game, in world units (pixels) and ticks
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    // Screen
    /// Logical size of the drawing region
    pub view_width: f32,
    pub view_height: f32,
    /// Height of the world the pipes are laid out in
    pub play_height: u32,

    // Physics
    /// Gravity direction and strength
    pub gravity: Vec2,
    /// Gravity multiplier per millisecond², as in classic browser engines
    pub gravity_scale: f32,

    // Bird
    pub bird_spawn: Vec2,
    pub bird_radius: f32,
    pub bird_density: f32,
    pub bird_restitution: f32,
    /// Velocity set by a click, in units per tick
    pub flap_velocity: Vec2,

    // Walls
    pub wall_width: f32,
    pub wall_thickness: f32,
    pub ground_center: Vec2,
    pub ceiling_center: Vec2,

    // Pipes
    /// Vertical clearance between a top and a bottom pipe
    pub gap_height: u32,
    pub min_pipe_height: u32,
    pub max_pipe_height: u32,
    pub pipe_width: f32,
    /// x coordinate new pipes appear at
    pub pipe_spawn_x: f32,
    pub spawn_interval: Duration,

    // Scrolling
    pub scroll_interval: Duration,
    /// Distance pipes move left per scroll tick
    pub scroll_step: f32,
    /// Pipes left of this x are removed
    pub removal_threshold: f32,
}

impl GameConfig {
    /// Check the values can produce a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pipe_height > self.max_pipe_height {
            return Err(ConfigError::InvertedPipeBounds {
                min: self.min_pipe_height,
                max: self.max_pipe_height,
            });
        }
        let fits = self
            .max_pipe_height
            .checked_add(self.gap_height)
            .is_some_and(|needed| needed <= self.play_height);
        if !fits {
            return Err(ConfigError::GapTooTall {
                max: self.max_pipe_height,
                gap: self.gap_height,
                play: self.play_height,
            });
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval("spawn_interval"));
        }
        if self.scroll_interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval("scroll_interval"));
        }

        let sizes = [
            ("view_width", self.view_width),
            ("view_height", self.view_height),
            ("bird_radius", self.bird_radius),
            ("bird_density", self.bird_density),
            ("pipe_width", self.pipe_width),
            ("scroll_step", self.scroll_step),
        ];
        for (name, value) in sizes {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }

        Ok(())
    }

    /// Gravitational acceleration in units per tick²
    pub fn gravity_per_tick_sq(&self) -> Vec2 {
        self.gravity * self.gravity_scale * TICK_MILLIS * TICK_MILLIS
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: 1200.0,
            view_height: 700.0,
            play_height: 600,

            gravity: Vec2::new(0.0, 1.0),
            gravity_scale: 0.001,

            bird_spawn: Vec2::new(150.0, 300.0),
            bird_radius: 20.0,
            bird_density: 0.04,
            bird_restitution: 0.6,
            flap_velocity: Vec2::new(0.0, -10.0),

            wall_width: 810.0,
            wall_thickness: 60.0,
            ground_center: Vec2::new(400.0, 590.0),
            ceiling_center: Vec2::new(400.0, 10.0),

            gap_height: 150,
            min_pipe_height: 50,
            max_pipe_height: 450,
            pipe_width: 50.0,
            pipe_spawn_x: 1000.0,
            spawn_interval: Duration::from_millis(3000),

            scroll_interval: Duration::from_secs_f64(1.0 / 60.0),
            scroll_step: 5.0,
            removal_threshold: -50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = GameConfig {
            min_pipe_height: 300,
            max_pipe_height: 200,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedPipeBounds { min: 300, max: 200 })
        );
    }

    #[test]
    fn test_gap_must_fit() {
        let config = GameConfig {
            gap_height: 200,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooTall { gap: 200, .. })
        ));
    }

    #[test]
    fn test_huge_pipe_bounds_rejected_without_overflow() {
        let config = GameConfig {
            min_pipe_height: 0,
            max_pipe_height: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GapTooTall {
                max: u32::MAX,
                gap: 150,
                play: 600
            })
        );
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let config = GameConfig {
            scroll_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveInterval("scroll_interval"))
        );
    }

    #[test]
    fn test_non_positive_sizes_rejected() {
        let config = GameConfig {
            pipe_width: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositive("pipe_width")));
    }

    #[test]
    fn test_gravity_per_tick() {
        let gravity = GameConfig::default().gravity_per_tick_sq();
        assert_eq!(gravity.x, 0.0);
        assert_relative_eq!(gravity.y, 0.27778, epsilon = 1e-4);
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvertedPipeBounds { min: 3, max: 2 };
        assert_eq!(err.to_string(), "minimum pipe height 3 is above maximum 2");
    }
}
