// Pipe obstacles: generation, scrolling and pair bookkeeping

use glam::Vec2;
use log::debug;
use rand::Rng;

use super::config::GameConfig;
use crate::engine::physics::{BodyDef, BodyHandle, BodyLabel, Simulation};

/// Vertical layout of one top/bottom pipe pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeLayout {
    /// y where the gap starts; equal to the top pipe's height
    pub gap_position: f32,
    pub top_height: f32,
    pub bottom_height: f32,
}

impl PipeLayout {
    /// Lay out a pair whose gap starts at `gap_position`
    pub fn from_gap(gap_position: u32, play_height: u32, gap_height: u32) -> Self {
        let top_height = gap_position as f32;
        Self {
            gap_position: top_height,
            top_height,
            bottom_height: play_height as f32 - gap_height as f32 - top_height,
        }
    }
}

/// The two bodies created by one spawn tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    pub top: BodyHandle,
    pub bottom: BodyHandle,
    pub layout: PipeLayout,
}

/// Builds randomized pipe pairs at the right edge of the play area
#[derive(Debug, Clone)]
pub struct PipeGenerator {
    spawn_x: f32,
    pipe_width: f32,
    play_height: u32,
    gap_height: u32,
    min_height: u32,
    max_height: u32,
}

impl PipeGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_x: config.pipe_spawn_x,
            pipe_width: config.pipe_width,
            play_height: config.play_height,
            gap_height: config.gap_height,
            min_height: config.min_pipe_height,
            max_height: config.max_pipe_height,
        }
    }

    /// Draw a gap position uniformly from the configured bounds, inclusive
    pub fn random_layout<R: Rng + ?Sized>(&self, rng: &mut R) -> PipeLayout {
        let gap_position = rng.gen_range(self.min_height..=self.max_height);
        PipeLayout::from_gap(gap_position, self.play_height, self.gap_height)
    }

    /// Spawn a pair with a random gap
    pub fn spawn<S, R>(&self, world: &mut S, rng: &mut R) -> PipePair
    where
        S: Simulation + ?Sized,
        R: Rng + ?Sized,
    {
        let layout = self.random_layout(rng);
        self.spawn_layout(world, layout)
    }

    /// Spawn a pair with a given layout
    pub fn spawn_layout<S>(&self, world: &mut S, layout: PipeLayout) -> PipePair
    where
        S: Simulation + ?Sized,
    {
        let play_height = self.play_height as f32;

        let top = BodyDef::rect(
            self.spawn_x,
            layout.top_height / 2.0,
            self.pipe_width,
            layout.top_height,
        )
        .fixed()
        .label(BodyLabel::Pipe);

        let bottom = BodyDef::rect(
            self.spawn_x,
            play_height - layout.bottom_height / 2.0,
            self.pipe_width,
            layout.bottom_height,
        )
        .fixed()
        .label(BodyLabel::Pipe);

        let pair = PipePair {
            top: world.add_body(&top),
            bottom: world.add_body(&bottom),
            layout,
        };

        debug!(
            "Spawned pipes at x={} with gap at y={} (top {}, bottom {})",
            self.spawn_x,
            pair.layout.gap_position,
            pair.layout.top_height,
            pair.layout.bottom_height
        );
        pair
    }
}

/// Result of one scroll tick
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollReport {
    /// Pipes translated this tick
    pub moved: usize,
    /// Pipes that left the screen and were removed
    pub removed: Vec<BodyHandle>,
}

/// Moves every pipe left and culls the ones that left the screen
#[derive(Debug, Clone)]
pub struct PipeScroller {
    step: f32,
    removal_threshold: f32,
}

impl PipeScroller {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            step: config.scroll_step,
            removal_threshold: config.removal_threshold,
        }
    }

    /// Advance all pipes by one step
    pub fn scroll<S: Simulation + ?Sized>(&self, world: &mut S) -> ScrollReport {
        let mut report = ScrollReport::default();
        let delta = Vec2::new(-self.step, 0.0);

        for handle in world.bodies() {
            if world.label(handle) != Some(BodyLabel::Pipe) {
                continue;
            }

            world.translate(handle, delta);
            report.moved += 1;

            let off_screen = world
                .position(handle)
                .is_some_and(|position| position.x < self.removal_threshold);
            if off_screen && world.remove_body(handle) {
                report.removed.push(handle);
            }
        }

        if !report.removed.is_empty() {
            debug!(
                "Removed {} of {} pipes after scrolling",
                report.removed.len(),
                report.moved
            );
        }
        report
    }
}

/// Pipe pairs still (at least partly) in the world, oldest first
#[derive(Debug, Default)]
pub struct PipeTracker {
    pairs: Vec<PipePair>,
}

impl PipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: PipePair) {
        self.pairs.push(pair);
    }

    /// Forget pairs whose bodies have both left the world, returns how many
    pub fn prune<S: Simulation + ?Sized>(&mut self, world: &S) -> usize {
        let before = self.pairs.len();
        self.pairs
            .retain(|pair| world.contains(pair.top) || world.contains(pair.bottom));
        before - self.pairs.len()
    }

    #[cfg(test)]
    pub fn pairs(&self) -> &[PipePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::PhysicsWorld;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (GameConfig, PhysicsWorld) {
        let config = GameConfig::default();
        let world = PhysicsWorld::new(config.gravity_per_tick_sq());
        (config, world)
    }

    fn spawn_with_gap(config: &GameConfig, world: &mut PhysicsWorld, gap: u32) -> PipePair {
        let layout = PipeLayout::from_gap(gap, config.play_height, config.gap_height);
        PipeGenerator::new(config).spawn_layout(world, layout)
    }

    #[test]
    fn test_layout_at_minimum_gap() {
        let layout = PipeLayout::from_gap(50, 600, 150);
        assert_eq!(layout.top_height, 50.0);
        assert_eq!(layout.bottom_height, 400.0);
    }

    #[test]
    fn test_layout_at_maximum_gap() {
        let layout = PipeLayout::from_gap(450, 600, 150);
        assert_eq!(layout.top_height, 450.0);
        assert_eq!(layout.bottom_height, 0.0);
    }

    #[test]
    fn test_random_layouts_stay_in_bounds_and_fill_play_area() {
        let config = GameConfig::default();
        let generator = PipeGenerator::new(&config);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let layout = generator.random_layout(&mut rng);
            assert!(layout.gap_position >= 50.0 && layout.gap_position <= 450.0);
            assert_eq!(layout.gap_position.fract(), 0.0);
            assert_eq!(layout.top_height + 150.0 + layout.bottom_height, 600.0);
        }
    }

    #[test]
    fn test_random_layouts_reach_both_bounds() {
        let config = GameConfig {
            min_pipe_height: 100,
            max_pipe_height: 102,
            ..GameConfig::default()
        };
        let generator = PipeGenerator::new(&config);
        let mut rng = StdRng::seed_from_u64(1);

        let gaps: std::collections::HashSet<u32> = (0..200)
            .map(|_| generator.random_layout(&mut rng).gap_position as u32)
            .collect();
        assert_eq!(gaps, [100, 101, 102].into_iter().collect());
    }

    #[test]
    fn test_spawned_pair_geometry() {
        let (config, mut world) = setup();
        let generator = PipeGenerator::new(&config);

        let pair = generator.spawn_layout(&mut world, PipeLayout::from_gap(200, 600, 150));

        assert_eq!(world.position(pair.top), Some(Vec2::new(1000.0, 100.0)));
        assert_eq!(world.position(pair.bottom), Some(Vec2::new(1000.0, 475.0)));
        assert_eq!(world.label(pair.top), Some(BodyLabel::Pipe));
        assert_eq!(world.label(pair.bottom), Some(BodyLabel::Pipe));

        // Top pipe ends where the gap starts, bottom pipe starts where it ends
        let top_edge = 100.0 + pair.layout.top_height / 2.0;
        let bottom_edge = 475.0 - pair.layout.bottom_height / 2.0;
        assert_eq!(bottom_edge - top_edge, 150.0);
    }

    #[test]
    fn test_pipes_are_static() {
        let (config, mut world) = setup();
        let pair = PipeGenerator::new(&config).spawn(&mut world, &mut StdRng::seed_from_u64(3));

        for _ in 0..30 {
            world.step();
        }
        assert_eq!(world.position(pair.top).unwrap().x, 1000.0);
        assert_eq!(world.velocity(pair.top), Some(Vec2::ZERO));
    }

    #[test]
    fn test_zero_height_pipe_still_spawned() {
        let (config, mut world) = setup();
        let pair = spawn_with_gap(&config, &mut world, 450);

        assert!(world.contains(pair.bottom));
        assert_eq!(world.position(pair.bottom), Some(Vec2::new(1000.0, 600.0)));
    }

    #[test]
    fn test_scroll_moves_by_exact_steps() {
        let (config, mut world) = setup();
        let pair = spawn_with_gap(&config, &mut world, 100);
        let scroller = PipeScroller::new(&config);

        for n in 1..=100 {
            let report = scroller.scroll(&mut world);
            assert_eq!(report.moved, 2);
            assert_eq!(world.position(pair.top).unwrap().x, 1000.0 - 5.0 * n as f32);
            assert_eq!(world.position(pair.bottom).unwrap().x, 1000.0 - 5.0 * n as f32);
        }
    }

    #[test]
    fn test_scroll_removes_only_below_threshold() {
        let (config, mut world) = setup();
        let pair = spawn_with_gap(&config, &mut world, 100);
        let scroller = PipeScroller::new(&config);

        // 210 steps land exactly on -50, which is not below the threshold
        for _ in 0..210 {
            assert!(scroller.scroll(&mut world).removed.is_empty());
        }
        assert_eq!(world.position(pair.top).unwrap().x, -50.0);

        let report = scroller.scroll(&mut world);
        assert_eq!(report.removed.len(), 2);
        assert!(report.removed.contains(&pair.top));
        assert!(report.removed.contains(&pair.bottom));
        assert!(!world.contains(pair.top));

        // Removed pipes never come back
        let report = scroller.scroll(&mut world);
        assert_eq!(report, ScrollReport::default());
    }

    #[test]
    fn test_scroll_ignores_unlabeled_bodies() {
        let (config, mut world) = setup();
        let wall = world.add_body(&BodyDef::rect(400.0, 590.0, 810.0, 60.0).fixed());
        let ball = world.add_body(&BodyDef::circle(-100.0, 300.0, 20.0));

        let report = PipeScroller::new(&config).scroll(&mut world);
        assert_eq!(report.moved, 0);
        assert_eq!(world.position(wall), Some(Vec2::new(400.0, 590.0)));
        assert!(world.contains(ball));
    }

    #[test]
    fn test_tracker_prunes_fully_removed_pairs() {
        let (config, mut world) = setup();
        let generator = PipeGenerator::new(&config);
        let mut tracker = PipeTracker::new();

        let old = generator.spawn_layout(&mut world, PipeLayout::from_gap(100, 600, 150));
        let new = generator.spawn_layout(&mut world, PipeLayout::from_gap(300, 600, 150));
        tracker.push(old);
        tracker.push(new);

        world.remove_body(old.top);
        assert_eq!(tracker.prune(&world), 0);

        world.remove_body(old.bottom);
        assert_eq!(tracker.prune(&world), 1);
        assert_eq!(tracker.pairs(), &[new]);
    }
}
