// Game view: mounts the world, drives it every frame and tears it down

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::bird::Bird;
use super::config::{ConfigError, GameConfig};
use super::pipes::{PipeGenerator, PipeScroller, PipeTracker};
use super::walls::Walls;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Action, InputManager};
use crate::engine::physics::{BodyLabel, PhysicsWorld, Simulation};
use crate::engine::renderer::Canvas;
use crate::engine::timer::{TimerId, Timers};

/// How often the frame rate is written to the log
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Errors surfaced by the game view
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("invalid game config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to draw frame: {0:#}")]
    Canvas(anyhow::Error),
}

/// What the window should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewControl {
    Continue,
    Exit,
}

/// Everything that lives between mount and unmount
struct GameContext {
    world: PhysicsWorld,
    bird: Bird,
    pipes: PipeTracker,
    generator: PipeGenerator,
    scroller: PipeScroller,
    runner: GameLoop,
    timers: Timers,
    spawn_timer: TimerId,
    scroll_timer: TimerId,
    fps_timer: TimerId,
    input: InputManager,
    rng: StdRng,
}

impl GameContext {
    fn new(config: &GameConfig, rng: StdRng) -> Self {
        let mut world = PhysicsWorld::new(config.gravity_per_tick_sq());
        let bird = Bird::spawn(&mut world, config);
        Walls::spawn(&mut world, config);

        let mut input = InputManager::new();
        input.attach();

        let mut runner = GameLoop::new();
        runner.start();

        let mut timers = Timers::new();
        let spawn_timer = timers.every(config.spawn_interval);
        let scroll_timer = timers.every(config.scroll_interval);
        let fps_timer = timers.every(FPS_LOG_INTERVAL);

        Self {
            world,
            bird,
            pipes: PipeTracker::new(),
            generator: PipeGenerator::new(config),
            scroller: PipeScroller::new(config),
            runner,
            timers,
            spawn_timer,
            scroll_timer,
            fps_timer,
            input,
            rng,
        }
    }

    fn on_timer(&mut self, id: TimerId) {
        if id == self.spawn_timer {
            let pair = self.generator.spawn(&mut self.world, &mut self.rng);
            self.pipes.push(pair);
        } else if id == self.scroll_timer {
            let report = self.scroller.scroll(&mut self.world);
            if !report.removed.is_empty() {
                self.pipes.prune(&self.world);
            }
        } else if id == self.fps_timer {
            debug!(
                "{:.1} fps after {} frames and {} steps, {} bodies, {} pipes in {} pairs",
                self.runner.fps(),
                self.runner.frame_count(),
                self.world.steps(),
                self.world.body_count(),
                self.world.count_labeled(BodyLabel::Pipe),
                self.pipes.len()
            );
        }
    }

    /// Apply queued actions, reporting a quit request
    fn handle_actions(&mut self) -> ViewControl {
        let mut control = ViewControl::Continue;
        let actions: Vec<Action> = self.input.drain().collect();

        for action in actions {
            match action {
                Action::Flap => {
                    // Dropped while paused
                    if !self.runner.is_paused() {
                        self.bird.flap(&mut self.world);
                    }
                }
                Action::Pause => self.runner.toggle_pause(),
                Action::Quit => control = ViewControl::Exit,
            }
        }
        control
    }

    fn teardown(&mut self) {
        self.runner.stop();
        let cancelled = self.timers.cancel_all();
        self.input.detach();
        self.world.clear();
        self.pipes.clear();
        debug!("Cancelled {} timers", cancelled);
    }
}

/// The single game screen
///
/// Mounting builds the world, the bird and the walls, attaches the click
/// listener and starts stepping, drawing and the pipe timers. Unmounting
/// stops all of it; a view that is dropped while mounted unmounts itself.
pub struct GameView<C: Canvas> {
    context: Option<GameContext>,
    canvas: Option<C>,
    frames_drawn: u64,
}

impl<C: Canvas> GameView<C> {
    /// Mount a view with an entropy-seeded random generator
    pub fn mount(config: GameConfig, canvas: C) -> Result<Self, ViewError> {
        Self::mount_with_rng(config, canvas, StdRng::from_entropy())
    }

    /// Mount a view drawing pipe gaps from `rng`
    pub fn mount_with_rng(config: GameConfig, canvas: C, rng: StdRng) -> Result<Self, ViewError> {
        config.validate()?;

        let context = GameContext::new(&config, rng);
        info!(
            "Game mounted: pipes every {:?}, scrolling every {:?}",
            config.spawn_interval, config.scroll_interval
        );

        Ok(Self {
            context: Some(context),
            canvas: Some(canvas),
            frames_drawn: 0,
        })
    }

    /// Run one frame covering `dt` of real time
    ///
    /// Steps physics, fires due timers in order, then draws. Does nothing once
    /// unmounted.
    pub fn advance(&mut self, dt: Duration) -> Result<(), ViewError> {
        let Some(context) = self.context.as_mut() else {
            return Ok(());
        };

        let steps = context.runner.advance(dt);
        for _ in 0..steps {
            context.world.step();
        }

        if !context.runner.is_paused() {
            for id in context.timers.advance(dt) {
                context.on_timer(id);
            }
        }

        if let Some(canvas) = self.canvas.as_mut() {
            canvas
                .draw(&context.world.snapshot())
                .map_err(ViewError::Canvas)?;
            self.frames_drawn += 1;
        }
        Ok(())
    }

    /// Feed a mouse button event to the click listener
    pub fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if let Some(context) = self.context.as_mut() {
            context.input.process_mouse_button(state, button);
            context.handle_actions();
        }
    }

    /// Feed a keyboard event to the listener
    pub fn handle_keyboard_event(&mut self, event: &KeyEvent) -> ViewControl {
        match event.physical_key {
            PhysicalKey::Code(code) => self.handle_key(code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => ViewControl::Continue,
        }
    }

    /// Feed a key transition to the listener
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> ViewControl {
        match self.context.as_mut() {
            Some(context) => {
                context.input.process_key(code, state, repeat);
                context.handle_actions()
            }
            None => ViewControl::Continue,
        }
    }

    /// Forward a window resize to the canvas
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(width, height);
        }
    }

    /// Tear the view down. Later calls do nothing.
    pub fn unmount(&mut self) {
        let Some(mut context) = self.context.take() else {
            return;
        };

        context.teardown();
        if let Some(mut canvas) = self.canvas.take() {
            canvas.remove();
        }

        info!(
            "Game unmounted after {} frames and {} physics steps",
            self.frames_drawn,
            context.runner.step_count()
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }
}

/// Inspection and synthetic input for tests
#[cfg(test)]
impl<C: Canvas> GameView<C> {
    /// A left click, as delivered by the window
    pub fn click(&mut self) {
        self.handle_mouse_button(ElementState::Pressed, MouseButton::Left);
    }

    /// Frames handed to the canvas so far
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_paused(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|context| context.runner.is_paused())
    }

    /// The world, while mounted
    pub fn world(&self) -> Option<&PhysicsWorld> {
        self.context.as_ref().map(|context| &context.world)
    }

    pub fn bird_position(&self) -> Option<glam::Vec2> {
        let context = self.context.as_ref()?;
        context.bird.position(&context.world)
    }

    pub fn bird_velocity(&self) -> Option<glam::Vec2> {
        let context = self.context.as_ref()?;
        context.bird.velocity(&context.world)
    }

    /// Number of pipe bodies in the world
    pub fn pipe_count(&self) -> usize {
        self.world()
            .map_or(0, |world| world.count_labeled(BodyLabel::Pipe))
    }

    /// Number of pipe pairs with at least one body left
    pub fn pair_count(&self) -> usize {
        self.context
            .as_ref()
            .map_or(0, |context| context.pipes.len())
    }
}

impl<C: Canvas> Drop for GameView<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}
