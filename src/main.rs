use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::renderer::Renderer;
use game::{GameConfig, GameView, ViewControl};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Flappy Rapier...");

    let config = GameConfig::default();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Flappy Rapier")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.view_width,
                config.view_height,
            ))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let renderer = pollster::block_on(Renderer::new(
        window.clone(),
        config.view_width,
        config.view_height,
    ))?;
    let mut view = GameView::mount(config, renderer)?;
    let mut last_frame = Instant::now();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                view.unmount();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                view.resize(physical_size.width, physical_size.height);
            }
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                view.handle_mouse_button(state, button);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if view.handle_keyboard_event(&event) == ViewControl::Exit {
                    info!("Quit requested, shutting down...");
                    view.unmount();
                    elwt.exit();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let now = Instant::now();
                let dt = now.duration_since(last_frame);
                last_frame = now;

                if let Err(e) = view.advance(dt) {
                    error!("{}", e);
                    view.unmount();
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                if view.is_mounted() {
                    window.request_redraw();
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
