#![warn(clippy::pedantic)]
use std::process::ExitCode;

use glium::Surface;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::event::MouseScrollDelta;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::CursorGrabMode;

use crate::error::SceneError;

mod app;
mod camera;
mod error;
mod mesh;
mod shader;
mod texture;

const WINDOW_TITLE: &str = "Final Project - Swimming Pool Courtyard";
const WINDOW_WIDTH: u32 = 1800;
const WINDOW_HEIGHT: u32 = 1600;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SceneError> {
    let event_loop = winit::event_loop::EventLoopBuilder::new()
        .build()
        .map_err(|err| SceneError::WindowCreation(err.to_string()))?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .build(&event_loop);

    let opengl_version = display.get_opengl_version_string();
    info!("OpenGL version: {}", opengl_version);

    // capture the pointer for free-look; not every platform supports a grab
    window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        .ok();
    window.set_cursor_visible(false);

    let aspect = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
    let mut app = app::Application::new(&display, aspect)?;

    // rendering loop
    event_loop
        .run(move |event, window_target| {
            match event {
                winit::event::Event::WindowEvent { event, .. } => match event {
                    winit::event::WindowEvent::CloseRequested => window_target.exit(),

                    // render everything
                    winit::event::WindowEvent::RedrawRequested => {
                        let mut target = display.draw();
                        target.clear_color_and_depth((0.0, 0.0, 0.0, 1.0), 1.0);
                        if let Err(err) = app.draw_frame(&mut target) {
                            error!("frame draw failed: {err}");
                        }
                        target.finish().unwrap();
                    }
                    // resize the display when the window's size has changed
                    winit::event::WindowEvent::Resized(window_size) => {
                        display.resize(window_size.into());
                    }
                    // escape closes; every other key drives the camera
                    winit::event::WindowEvent::KeyboardInput { event, .. } => {
                        if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                            window_target.exit();
                        }
                        app.camera.process_key(&event);
                    }
                    winit::event::WindowEvent::CursorMoved { position, .. } => {
                        app.camera.process_cursor(position.x as f32, position.y as f32);
                    }
                    winit::event::WindowEvent::MouseWheel { delta, .. } => {
                        let delta_y = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(position) => position.y as f32,
                        };
                        app.camera.process_scroll(delta_y);
                    }
                    _ => (),
                },
                // ensures continuous rendering
                winit::event::Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => (),
            };
        })
        .map_err(|err| SceneError::EventLoop(err.to_string()))
}
