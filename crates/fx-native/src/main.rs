use std::sync::Arc;

use clap::Parser;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

mod cli;
mod viewer;

use cli::Cli;
use fx_core::SurfaceState;
use viewer::Viewer;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.effect_config()?;
    log::info!(
        "fx-native: {} effect on {}",
        config.kind,
        cli.image.display()
    );

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("hoverfx - {}", cli.image.display()))
            .with_inner_size(LogicalSize::new(cli.width, cli.height))
            .build(&event_loop)?,
    );

    let mut viewer = Viewer::new(window, config);
    viewer.mount(&cli.image);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                viewer.dispose();
                elwt.exit();
            }
            WindowEvent::Resized(size) => viewer.resize(size),
            WindowEvent::CursorEntered { .. } => viewer.pointer_enter(),
            WindowEvent::CursorLeft { .. } => viewer.pointer_leave(),
            WindowEvent::CursorMoved { position, .. } => viewer.pointer_move(position.x, position.y),
            WindowEvent::RedrawRequested => match viewer.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    viewer.dispose();
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            },
            _ => {}
        },
        Event::AboutToWait => {
            let next = viewer.poll_deadline();
            if viewer.state() == SurfaceState::Ready {
                viewer.window().request_redraw();
                elwt.set_control_flow(ControlFlow::Poll);
            } else if let Some(at) = next {
                elwt.set_control_flow(ControlFlow::WaitUntil(at));
            } else {
                elwt.set_control_flow(ControlFlow::Wait);
            }
        }
        _ => {}
    })?;
    Ok(())
}
