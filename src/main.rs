//! Application entry point.

use log::{error, info};
use winit::event_loop::{ControlFlow, EventLoop};

use gs_demo::engine::config::{Settings, SETTINGS_FILE};
use gs_demo::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Logger initialized");

    let settings = Settings::load(SETTINGS_FILE)?;

    let event_loop = EventLoop::new().map_err(|e| {
        error!("Failed to create event loop: {:?}", e);
        e
    })?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings)?;
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Application error: {:?}", e);
        return Err(Box::new(e));
    }
    if let Some(e) = app.take_error() {
        return Err(Box::new(e));
    }

    info!("Goodbye");
    Ok(())
}
