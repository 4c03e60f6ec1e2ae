//! Orrery lab: a Sun–Earth–Moon system drawn with a hierarchical matrix stack.

mod app;
mod solar;

use anyhow::Result;
use winit::dpi::LogicalSize;

use orrery_engine::camera::RotatorConfig;
use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{Runtime, RuntimeConfig};

use app::{LabApp, TITLE};
use solar::SolarConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("{TITLE}");
    log::info!("drag with the left mouse button or use the arrow keys to orbit");
    log::info!("Space pauses, R resets the camera, P logs the matrix stack, Esc quits");

    let runtime = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: LogicalSize::new(720.0, 720.0),
        ..Default::default()
    };

    // No vsync, so the title shows the real frame time.
    let gpu = GpuInit {
        present_mode: wgpu::PresentMode::AutoNoVsync,
        ..Default::default()
    };

    let app = LabApp::new(SolarConfig::default(), RotatorConfig::default());
    Runtime::run(runtime, gpu, app)
}
