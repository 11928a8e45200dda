use winit::event_loop::{ControlFlow, EventLoop};

use plume::window::App;
use plume::DemoError;

fn main() -> Result<(), DemoError> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
