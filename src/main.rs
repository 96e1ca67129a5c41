use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use dialogs::cli::CliArgs;
use dialogs::scene::Scene;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    dialogs::tracing::init();

    let config = args.apply(args.load_config());
    let scene = Scene::from_config(&config)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(scene, config);

    event_loop.run_app(&mut app)?;

    Ok(())
}
