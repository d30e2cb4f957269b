use clap::Parser;
use handgrip::app::GrabApp;
use handgrip::components::InputAction;
use handgrip::scene::scenario::ScenarioKind;
use handgrip::scene::test_scene::HandBindings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handgrip", about = "Headless VR hand grab sandbox")]
struct Args {
    /// Scripted session to play
    #[arg(long, value_enum, default_value = "toss")]
    scenario: ScenarioKind,

    /// Ticks to simulate at 60 Hz (defaults to the scenario length)
    #[arg(long)]
    ticks: Option<u32>,

    /// Action the left hand listens for
    #[arg(long, value_enum, default_value = "grip")]
    left_action: InputAction,

    /// Action the right hand listens for
    #[arg(long, value_enum, default_value = "grip")]
    right_action: InputAction,

    /// Log every input event and contact change
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "handgrip=trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bindings = HandBindings {
        left: args.left_action,
        right: args.right_action,
    };
    let mut app = GrabApp::new(args.scenario, bindings)?;
    let ticks = args.ticks.unwrap_or(app.scenario_length());

    let events = app.run(ticks);
    let released = app.teardown();
    info!(grab_events = events.len(), released_on_teardown = released.len(), "done");
    Ok(())
}
