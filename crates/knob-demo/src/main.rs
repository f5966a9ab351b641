use clap::{Parser, Subcommand};
use knob::{KnobConfig, TurnType};
use knob_demo::config;
use knob_demo::gui::app::{self, AppModel};
use knob_demo::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "knob-demo", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// How dragging turns the knob: horizontal, vertical, dist or angle
    /// (overrides the config file)
    #[arg(short = 't', long)]
    turn_type: Option<TurnType>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file, if none exists, and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let knob = app::build_knob(&config.knob, cli.turn_type).or_else(|e| {
        log::warn!("Invalid knob configuration, using the defaults: {}", e);
        app::build_knob(&KnobConfig::default(), cli.turn_type)
    })?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // the command line belongs to clap, not GTK
    let app = RelmApp::new("org.knob.demo").with_args(Vec::new());

    app.run::<AppModel>((config.window, knob, cli.turn_type, rx));
    Ok(())
}
