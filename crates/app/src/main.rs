//! Tombola - raffle draws with a slot-machine spin
//!
//! Loads a roster of `name, department` lines, spins a terminal reel to a
//! random winner, records who attended and exports the winner list.

use std::path::PathBuf;

use clap::Parser;
use tombola_core::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod console;
mod cues;
mod notice;
mod state;
mod terminal;

#[derive(Parser, Debug)]
#[command(name = "tombola", version, about = "Raffle draws with a slot-machine spin")]
struct Args {
    /// File with one `name, department` entry per line
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Event the raffle is held for
    #[arg(short, long)]
    event: Option<String>,

    /// Event date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Settings file (defaults to tombola.toml in the config directory)
    #[arg(short, long, env = "TOMBOLA_CONFIG")]
    config: Option<PathBuf>,

    /// Do not ring the terminal bell
    #[arg(long)]
    no_sound: bool,
}

fn main() {
    // Logs go to stderr so they stay out of the reel
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::info!("Starting Tombola");

    let settings = match &args.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load_default(),
    };
    let mut settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };
    if args.no_sound {
        settings.sound = false;
    }

    // Single-threaded: the spin and the command loop take turns
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    let app_state = match state::AppState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let options = console::SetupOptions {
        roster: args.roster,
        event: args.event,
        date: args.date,
    };
    let mut console = console::Console::stdio(app_state, options);

    if let Err(e) = runtime.block_on(console.run()) {
        tracing::error!("Tombola stopped: {}", e);
        std::process::exit(1);
    }
}
