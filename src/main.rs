//! Script driver for the gesture tree interaction core.
//!
//! Reads commands (see `gesture_tree::script`) from a file or stdin and prints
//! JSON snapshots for `state`/`status` lines. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use gesture_tree::InteractionMachine;
use gesture_tree::script::{ScriptOutput, ScriptRunner, parse_line};
use gesture_tree::settings::{Settings, default_settings_path};
use gesture_tree::settings_watcher::{SettingsEvent, SettingsWatcher};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Command-line arguments for gesture-tree
#[derive(Parser, Debug)]
#[command(name = "gesture-tree")]
#[command(about = "Drive the gesture tree interaction core from a command script")]
#[command(version)]
struct Args {
    /// Script file to read (stdin if omitted)
    script: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible photo placement
    #[arg(long)]
    seed: Option<u64>,

    /// Reload settings when the settings file changes
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    gesture_tree::logging::init();
    let args = Args::parse();

    let settings_path = args.config.clone().or_else(default_settings_path);
    let settings = settings_path
        .as_deref()
        .map(Settings::load_from)
        .unwrap_or_default();

    let machine = match args.seed {
        Some(seed) => InteractionMachine::seeded(settings, seed),
        None => InteractionMachine::new(settings),
    };
    let mut runner = ScriptRunner::new(machine);

    let mut watcher = match (&settings_path, args.watch) {
        (Some(path), true) => Some(
            SettingsWatcher::new(path.clone())
                .with_context(|| format!("failed to watch {}", path.display()))?,
        ),
        _ => None,
    };

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    info!(seed = ?args.seed, "Running interaction script");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read script")?;
        let line_no = index + 1;

        if let Some(watcher) = watcher.as_mut() {
            match watcher.poll() {
                Some(SettingsEvent::Changed) => {
                    info!("Settings file changed, reloading...");
                    runner
                        .machine_mut()
                        .apply_settings(Settings::load_from(watcher.path()));
                }
                Some(SettingsEvent::Deleted) => warn!("Settings file deleted"),
                Some(SettingsEvent::Error(e)) => warn!("Settings watch error: {}", e),
                None => {}
            }
        }

        let command = match parse_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                warn!(line = line_no, "Skipping line: {:#}", e);
                continue;
            }
        };

        match runner.run(command) {
            Ok(ScriptOutput::Json(json)) => writeln!(out, "{json}")?,
            Ok(ScriptOutput::Outcome(outcome)) => debug!(line = line_no, ?outcome, "Applied"),
            Ok(ScriptOutput::Waited) => {}
            Err(e) => warn!(line = line_no, "Command failed: {:#}", e),
        }
    }

    out.flush()?;
    Ok(())
}
