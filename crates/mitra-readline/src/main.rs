use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use mitra_core::MitraConfig;
use mitra_core::breathing::PatternKey;
use mitra_execution::telemetry;

mod input;
mod render;

use input::{HELP, Input, SLASH_COMMANDS, parse_line};

#[derive(Parser)]
#[command(name = "mitra")]
#[command(about = "Mitra - a calm companion for your terminal", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/mitra/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Initial breathing pattern: 4-4-4, 4-7-8, 6-2-6 or 5-5-5
    #[arg(long, value_parser = parse_pattern)]
    pattern: Option<PatternKey>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn parse_pattern(key: &str) -> std::result::Result<PatternKey, String> {
    PatternKey::parse(key).map_err(|e| e.to_string())
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.trim_end().to_string(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Loads the configuration file and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<MitraConfig> {
    let path = cli.config.clone().or_else(MitraConfig::default_path);
    let mut config = match path {
        Some(path) => MitraConfig::load(&path)?,
        None => MitraConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(pattern) = cli.pattern {
        config.default_pattern = pattern;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // ===== Logging =====
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match cli.log_dir.clone().or_else(MitraConfig::default_log_dir) {
        Some(log_dir) => Some(telemetry::init_file_logging(&log_dir)?),
        None => {
            telemetry::init_stderr_logging()?;
            None
        }
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(
        target: "repl",
        seeded = config.seed.is_some(),
        pattern = %config.default_pattern,
        "Starting Mitra REPL"
    );

    // ===== Runtime =====
    let companion_name = config.companion_name.clone();
    let (handle, mut updates) = mitra_execution::spawn(config, rng)?;

    let renderer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            render::print_update(&update, &companion_name);
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Mitra ===".bright_magenta().bold());
    println!(
        "{}",
        "Share how you feel, type '/help' for activities, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let input = match parse_line(&line) {
                    Ok(input) => input,
                    Err(e) => {
                        println!("{}", e.to_string().yellow());
                        continue;
                    }
                };

                match input {
                    Input::Empty => continue,
                    Input::Quit => {
                        println!("{}", "Take care. Goodbye!".bright_green());
                        break;
                    }
                    Input::Help => println!("{}", HELP.bright_black()),
                    Input::ListPatterns => render::print_patterns(),
                    Input::ListSwatches => render::print_swatches(),
                    Input::Command(command) => {
                        if let Err(e) = handle.send(command).await {
                            eprintln!("{}", format!("Error: {}", e).red());
                            break;
                        }
                    }
                }

                let _ = rl.add_history_entry(line.trim());
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Stopping the runtime cancels every timer and closes the update stream
    let transcript = handle.shutdown().await?;
    let _ = renderer.await;
    tracing::info!(target: "repl", messages = transcript.len(), "REPL exited");

    Ok(())
}
