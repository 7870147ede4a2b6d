//! Binary entrypoint for the Whodunit CLI.
//!
//! Commands:
//! - `play [--data <dir>] [--seed <n>]` - run a game over stdin/stdout
//! - `check [--data <dir>]` - load a world and report wiring problems
//!
//! See the library crate docs for module-level details: `whodunit::`.
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::Rng;

use whodunit::config::Config;
use whodunit::content;
use whodunit::engine::{parse_command, ConfirmPrompt, Game, World};
use whodunit::logutil::clean_log;

#[derive(Parser)]
#[command(name = "whodunit")]
#[command(about = "A murder-mystery adventure rules engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play {
        /// Seed data directory (defaults to the built-in world)
        #[arg(short, long)]
        data: Option<String>,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Load a world and report wiring problems without playing
    Check {
        /// Seed data directory (defaults to the built-in world)
        #[arg(short, long)]
        data: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { data, seed } => {
            let world = load_world(data.or(config.game.data_dir.clone()))?;
            let seed = seed
                .or(config.game.rng_seed)
                .unwrap_or_else(|| rand::thread_rng().gen());
            info!("starting game with seed {}", seed);
            play(world, seed)
        }
        Commands::Check { data } => {
            let world = load_world(data.or(config.game.data_dir))?;
            let problems = world.validate();
            if problems.is_empty() {
                println!(
                    "World is consistent: {} rooms, {} characters.",
                    world.room_ids().len(),
                    world.npc_ids().len()
                );
                Ok(())
            } else {
                for problem in &problems {
                    eprintln!("problem: {}", problem);
                }
                anyhow::bail!("{} problem(s) found", problems.len());
            }
        }
    }
}

fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_world(data_dir: Option<String>) -> Result<World> {
    match data_dir {
        Some(dir) => {
            content::load_world(&dir).with_context(|| format!("loading world from {}", dir))
        }
        None => Ok(content::canonical::world()),
    }
}

/// Yes/no prompt on the controlling terminal.
struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        println!("\n-- {} --\n{}", title, message);
        loop {
            print!("[y/n] > ");
            let _ = io::stdout().flush();
            let mut answer = String::new();
            if io::stdin().read_line(&mut answer).is_err() {
                return false;
            }
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer y or n."),
            }
        }
    }
}

fn play(world: World, seed: u64) -> Result<()> {
    let mut game = Game::new(world, seed, Box::new(StdinPrompt))?;

    println!("{}", game.world().meta.help_text);
    println!();
    println!("{}", game.world().room(&game.player().room_id)?.describe());

    let stdin = io::stdin();
    loop {
        print_exits(&game)?;
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }
        debug!("input: {}", clean_log(&line));

        match game.execute(parse_command(&line)) {
            Ok(outcome) => {
                if !outcome.text.is_empty() {
                    println!("\n{}\n", outcome.text);
                }
                if outcome.ending.is_some() {
                    break;
                }
            }
            // lookup errors are mistyped names; report and keep playing
            Err(err) => println!("\n{}\n", err),
        }
    }
    Ok(())
}

fn print_exits(game: &Game) -> Result<()> {
    let room = game.world().room(&game.player().room_id)?;
    let exits: Vec<&str> = room.exits.keys().map(String::as_str).collect();
    if !exits.is_empty() {
        println!("Exits: {}", exits.join(", "));
    }
    Ok(())
}
