//! Random self-play CLI.
//!
//! Plays games with random legal actions and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --players N     Players per game (default: 4)
//!   --max-rounds N  Rounds before a game is abandoned (default: 40)
//!   --max-actions N Action cap per game (default: 5000)
//!   --rules FILE    Rules JSON (default: standard rules)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --record        Include every applied action in the records
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::error;
use tracing_subscriber::EnvFilter;

use brinkmanship::config::RulesConfig;
use brinkmanship::selfplay::{self, SelfPlayConfig, Summary};

struct Args {
    config: SelfPlayConfig,
    output: Option<String>,
    quiet: bool,
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    args.get(i).and_then(|v| v.parse().ok()).ok_or_else(|| format!("invalid {} value", flag))
}

fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args { config: SelfPlayConfig::default(), output: None, quiet: false };
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--games" => {
                i += 1;
                parsed.config.num_games = value(args, i, flag)?;
            }
            "--players" => {
                i += 1;
                parsed.config.players = value(args, i, flag)?;
            }
            "--max-rounds" => {
                i += 1;
                parsed.config.max_rounds = value(args, i, flag)?;
            }
            "--max-actions" => {
                i += 1;
                parsed.config.max_actions = value(args, i, flag)?;
            }
            "--rules" => {
                i += 1;
                let path: String = value(args, i, flag)?;
                let json = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
                parsed.config.rules = RulesConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
            }
            "--threads" => {
                i += 1;
                parsed.config.threads = value(args, i, flag)?;
            }
            "--seed" => {
                i += 1;
                parsed.config.seed = value(args, i, flag)?;
            }
            "--record" => parsed.config.record_actions = true,
            "--output" => {
                i += 1;
                parsed.output = Some(value(args, i, flag)?);
            }
            "--quiet" => parsed.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("BRINKMANSHIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let Args { config, output, quiet } = match parse_args(&args) {
        Ok(Some(a)) => a,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if !quiet {
        eprintln!(
            "Self-play: {} games, {} players, max {} rounds, {} threads",
            config.num_games, config.players, config.max_rounds, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            error!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !quiet {
        eprintln!("Completed {} games in {:.1}s", games.len(), start.elapsed().as_secs_f64());
        eprintln!("{}", Summary::of(&games));
    }

    let written = match &output {
        Some(path) => File::create(path).and_then(|f| selfplay::write_jsonl(&games, &mut BufWriter::new(f))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&output, quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --players N      Players per game (default: 4)");
    eprintln!("  --max-rounds N   Rounds before a game is abandoned (default: 40)");
    eprintln!("  --max-actions N  Action cap per game (default: 5000)");
    eprintln!("  --rules FILE     Rules JSON (default: standard rules)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --record         Include every applied action in the records");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
