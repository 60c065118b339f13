//! Brinkmanship rules engine speaking a line protocol.
//!
//! Reads commands from stdin and writes replies to stdout. Logs go to
//! stderr, filtered by `BRINKMANSHIP_LOG` (default `warn`).

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use brinkmanship::engine::Engine;
use brinkmanship::protocol::parser::{parse_command, Command};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("BRINKMANSHIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(&mut out)?,
            Command::Action { json } => engine.handle_action(&json, &mut out)?,
            Command::Snapshot => engine.handle_snapshot(&mut out)?,
            Command::Load { json } => engine.handle_load(&json, &mut out)?,
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
