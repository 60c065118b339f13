//! Line protocol command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop dispatches on. JSON payloads are kept as raw text
//! here and decoded by the engine so it can report decode failures.

use tracing::warn;

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Deal a new game using the current options.
    NewGame,

    /// Apply one player action given as JSON.
    Action { json: String },

    /// Print the current world as a JSON snapshot.
    Snapshot,

    /// Replace the current world with a JSON snapshot.
    Load { json: String },

    /// List the legal actions of the player to act.
    Legal,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unknown commands and malformed
/// arguments.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "" => None,
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "snapshot" => Some(Command::Snapshot),
        "legal" => Some(Command::Legal),
        "quit" => Some(Command::Quit),
        "setoption" => parse_setoption(rest),
        "action" => payload(head, rest).map(|json| Command::Action { json }),
        "load" => payload(head, rest).map(|json| Command::Load { json }),
        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

fn payload(head: &str, rest: &str) -> Option<String> {
    if rest.is_empty() {
        warn!("malformed {head}: expected '{head} <json>'");
        return None;
    }
    Some(rest.to_string())
}

/// Parses the tail of `setoption name <id> [value <x>]`.
fn parse_setoption(rest: &str) -> Option<Command> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 2 || tokens[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[1..vi], &tokens[vi + 1..]),
        None => (&tokens[1..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Command::SetOption { name: name_parts.join(" "), value })
}
