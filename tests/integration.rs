//! Integration tests for the brinkmanship engine binary.
//!
//! Spawns the engine process, sends protocol lines on stdin, and checks the
//! replies on stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_brinkmanship");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start brinkmanship");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn snapshot_of(lines: &[String]) -> serde_json::Value {
    let line = lines.iter().find(|l| l.starts_with("snapshot ")).expect("no snapshot line");
    serde_json::from_str(&line["snapshot ".len()..]).unwrap()
}

const SEEDED_GAME: [&str; 3] = ["setoption name Seed value 2024", "setoption name Players value 3", "newgame"];

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_and_empty_lines_are_ignored() {
    let lines = run_engine(&["", "   ", "launch everything", "isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn eof_exits_cleanly() {
    assert!(run_engine(&[]).is_empty());
}

#[test]
fn commands_without_a_game_are_rejected() {
    let lines = run_engine(&["snapshot", "legal", r#"action {"player":0,"type":"end_turn"}"#]);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("rejected no_game")));
}

#[test]
fn newgame_deals_the_configured_players() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push("snapshot");
    let lines = run_engine(&cmds);
    assert_eq!(lines[0], "ok");
    let snap = snapshot_of(&lines);
    assert_eq!(snap["players"].as_array().unwrap().len(), 3);
    assert_eq!(snap["ownership"].as_array().unwrap().len(), 60);
    assert_eq!(snap["clock"]["year"], 1962);
}

#[test]
fn same_seed_gives_same_game() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push("snapshot");
    assert_eq!(run_engine(&cmds), run_engine(&cmds));
}

#[test]
fn legal_then_end_turn() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push("legal");
    let lines = run_engine(&cmds);
    let legal: serde_json::Value = serde_json::from_str(lines[1].strip_prefix("legal ").unwrap()).unwrap();
    let player = legal["player"].as_u64().unwrap();
    assert!(legal["actions"].as_array().unwrap().iter().any(|a| a["type"] == "end_turn"));

    let end = format!(r#"action {{"player":{},"type":"end_turn"}}"#, player);
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push(&end);
    cmds.push(&end);
    let lines = run_engine(&cmds);
    let expected = format!("rejected not_your_turn it is not P{}'s turn", player);
    assert_eq!(lines.last().unwrap(), &expected);
    assert!(lines[1..lines.len() - 1].iter().all(|l| l == "ok" || l.starts_with("event ")));
}

#[test]
fn malformed_action_is_rejected_without_crashing() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.extend([
        "action {not json",
        r#"action {"player":0,"type":"nuke_everyone"}"#,
        r#"action {"player":0,"type":"submit_clash_card","card":{"regiment":"air","tier":0,"variant":0}}"#,
        "isready",
    ]);
    let lines = run_engine(&cmds);
    assert!(lines[1].starts_with("rejected malformed"));
    assert!(lines[2].starts_with("rejected malformed"));
    assert!(lines[3].starts_with("rejected malformed"), "{}", lines[3]);
    assert_eq!(lines[4], "readyok");
}

#[test]
fn snapshot_load_round_trip() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push("snapshot");
    let first = run_engine(&cmds);
    let snap_line = first.last().unwrap().clone();
    let json = snap_line.strip_prefix("snapshot ").unwrap();

    let load = format!("load {}", json);
    let second = run_engine(&[load.as_str(), "snapshot"]);
    assert_eq!(second[0], "ok");
    assert_eq!(second[1], snap_line);
}

#[test]
fn truncated_ownership_map_is_rejected() {
    let mut cmds = SEEDED_GAME.to_vec();
    cmds.push("snapshot");
    let mut snap = snapshot_of(&run_engine(&cmds));
    snap["ownership"].as_array_mut().unwrap().truncate(10);
    let load = format!("load {}", snap);
    let lines = run_engine(&[load.as_str(), "snapshot"]);
    assert!(lines[0].starts_with("rejected snapshot"), "{}", lines[0]);
    assert!(lines[1].starts_with("rejected no_game"));
}

#[test]
fn minimal_session() {
    let lines = run_engine(&[
        "isready",
        "setoption name Seed value 1",
        "setoption name Players value 2",
        "newgame",
        "isready",
        "quit",
        "isready",
    ]);
    assert_eq!(lines, vec!["readyok", "ok", "readyok"]);
}
