use std::io::{self, BufRead};

use log::warn;

use cedar_chess::uci::command::{parse_command, Command};
use cedar_chess::uci::engine::CommandEngine;

fn main() {
    env_logger::init();

    let mut engine = CommandEngine::new(Box::new(io::stdout()));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_command(trimmed) {
            Ok(Command::Quit) => break,
            Ok(command) => engine.submit(command),
            Err(err) => warn!("ignoring input line: {err}"),
        }
    }

    engine.shutdown();
}
