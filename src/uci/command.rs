//! UCI command model and line parser.
//!
//! Commands are one sum type over per-command payloads, resolved by a single
//! parse function; an unknown command name is rejected here, before anything
//! reaches the engine. `position` is parsed all the way down to the
//! structured record plus a replay list, so the engine core never touches
//! text.

use crate::board::chess_rules::STARTING_POSITION_FEN;
use crate::board::chess_types::{PieceType, Square};
use crate::board::position::PositionRecord;
use crate::errors::EngineError;
use crate::utils::algebraic::parse_move_text;
use crate::utils::fen_parser::parse_fen;

/// One replayed move from `position ... moves`: origin, target, promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Search-control fields copied from a `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub ponder: bool,
    pub infinite: bool,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub depth: Option<u8>,
    pub nodes: Option<u64>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Uci,
    Debug(bool),
    IsReady,
    SetOption { name: String, value: String },
    UciNewGame,
    Position { record: PositionRecord, moves: Vec<MoveInput> },
    Go(SearchParameters),
    Stop,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, EngineError> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let name = tokens
        .next()
        .ok_or(EngineError::MissingArgument("command name"))?;

    match name {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "debug" => match tokens.next() {
            Some(mode) if mode.eq_ignore_ascii_case("on") => Ok(Command::Debug(true)),
            Some(mode) if mode.eq_ignore_ascii_case("off") => Ok(Command::Debug(false)),
            Some(other) => Err(EngineError::InvalidOptionValue {
                name: "debug".to_owned(),
                value: other.to_owned(),
            }),
            None => Err(EngineError::MissingArgument("debug mode")),
        },
        "setoption" => parse_setoption(trimmed),
        "position" => parse_position(trimmed),
        "go" => Ok(Command::Go(parse_go_params(trimmed))),
        other => Err(EngineError::UnknownCommand(other.to_owned())),
    }
}

fn parse_setoption(line: &str) -> Result<Command, EngineError> {
    let mut tokens = line.split_whitespace();
    let _ = tokens.next(); // setoption

    let mut name_tokens = Vec::<&str>::new();
    let mut value_tokens = Vec::<&str>::new();
    let mut mode = "";

    for tok in tokens {
        match tok {
            "name" => mode = "name",
            "value" => mode = "value",
            _ if mode == "name" => name_tokens.push(tok),
            _ if mode == "value" => value_tokens.push(tok),
            _ => {}
        }
    }

    if name_tokens.is_empty() {
        return Err(EngineError::MissingArgument("setoption name"));
    }

    Ok(Command::SetOption {
        name: name_tokens.join(" "),
        value: value_tokens.join(" "),
    })
}

fn parse_position(line: &str) -> Result<Command, EngineError> {
    let mut tokens = line.split_whitespace().peekable();
    let _ = tokens.next(); // position

    let record = match tokens.next() {
        Some("startpos") => {
            parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
        }
        Some("fen") => {
            let mut fen_parts = Vec::<&str>::new();
            while let Some(next) = tokens.peek() {
                if *next == "moves" {
                    break;
                }
                fen_parts.push(tokens.next().unwrap_or_default());
            }
            if fen_parts.is_empty() {
                return Err(EngineError::MissingArgument("FEN after 'position fen'"));
            }
            parse_fen(&fen_parts.join(" "))?
        }
        Some(other) => return Err(EngineError::UnknownCommand(format!("position {other}"))),
        None => return Err(EngineError::MissingArgument("position kind")),
    };

    let mut moves = Vec::<MoveInput>::new();
    if tokens.peek().copied() == Some("moves") {
        let _ = tokens.next();
        for text in tokens {
            let (from, to, promotion) = parse_move_text(text)?;
            moves.push(MoveInput {
                from,
                to,
                promotion,
            });
        }
    }

    Ok(Command::Position { record, moves })
}

fn parse_go_params(line: &str) -> SearchParameters {
    let mut params = SearchParameters::default();
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let mut i = 1usize;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                params.depth = tokens.get(i).and_then(|x| x.parse::<u8>().ok());
            }
            "nodes" => {
                i += 1;
                params.nodes = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "movetime" => {
                i += 1;
                params.movetime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "wtime" => {
                i += 1;
                params.wtime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "btime" => {
                i += 1;
                params.btime_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "winc" => {
                i += 1;
                params.winc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "binc" => {
                i += 1;
                params.binc_ms = tokens.get(i).and_then(|x| x.parse::<u64>().ok());
            }
            "movestogo" => {
                i += 1;
                params.movestogo = tokens.get(i).and_then(|x| x.parse::<u16>().ok());
            }
            "ponder" => {
                params.ponder = true;
            }
            "infinite" => {
                params.infinite = true;
            }
            _ => {}
        }
        i += 1;
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands_parse_by_name() {
        assert_eq!(parse_command("uci").expect("parses"), Command::Uci);
        assert_eq!(parse_command(" isready ").expect("parses"), Command::IsReady);
        assert_eq!(parse_command("stop").expect("parses"), Command::Stop);
        assert_eq!(parse_command("quit").expect("parses"), Command::Quit);
        assert_eq!(parse_command("debug on").expect("parses"), Command::Debug(true));
        assert_eq!(parse_command("debug OFF").expect("parses"), Command::Debug(false));
    }

    #[test]
    fn unknown_commands_are_rejected_at_this_boundary() {
        assert!(matches!(
            parse_command("banana"),
            Err(EngineError::UnknownCommand(_))
        ));
    }

    #[test]
    fn setoption_accumulates_multi_word_names_and_values() {
        let cmd = parse_command("setoption name Fixed Depth value 6").expect("parses");
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "Fixed Depth".to_owned(),
                value: "6".to_owned()
            }
        );
    }

    #[test]
    fn position_startpos_with_moves_produces_a_replay_list() {
        let cmd = parse_command("position startpos moves e2e4 e7e5 g1f3").expect("parses");
        let Command::Position { record, moves } = cmd else {
            panic!("expected a position command");
        };
        assert_eq!(record.placements.len(), 64);
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].from, Square::new(6, 4));
        assert_eq!(moves[0].to, Square::new(4, 4));
    }

    #[test]
    fn position_fen_collects_all_six_fields() {
        let cmd = parse_command(
            "position fen r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1 moves e1g1",
        )
        .expect("parses");
        let Command::Position { moves, .. } = cmd else {
            panic!("expected a position command");
        };
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn go_parses_clocks_limits_and_modes() {
        let Command::Go(params) = parse_command(
            "go wtime 120000 btime 60000 winc 1000 binc 1000 movestogo 24 depth 6 nodes 50000 movetime 2500 ponder infinite",
        )
        .expect("parses") else {
            panic!("expected a go command");
        };
        assert_eq!(params.wtime_ms, Some(120_000));
        assert_eq!(params.btime_ms, Some(60_000));
        assert_eq!(params.winc_ms, Some(1_000));
        assert_eq!(params.binc_ms, Some(1_000));
        assert_eq!(params.movestogo, Some(24));
        assert_eq!(params.depth, Some(6));
        assert_eq!(params.nodes, Some(50_000));
        assert_eq!(params.movetime_ms, Some(2_500));
        assert!(params.ponder);
        assert!(params.infinite);
    }

    #[test]
    fn bare_go_leaves_every_limit_unset() {
        let Command::Go(params) = parse_command("go").expect("parses") else {
            panic!("expected a go command");
        };
        assert_eq!(params, SearchParameters::default());
    }
}
