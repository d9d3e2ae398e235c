//! Crate root module declarations for the Cedar Chess engine.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, UCI protocol handling, and utility helpers) so binaries, tests,
//! and external tooling can import stable module paths.

pub mod errors;

pub mod board {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod undo_record;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod generate_king;
    pub mod generate_knight;
    pub mod generate_pawn;
    pub mod generate_sliders;
    pub mod legal_move_generator;
    pub mod move_apply;
    pub mod move_record;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod uci {
    pub mod command;
    pub mod engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
}
