//! Fixed-depth minimax search.
//!
//! Exhaustive tree walk: White maximizes and Black minimizes the static
//! evaluation, with mate/stalemate values at terminal nodes. There is no
//! alpha-beta cutoff by design; the traversal visits every node up to the
//! requested depth. The best move only changes on a strict improvement, so
//! ties keep the first move in generation order.
//!
//! Cancellation is cooperative: a shared [`StopToken`] is checked at every
//! node, and node/time limits raise the same token, so `stop`, `go nodes`
//! and `go movetime` all take effect mid-search. At the root, a subtree cut
//! short by the token is discarded and the best fully-searched move so far
//! is reported.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;

use crate::board::chess_types::Color;
use crate::board::position::PositionState;
use crate::move_generation::attack_map::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_apply::{apply_move, undo_move};
use crate::move_generation::move_record::Move;
use crate::search::board_scoring::{evaluate, MATE_SCORE};

/// Shared cancellation flag, checked cooperatively at every search node.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub depth: u8,
    pub max_nodes: Option<u64>,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    #[inline]
    pub fn fixed_depth(depth: u8) -> Self {
        Self {
            depth,
            max_nodes: None,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

struct SearchContext<'a> {
    limits: &'a SearchLimits,
    stop: &'a StopToken,
    nodes: u64,
}

impl SearchContext<'_> {
    /// Raise the stop token once a limit is exceeded; deadline checks are
    /// batched to every 1024 nodes.
    fn check_limits(&mut self) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        if let Some(max_nodes) = self.limits.max_nodes {
            if self.nodes >= max_nodes {
                self.stop.request_stop();
                return true;
            }
        }
        if self.nodes & 0x3FF == 0 {
            if let Some(deadline) = self.limits.deadline {
                if Instant::now() >= deadline {
                    self.stop.request_stop();
                    return true;
                }
            }
        }
        false
    }
}

/// Search the position to `limits.depth` plies and pick a best move.
///
/// Depth 0 returns the static evaluation with no move. A position with no
/// legal moves returns the mate or stalemate score with no move.
pub fn search_best_move(
    state: &PositionState,
    limits: &SearchLimits,
    stop: &StopToken,
) -> SearchOutcome {
    let mut ctx = SearchContext {
        limits,
        stop,
        nodes: 1,
    };
    let mut root = state.clone();

    if limits.depth == 0 {
        return SearchOutcome {
            best_move: None,
            score: evaluate(&root),
            nodes: ctx.nodes,
        };
    }

    let maximizing = root.side_to_move == Color::White;
    let moves = legal_moves(&root);
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            score: terminal_score(&root),
            nodes: ctx.nodes,
        };
    }

    let mut best_move: Option<Move> = None;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

    for mv in &moves {
        let undo = apply_move(&mut root, mv);
        let value = minimax(&mut root, limits.depth - 1, &mut ctx);
        undo_move(&mut root, mv, &undo);

        if ctx.stop.is_stopped() {
            // The interrupted subtree returned a partial value; keep it only
            // when no move has been scored at all yet.
            if best_move.is_none() {
                best_move = Some(*mv);
                best_score = value;
            }
            break;
        }

        let improves = match best_move {
            None => true,
            Some(_) if maximizing => value > best_score,
            Some(_) => value < best_score,
        };
        if improves {
            best_move = Some(*mv);
            best_score = value;
        }
    }

    debug!(
        "search done: depth={} nodes={} score={} stopped={}",
        limits.depth,
        ctx.nodes,
        best_score,
        ctx.stop.is_stopped()
    );

    SearchOutcome {
        best_move,
        score: best_score,
        nodes: ctx.nodes,
    }
}

fn minimax(state: &mut PositionState, depth: u8, ctx: &mut SearchContext<'_>) -> i32 {
    ctx.nodes += 1;
    if ctx.check_limits() || depth == 0 {
        return evaluate(state);
    }

    let moves = legal_moves(state);
    if moves.is_empty() {
        return terminal_score(state);
    }

    let maximizing = state.side_to_move == Color::White;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for mv in &moves {
        let undo = apply_move(state, mv);
        let value = minimax(state, depth - 1, ctx);
        undo_move(state, mv, &undo);

        if maximizing {
            if value > best {
                best = value;
            }
        } else if value < best {
            best = value;
        }

        if ctx.stop.is_stopped() {
            break;
        }
    }

    best
}

/// Score for a side-to-move with no legal moves: mate against it, or a draw.
fn terminal_score(state: &PositionState) -> i32 {
    if is_king_in_check(state, state.side_to_move) {
        match state.side_to_move {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        }
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::chess_types::Square;
    use crate::utils::algebraic::move_to_text;

    #[test]
    fn depth_zero_returns_the_static_evaluation_without_a_move() {
        let state = PositionState::new_game();
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(0), &StopToken::new());
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn finds_a_back_rank_mate_in_one() {
        // Ra1-a8 mates.
        let state = PositionState::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("FEN should parse");
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(2), &StopToken::new());
        let best = outcome.best_move.expect("a best move must exist");
        assert_eq!(move_to_text(&best), "a1a8");
        assert_eq!(outcome.score, MATE_SCORE);
    }

    #[test]
    fn black_finds_the_mirrored_mate_and_minimizes() {
        let state = PositionState::from_fen("r3k3/8/8/8/8/8/5PPP/6K1 b - - 0 1")
            .expect("FEN should parse");
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(2), &StopToken::new());
        let best = outcome.best_move.expect("a best move must exist");
        assert_eq!(move_to_text(&best), "a8a1");
        assert_eq!(outcome.score, -MATE_SCORE);
    }

    #[test]
    fn checkmated_root_reports_the_loss_without_a_move() {
        let state = PositionState::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 1 1")
            .expect("FEN should parse");
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(3), &StopToken::new());
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, MATE_SCORE);
    }

    #[test]
    fn stalemated_root_reports_a_draw_without_a_move() {
        let state = PositionState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(3), &StopToken::new());
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn prefers_winning_a_queen_over_a_pawn() {
        // Pawn b4 can take the queen on a5 or the rook on c5.
        let state = PositionState::from_fen("4k3/8/8/q1r5/1P6/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(2), &StopToken::new());
        let best = outcome.best_move.expect("a best move must exist");
        assert_eq!(best.to, Square::new(3, 0), "takes the queen");
    }

    #[test]
    fn a_pre_raised_stop_token_still_yields_some_move() {
        let state = PositionState::new_game();
        let stop = StopToken::new();
        stop.request_stop();
        let outcome = search_best_move(&state, &SearchLimits::fixed_depth(4), &stop);
        assert!(outcome.best_move.is_some());
    }

    #[test]
    fn node_limit_cuts_the_search_short() {
        let state = PositionState::new_game();
        let limits = SearchLimits {
            depth: 6,
            max_nodes: Some(2_000),
            deadline: None,
        };
        let stop = StopToken::new();
        let outcome = search_best_move(&state, &limits, &stop);
        assert!(stop.is_stopped());
        assert!(outcome.nodes < 100_000);
        assert!(outcome.best_move.is_some());
    }
}
