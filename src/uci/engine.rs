//! Command engine: the actor that owns all mutable engine state.
//!
//! One incoming worker thread receives parsed [`Command`]s over a channel and
//! is the only code that touches the position, options and search control.
//! One outgoing worker serializes response lines to the sink. Command
//! handlers append their responses to an outbox that is drained to the
//! outgoing channel only after the handler returns, so a command's responses
//! never interleave with its own processing. `readyok` is deferred until the
//! pending-command counter drains to zero.
//!
//! `go` snapshots the position and searches on its own thread with a fresh
//! [`StopToken`]; while that search runs, `position` and `ucinewgame` are
//! ignored and `stop` raises the token.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::warn;

use crate::board::chess_types::Color;
use crate::board::position::{PositionRecord, PositionState};
use crate::errors::EngineError;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::move_apply::apply_move;
use crate::move_generation::move_record::Move;
use crate::search::minimax::{search_best_move, SearchLimits, StopToken};
use crate::uci::command::{Command, MoveInput, SearchParameters};
use crate::utils::algebraic::{move_to_text, square_to_text};

const ENGINE_NAME: &str = "Cedar Chess";
const ENGINE_AUTHOR: &str = "the Cedar Chess developers";
const DEFAULT_FIXED_DEPTH: u8 = 4;
const DEFAULT_MOVES_TO_GO: u64 = 30;

enum Outgoing {
    Line(String),
    Shutdown,
}

/// Handle to the engine actor. Cloning the channels is internal; callers
/// interact through [`CommandEngine::submit`] and the read-only probes.
pub struct CommandEngine {
    command_tx: Sender<Command>,
    outgoing_tx: Sender<Outgoing>,
    pending: Arc<AtomicUsize>,
    search_running: Arc<AtomicBool>,
    current_fen: Arc<Mutex<String>>,
    worker: Option<thread::JoinHandle<()>>,
    writer: Option<thread::JoinHandle<()>>,
}

impl CommandEngine {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        let (command_tx, command_rx) = unbounded::<Command>();
        let (outgoing_tx, outgoing_rx) = unbounded::<Outgoing>();
        let pending = Arc::new(AtomicUsize::new(0));
        let search_running = Arc::new(AtomicBool::new(false));
        let current_fen = Arc::new(Mutex::new(PositionState::new_game().get_fen()));

        let writer = thread::spawn(move || write_outgoing(sink, outgoing_rx));
        let worker = {
            let outgoing_tx = outgoing_tx.clone();
            let pending = Arc::clone(&pending);
            let search_running = Arc::clone(&search_running);
            let current_fen = Arc::clone(&current_fen);
            thread::spawn(move || {
                run_worker(command_rx, outgoing_tx, pending, search_running, current_fen)
            })
        };

        Self {
            command_tx,
            outgoing_tx,
            pending,
            search_running,
            current_fen,
            worker: Some(worker),
            writer: Some(writer),
        }
    }

    /// Queue a command for the worker. Commands are handled strictly in
    /// submission order.
    pub fn submit(&self, command: Command) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.command_tx.send(command).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            warn!("command worker has exited; dropping command");
        }
    }

    #[inline]
    pub fn pending_commands(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn search_running(&self) -> bool {
        self.search_running.load(Ordering::SeqCst)
    }

    /// FEN of the position the worker currently holds, as last published by
    /// a `position` or `ucinewgame` command.
    pub fn current_position_fen(&self) -> String {
        self.current_fen
            .lock()
            .expect("position fen mutex poisoned")
            .clone()
    }

    /// Stop the workers and join their threads. Waits for any in-flight
    /// search to report its bestmove before closing the output.
    pub fn shutdown(&mut self) {
        self.submit(Command::Quit);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        while self.search_running.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(5));
        }
        let _ = self.outgoing_tx.send(Outgoing::Shutdown);
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CommandEngine {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.shutdown();
        }
    }
}

fn write_outgoing(mut sink: Box<dyn Write + Send>, outgoing_rx: Receiver<Outgoing>) {
    while let Ok(message) = outgoing_rx.recv() {
        match message {
            Outgoing::Line(line) => {
                if writeln!(sink, "{line}").and_then(|_| sink.flush()).is_err() {
                    warn!("response sink closed; stopping output worker");
                    break;
                }
            }
            Outgoing::Shutdown => break,
        }
    }
}

/// All mutable engine state, owned exclusively by the worker thread.
struct EngineState {
    position: PositionState,
    options: HashMap<String, String>,
    debug: bool,
    fixed_depth: u8,
    stop: StopToken,
    ready_waiters: usize,
    outbox: Vec<String>,
    outgoing_tx: Sender<Outgoing>,
    search_running: Arc<AtomicBool>,
    current_fen: Arc<Mutex<String>>,
}

impl EngineState {
    fn publish_fen(&self) {
        *self
            .current_fen
            .lock()
            .expect("position fen mutex poisoned") = self.position.get_fen();
    }
}

fn run_worker(
    command_rx: Receiver<Command>,
    outgoing_tx: Sender<Outgoing>,
    pending: Arc<AtomicUsize>,
    search_running: Arc<AtomicBool>,
    current_fen: Arc<Mutex<String>>,
) {
    let mut state = EngineState {
        position: PositionState::new_game(),
        options: HashMap::new(),
        debug: false,
        fixed_depth: DEFAULT_FIXED_DEPTH,
        stop: StopToken::new(),
        ready_waiters: 0,
        outbox: Vec::new(),
        outgoing_tx,
        search_running,
        current_fen,
    };
    state.publish_fen();

    while let Ok(command) = command_rx.recv() {
        let is_quit = matches!(command, Command::Quit);

        if let Err(err) = handle_command(&mut state, command) {
            warn!("command failed: {err}");
            state.outbox.push(format!("info string error: {err}"));
        }

        for line in state.outbox.drain(..) {
            let _ = state.outgoing_tx.send(Outgoing::Line(line));
        }

        let remaining = pending.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 && state.ready_waiters > 0 {
            for _ in 0..state.ready_waiters {
                let _ = state.outgoing_tx.send(Outgoing::Line("readyok".to_owned()));
            }
            state.ready_waiters = 0;
        }

        if is_quit {
            break;
        }
    }
}

fn handle_command(state: &mut EngineState, command: Command) -> Result<(), EngineError> {
    match command {
        Command::Uci => {
            announce_identity(state);
            Ok(())
        }
        Command::Debug(enabled) => {
            state.debug = enabled;
            Ok(())
        }
        Command::IsReady => {
            state.ready_waiters += 1;
            Ok(())
        }
        Command::SetOption { name, value } => set_option(state, name, value),
        Command::UciNewGame => {
            reset_game(state);
            Ok(())
        }
        Command::Position { record, moves } => set_position(state, record, moves),
        Command::Go(params) => {
            start_search(state, params);
            Ok(())
        }
        Command::Stop | Command::Quit => {
            state.stop.request_stop();
            Ok(())
        }
    }
}

fn announce_identity(state: &mut EngineState) {
    state
        .outbox
        .push(format!("id name {ENGINE_NAME} {}", env!("CARGO_PKG_VERSION")));
    state.outbox.push(format!("id author {ENGINE_AUTHOR}"));
    state.outbox.push(format!(
        "option name FixedDepth type spin default {DEFAULT_FIXED_DEPTH} min 1 max 8"
    ));
    state
        .outbox
        .push("option name Ponder type check default false".to_owned());
    state.outbox.push("uciok".to_owned());
}

fn set_option(state: &mut EngineState, name: String, value: String) -> Result<(), EngineError> {
    let key = name.to_ascii_lowercase().replace(' ', "");
    if key == "fixeddepth" {
        let depth = value
            .parse::<u8>()
            .ok()
            .filter(|d| (1..=8).contains(d))
            .ok_or_else(|| EngineError::InvalidOptionValue {
                name: name.clone(),
                value: value.clone(),
            })?;
        state.fixed_depth = depth;
    }
    state.options.insert(name, value);
    Ok(())
}

fn reset_game(state: &mut EngineState) {
    if state.search_running.load(Ordering::SeqCst) {
        warn!("ucinewgame ignored while a search is running");
        return;
    }
    state.position = PositionState::new_game();
    state.publish_fen();
}

fn set_position(
    state: &mut EngineState,
    record: PositionRecord,
    moves: Vec<MoveInput>,
) -> Result<(), EngineError> {
    if state.search_running.load(Ordering::SeqCst) {
        warn!("position ignored while a search is running");
        if state.debug {
            state
                .outbox
                .push("info string position ignored while searching".to_owned());
        }
        return Ok(());
    }

    let mut position = PositionState::from_record(&record)?;
    replay_moves(&mut position, &moves)?;
    state.position = position;
    state.publish_fen();
    if state.debug {
        state
            .outbox
            .push(format!("info string position set to {}", state.position.get_fen()));
    }
    Ok(())
}

/// Replay a `position ... moves` list, resolving each input against the
/// legal moves of the evolving position.
fn replay_moves(position: &mut PositionState, inputs: &[MoveInput]) -> Result<(), EngineError> {
    for input in inputs {
        let mv = find_matching_move(position, input)?;
        apply_move(position, &mv);
    }
    Ok(())
}

fn find_matching_move(
    position: &PositionState,
    input: &MoveInput,
) -> Result<Move, EngineError> {
    legal_moves(position)
        .into_iter()
        .find(|mv| mv.from == input.from && mv.to == input.to && mv.promotion == input.promotion)
        .ok_or_else(|| {
            EngineError::IllegalMove(format!(
                "{}{}",
                square_to_text(input.from),
                square_to_text(input.to)
            ))
        })
}

fn start_search(state: &mut EngineState, params: SearchParameters) {
    if state.search_running.load(Ordering::SeqCst) {
        warn!("go ignored while a search is running");
        state
            .outbox
            .push("info string error: a search is already running".to_owned());
        return;
    }

    let snapshot = state.position.clone();
    let limits = build_limits(&params, snapshot.side_to_move, state.fixed_depth);
    let stop = StopToken::new();
    state.stop = stop.clone();
    state.search_running.store(true, Ordering::SeqCst);

    let running = Arc::clone(&state.search_running);
    let outgoing = state.outgoing_tx.clone();
    thread::spawn(move || {
        let outcome = search_best_move(&snapshot, &limits, &stop);
        let _ = outgoing.send(Outgoing::Line(format!(
            "info depth {} nodes {} score cp {}",
            limits.depth, outcome.nodes, outcome.score
        )));
        let line = match outcome.best_move {
            Some(mv) => format!("bestmove {}", move_to_text(&mv)),
            None => "bestmove 0000".to_owned(),
        };
        let _ = outgoing.send(Outgoing::Line(line));
        running.store(false, Ordering::SeqCst);
    });
}

/// Translate `go` parameters into concrete search limits. An explicit
/// `movetime` wins; otherwise the side's remaining clock is split over the
/// moves to go plus half the increment. `infinite` suppresses the deadline.
fn build_limits(params: &SearchParameters, side: Color, fixed_depth: u8) -> SearchLimits {
    let depth = params.depth.unwrap_or(fixed_depth);

    let deadline = if params.infinite {
        None
    } else if let Some(ms) = params.movetime_ms {
        Some(Instant::now() + Duration::from_millis(ms))
    } else {
        let remaining = match side {
            Color::White => params.wtime_ms,
            Color::Black => params.btime_ms,
        };
        let increment = match side {
            Color::White => params.winc_ms,
            Color::Black => params.binc_ms,
        }
        .unwrap_or(0);
        remaining.map(|ms| {
            let divisor = match params.movestogo {
                Some(n) => u64::from(n).max(1),
                None => DEFAULT_MOVES_TO_GO,
            };
            let budget = (ms / divisor + increment / 2).max(1);
            Instant::now() + Duration::from_millis(budget)
        })
    };

    SearchLimits {
        depth,
        max_nodes: params.nodes,
        deadline,
    }
}
