// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use std::slice;

use log::info;

use super::board::Board;
use super::cell::CellState;
use super::error::Error;

/// A single cell-state assignment. Coordinates are validated by the board
/// at apply time, not here.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub state: CellState,
}

impl Move {
    pub fn new(row: usize, col: usize, state: CellState) -> Move {
        Move { row, col, state }
    }
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(col={:-2}, row={:-2}) -> {}", self.col, self.row, self.state)
    }
}

/// The ordered, replayable log of applied moves. Owned by the session, not
/// the board, so the same log can be persisted and replayed independently
/// of any live grid. Append-only during play; truncated only by `clear`.
pub struct MoveLedger {
    moves: Vec<Move>,
}

impl MoveLedger {
    pub fn new() -> MoveLedger {
        MoveLedger { moves: Vec::new() }
    }

    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn iter(&self) -> slice::Iter<Move> { self.moves.iter() }
    pub fn moves(&self) -> &[Move] { &self.moves }

    /// Empties the log without touching any board state; callers pair this
    /// with `Board::clear`.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Pops the most recent move and applies its inverse to the board. The
    /// prior state is not looked up from history: every state has a unique
    /// predecessor in the toggle cycle, so the inverse is derived from the
    /// popped state alone. The inverse application is not re-recorded.
    ///
    /// An empty ledger is not an error; it reports `Ok(None)`.
    pub fn undo_last(&mut self, board: &mut Board) -> Result<Option<Move>, Error> {
        let last = match self.moves.pop() {
            None => {
                info!(target: "moves", "nothing to undo");
                return Ok(None);
            }
            Some(mv) => mv,
        };
        let inverse = Move::new(last.row, last.col, last.state.prev());
        board.apply_move(inverse)?;
        Ok(Some(inverse))
    }
}
