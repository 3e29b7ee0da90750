// vim: set ai et ts=4 sts=4 sw=4:
use std::convert::TryFrom;
use std::fmt;
use std::path::Path;

use log::info;

use super::board::Board;
use super::cell::CellState;
use super::codec;
use super::error::Error;
use super::loader;
use super::moves::{Move, MoveLedger};
use super::notify::{BoardEvent, SubscriptionId};

/// Puzzle difficulty. An explicit variant instead of a string key; each one
/// maps to a configuration record a front-end can size itself from.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Per-difficulty configuration. The engine only consumes `puzzle_source`
/// and `save_file`; the geometry fields are the published contract for a
/// windowed front-end.
pub struct DifficultySettings {
    pub puzzle_source: &'static str,
    pub save_file: &'static str,
    pub cell_size: (u32, u32),
    pub window_size: (u32, u32),
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                puzzle_source: "puzzles/tiny.yaml",
                save_file: "easy-moves.txt",
                cell_size: (25, 25),
                window_size: (800, 500),
            },
            Difficulty::Medium => DifficultySettings {
                puzzle_source: "puzzles/medium.yaml",
                save_file: "medium-moves.txt",
                cell_size: (25, 25),
                window_size: (1000, 750),
            },
            Difficulty::Hard => DifficultySettings {
                puzzle_source: "puzzles/hard.yaml",
                save_file: "hard-moves.txt",
                cell_size: (25, 25),
                window_size: (1200, 850),
            },
        }
    }
}
impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Difficulty::Easy   => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard   => "hard",
        })
    }
}
impl TryFrom<&str> for Difficulty {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "easy"   => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard"   => Ok(Difficulty::Hard),
            _        => Err("Not a valid Difficulty value"),
        }
    }
}

/// One play session: a board paired with its move ledger. The pair is
/// created together and replaced together, so switching puzzles can never
/// carry stale moves over.
pub struct Session {
    board: Board,
    ledger: MoveLedger,
}

impl Session {
    pub fn new(board: Board) -> Session {
        Session {
            board: board,
            ledger: MoveLedger::new(),
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Result<Session, Error> {
        let board = loader::load_puzzle_file(difficulty.settings().puzzle_source)?;
        info!(target: "session", "started a {} {}x{} puzzle",
              difficulty, board.rows(), board.cols());
        Ok(Session::new(board))
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn ledger(&self) -> &MoveLedger { &self.ledger }

    /// Applies a move and records it. The single entry point for play
    /// mutations; anything applied here is undoable.
    pub fn new_move(&mut self, row: usize, col: usize, state: CellState) -> Result<(), Error> {
        let mv = Move::new(row, col, state);
        self.board.apply_move(mv)?;
        self.ledger.record(mv);
        Ok(())
    }

    /// Cycles a cell one step forward (Unknown -> Filled -> Empty -> Unknown).
    /// This is how click/keypress input arrives from a view layer.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState, Error> {
        let current = match self.board.cell(row, col) {
            Some(cell) => cell.get_state(),
            None => return Err(Error::OutOfRange {
                row: row,
                col: col,
                rows: self.board.rows(),
                cols: self.board.cols(),
            }),
        };
        let next = current.next();
        self.new_move(row, col, next)?;
        Ok(next)
    }

    pub fn undo(&mut self) -> Result<Option<Move>, Error> {
        self.ledger.undo_last(&mut self.board)
    }

    pub fn clear_board(&mut self) {
        self.ledger.clear();
        self.board.clear();
    }

    /// Replaces the board AND the ledger with a fresh pair. Subscriptions
    /// belong to the old board and are dropped with it; observers of the
    /// new puzzle must re-subscribe.
    pub fn load_puzzle<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let board = loader::load_puzzle_file(path)?;
        self.board = board;
        self.ledger = MoveLedger::new();
        Ok(())
    }

    /// Resets the board and ledger, then replays the file, so a loaded game
    /// reproduces exactly the file's state; it never merges with play that
    /// happened before. A malformed line still aborts mid-replay with the
    /// earlier lines applied.
    pub fn load_moves<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Error> {
        self.clear_board();
        codec::load_moves_file(path, &mut self.board, &mut self.ledger)
    }

    pub fn save_moves<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        codec::save_moves_file(&self.ledger, path)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BoardEvent) + 'static,
    {
        self.board.subscribe(callback)
    }

    pub fn is_row_solved(&self, row: usize) -> bool { self.board.is_row_solved(row) }
    pub fn is_col_solved(&self, col: usize) -> bool { self.board.is_col_solved(col) }
    pub fn is_solved(&self) -> bool { self.board.is_solved() }
}
