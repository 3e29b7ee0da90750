// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use std::io;

/// Everything that can go wrong inside the engine. "Nothing to undo" is not
/// in here: that condition is reported as an empty result, not a failure.
#[derive(Debug)]
pub enum Error {
    /// a move targeted a coordinate outside the board
    OutOfRange { row: usize, col: usize, rows: usize, cols: usize },
    /// the puzzle definition source could not be opened or read
    PuzzleNotFound(String),
    /// the puzzle definition was readable but structurally invalid
    PuzzleFormat(String),
    /// a move-file line had the wrong shape (1-based line number)
    MoveFileFormat { line: usize, reason: String },
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfRange { row, col, rows, cols } =>
                write!(f, "move target (col={}, row={}) is outside the {}x{} board",
                       col, row, rows, cols),
            Error::PuzzleNotFound(msg) =>
                write!(f, "puzzle source could not be read: {}", msg),
            Error::PuzzleFormat(msg) =>
                write!(f, "malformed puzzle definition: {}", msg),
            Error::MoveFileFormat { line, reason } =>
                write!(f, "malformed move file at line {}: {}", line, reason),
            Error::Io(err) =>
                write!(f, "i/o error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
