// vim: set ai et ts=4 sts=4 sw=4:
//! Flat text round-trip for the move ledger: one `row,col,state` line per
//! move, comma-separated decimal integers, no header, order-significant.
//! State codes are `CellState::code` (0=Unknown, 1=Filled, 2=Empty).
//!
//! Loading replays: each decoded move is applied to the board and recorded
//! in the ledger as it is read, so a move file reconstructs board state the
//! same way live play produced it. On a malformed line the load aborts but
//! moves already applied stay applied.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use super::board::Board;
use super::cell::CellState;
use super::error::Error;
use super::moves::{Move, MoveLedger};

pub fn save_moves<W: Write>(ledger: &MoveLedger, out: &mut W) -> Result<(), Error> {
    for mv in ledger.iter() {
        writeln!(out, "{},{},{}", mv.row, mv.col, mv.state.code())?;
    }
    Ok(())
}

pub fn save_moves_file<P: AsRef<Path>>(ledger: &MoveLedger, path: P) -> Result<(), Error> {
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    save_moves(ledger, &mut writer)?;
    writer.flush()?;
    debug!(target: "codec", "saved {} moves to {}", ledger.len(), path.as_ref().display());
    Ok(())
}

/// Replays a move file onto the board, recording each move in the ledger in
/// file order. Returns the number of moves applied.
pub fn load_moves<R: BufRead>(input: R, board: &mut Board, ledger: &mut MoveLedger)
    -> Result<usize, Error>
{
    let mut applied: usize = 0;
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let mv = parse_move_line(&line, idx + 1)?;
        board.apply_move(mv)?;
        ledger.record(mv);
        applied += 1;
    }
    Ok(applied)
}

pub fn load_moves_file<P: AsRef<Path>>(path: P, board: &mut Board, ledger: &mut MoveLedger)
    -> Result<usize, Error>
{
    let file = File::open(&path)?;
    let applied = load_moves(BufReader::new(file), board, ledger)?;
    debug!(target: "codec", "replayed {} moves from {}", applied, path.as_ref().display());
    Ok(applied)
}

fn parse_move_line(line: &str, lineno: usize) -> Result<Move, Error> {
    let tokens = line.trim().split(',').collect::<Vec<_>>();
    if tokens.len() != 3 {
        return Err(Error::MoveFileFormat {
            line: lineno,
            reason: format!("expected 3 comma-separated values, found {}", tokens.len()),
        });
    }
    let numbers = tokens.iter()
                        .map(|token| token.trim().parse::<usize>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| Error::MoveFileFormat {
                            line: lineno,
                            reason: format!("non-integer token in '{}'", line.trim()),
                        })?;
    let state = match numbers[2] {
        code if code <= 2 => CellState::from_code(code as u8),
        _ => None,
    };
    let state = state.ok_or_else(|| Error::MoveFileFormat {
        line: lineno,
        reason: format!("invalid state code {}", numbers[2]),
    })?;
    Ok(Move::new(numbers[0], numbers[1], state))
}
