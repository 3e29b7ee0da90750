// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;

/// The three values a board position can take during play. `Unknown` and
/// `Empty` are equivalent for clue matching (neither counts toward a run);
/// they differ only in what the player has asserted about the cell.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum CellState {
    Unknown,
    Filled,
    Empty,
}

impl CellState {
    /// The forward toggle cycle: Unknown -> Filled -> Empty -> Unknown.
    pub fn next(self) -> CellState {
        match self {
            CellState::Unknown => CellState::Filled,
            CellState::Filled  => CellState::Empty,
            CellState::Empty   => CellState::Unknown,
        }
    }

    /// The state that toggles forward into `self`. Because the cycle is a
    /// fixed total order, the predecessor is fully determined by the state
    /// itself; undo relies on this.
    pub fn prev(self) -> CellState {
        match self {
            CellState::Unknown => CellState::Empty,
            CellState::Filled  => CellState::Unknown,
            CellState::Empty   => CellState::Filled,
        }
    }

    /// Fixed integer encoding used by the move-file format.
    pub fn code(self) -> u8 {
        match self {
            CellState::Unknown => 0,
            CellState::Filled  => 1,
            CellState::Empty   => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<CellState> {
        match code {
            0 => Some(CellState::Unknown),
            1 => Some(CellState::Filled),
            2 => Some(CellState::Empty),
            _ => None,
        }
    }

    pub fn fmt_visual(&self) -> &str {
        match self {
            CellState::Empty   => "x",
            CellState::Filled  => "\u{25A0}", // filled in black square
            CellState::Unknown => ".",
        }
    }
}
impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}

/// A single board position. The coordinate is fixed for the cell's
/// lifetime; the state is owned by the board and only mutated through it.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    state: CellState,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            row: row,
            col: col,
            state: CellState::Unknown,
        }
    }

    pub fn get_row(&self) -> usize { self.row }
    pub fn get_col(&self) -> usize { self.col }
    pub fn get_state(&self) -> CellState { self.state }

    pub(crate) fn set_state(&mut self, new_state: CellState) {
        self.state = new_state;
    }

    pub fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.col, self.row)
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.fmt_location(), self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycle_closes_after_three_steps() {
        for &s in &[CellState::Unknown, CellState::Filled, CellState::Empty] {
            assert_eq!(s.next().next().next(), s);
        }
    }

    #[test]
    fn prev_inverts_next() {
        for &s in &[CellState::Unknown, CellState::Filled, CellState::Empty] {
            assert_eq!(s.next().prev(), s);
            assert_eq!(s.prev().next(), s);
        }
    }

    #[test]
    fn state_codes_are_stable() {
        assert_eq!(CellState::Unknown.code(), 0);
        assert_eq!(CellState::Filled.code(), 1);
        assert_eq!(CellState::Empty.code(), 2);
        for code in 0..=2 {
            assert_eq!(CellState::from_code(code).unwrap().code(), code);
        }
        assert_eq!(CellState::from_code(3), None);
    }

    #[test]
    fn new_cell_starts_unknown() {
        let cell = Cell::new(2, 7);
        assert_eq!(cell.get_row(), 2);
        assert_eq!(cell.get_col(), 7);
        assert_eq!(cell.get_state(), CellState::Unknown);
    }
}
