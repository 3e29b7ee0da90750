// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use ansi_term::ANSIString;
use log::debug;

use super::cell::{Cell, CellState};
use super::clue::Clue;
use super::error::Error;
use super::moves::Move;
use super::notify::{BoardEvent, ChangeNotifier, SubscriptionId};
use super::util::{ralign, ralign_colored, maybe_color, Direction, Direction::*};

/// The grid of cells plus the row/column clues. The board owns all cell
/// state; mutation happens only through `apply_move` and `clear`, each of
/// which notifies subscribers synchronously before returning.
pub struct Board {
    grid: Vec<Vec<Cell>>,
    row_clues: Vec<Clue>,
    col_clues: Vec<Clue>,
    notifier: ChangeNotifier,
}

impl Board {
    /// Builds an all-Unknown grid sized by the clue lists. The loader
    /// guarantees both lists are non-empty.
    pub fn new(row_clues: Vec<Clue>, col_clues: Vec<Clue>) -> Board {
        assert!(!row_clues.is_empty() && !col_clues.is_empty());
        let rows = row_clues.len();
        let cols = col_clues.len();
        Board {
            grid: (0..rows).map(|r| (0..cols).map(|c| Cell::new(r, c))
                                             .collect::<Vec<_>>())
                           .collect(),
            row_clues: row_clues,
            col_clues: col_clues,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn rows(&self) -> usize { self.grid.len() }
    pub fn cols(&self) -> usize { self.grid[0].len() }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row).and_then(|line| line.get(col))
    }
    pub fn row_clue(&self, row: usize) -> &Clue { &self.row_clues[row] }
    pub fn col_clue(&self, col: usize) -> &Clue { &self.col_clues[col] }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&BoardEvent) + 'static,
    {
        self.notifier.subscribe(callback)
    }
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// The only cell mutator. Any state is assignable at any time; clue
    /// conformance is advisory feedback, never a move gate. Subscribers see
    /// the updated cell before this returns.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), Error> {
        if mv.row >= self.rows() || mv.col >= self.cols() {
            return Err(Error::OutOfRange {
                row: mv.row,
                col: mv.col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.grid[mv.row][mv.col].set_state(mv.state);
        let cell = self.grid[mv.row][mv.col];
        debug!(target: "board", "applied {}", mv);
        self.notifier.emit(&BoardEvent::CellChanged(cell));
        Ok(())
    }

    /// Resets every cell to Unknown, leaving the clues untouched. One bulk
    /// notification; observers re-derive full state from it.
    pub fn clear(&mut self) {
        for line in self.grid.iter_mut() {
            for cell in line.iter_mut() {
                cell.set_state(CellState::Unknown);
            }
        }
        debug!(target: "board", "board cleared");
        self.notifier.emit(&BoardEvent::Cleared);
    }

    pub fn line_states(&self, direction: Direction, index: usize) -> Vec<CellState> {
        match direction {
            Horizontal => self.grid[index].iter().map(|cell| cell.get_state()).collect(),
            Vertical   => self.grid.iter().map(|line| line[index].get_state()).collect(),
        }
    }
    pub fn row_states(&self, row: usize) -> Vec<CellState> {
        self.line_states(Horizontal, row)
    }
    pub fn col_states(&self, col: usize) -> Vec<CellState> {
        self.line_states(Vertical, col)
    }

    /// Whether the player has started on a line: any Filled cell counts.
    pub fn line_attempted(&self, direction: Direction, index: usize) -> bool {
        self.line_states(direction, index)
            .iter()
            .any(|&state| state == CellState::Filled)
    }

    pub fn is_row_solved(&self, row: usize) -> bool {
        self.row_clues[row].is_satisfied_by(&self.row_states(row))
    }
    pub fn is_col_solved(&self, col: usize) -> bool {
        self.col_clues[col].is_satisfied_by(&self.col_states(col))
    }

    /// Correct runs in every row and every column over-determine the grid,
    /// so this is equivalent to "the unique intended solution" for any
    /// well-formed puzzle.
    pub fn is_solved(&self) -> bool {
        (0..self.rows()).all(|r| self.is_row_solved(r))
            && (0..self.cols()).all(|c| self.is_col_solved(c))
    }
}

impl Board {
    /// Renders the grid with right-aligned row clues and stacked column
    /// clue headers. When color is enabled, satisfied clues turn green and
    /// clues whose line holds Filled cells that do not match turn orange.
    pub fn render(&self, emit_color: bool) -> String {
        let prefixes: Vec<ANSIString> =
            (0..self.rows()).map(|r| self.row_clues[r].to_colored_string(
                                self.is_row_solved(r), self.line_attempted(Horizontal, r)))
                            .collect();
        let prefix_len = prefixes.iter()
                                 .map(|p| p.len()) // .len() returns length WITHOUT ansi escape sequences
                                 .max().unwrap_or(0);

        let mut result = String::new();

        // column clue header, bottom-aligned above each column
        let header_height = self.col_clues.iter().map(|clue| clue.len()).max().unwrap_or(0);
        for line in 0..header_height {
            result.push_str(&ralign("", prefix_len));
            result.push_str("  ");
            for c in 0..self.cols() {
                let clue = &self.col_clues[c];
                let slot = clue.len() + line;
                if slot >= header_height {
                    let style = clue.line_style(self.is_col_solved(c),
                                                self.line_attempted(Vertical, c));
                    let colored = style.paint(format!("{:>2}", clue.runs()[slot - header_height]));
                    result.push_str(&maybe_color(&colored, emit_color));
                    result.push(' ');
                } else {
                    result.push_str("   ");
                }
            }
            result.push('\n');
        }

        let horizontal = "\u{2550}".repeat(self.cols() * 3);
        result.push_str(&format!("{} \u{2554}{}\u{2557}\n", ralign("", prefix_len), horizontal));
        for r in 0..self.rows() {
            result.push_str(&ralign_colored(&prefixes[r], prefix_len, emit_color));
            result.push_str(" \u{2551}");
            for c in 0..self.cols() {
                result.push_str(&format!(" {} ", self.grid[r][c].get_state()));
            }
            result.push_str("\u{2551}\n");
        }
        result.push_str(&format!("{} \u{255A}{}\u{255D}\n", ralign("", prefix_len), horizontal));

        result
    }
}
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board(rows={}, cols={})", self.rows(), self.cols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    // 5x5 board, row 0 expects a full run of five
    fn board_5x5() -> Board {
        let row_clues = vec![
            Clue::new(vec![5]),
            Clue::empty(),
            Clue::empty(),
            Clue::empty(),
            Clue::empty(),
        ];
        let col_clues = (0..5).map(|_| Clue::new(vec![1])).collect();
        Board::new(row_clues, col_clues)
    }

    #[test]
    fn new_board_is_all_unknown() {
        let board = board_5x5();
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 5);
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(board.cell(r, c).unwrap().get_state(), CellState::Unknown);
            }
        }
    }

    #[test]
    fn out_of_range_move_is_rejected() {
        let mut board = board_5x5();
        let result = board.apply_move(Move::new(5, 0, CellState::Filled));
        match result {
            Err(Error::OutOfRange { row: 5, col: 0, rows: 5, cols: 5 }) => {}
            other => panic!("expected OutOfRange, got {:?}", other.map(|_| ())),
        }
        let result = board.apply_move(Move::new(0, 7, CellState::Filled));
        assert!(result.is_err());
    }

    #[test]
    fn full_row_satisfies_its_clue_and_a_split_breaks_it() {
        let mut board = board_5x5();
        for c in 0..5 {
            board.apply_move(Move::new(0, c, CellState::Filled)).unwrap();
        }
        assert!(board.is_row_solved(0));

        // splitting the run into [2, 2] no longer matches [5]
        board.apply_move(Move::new(0, 2, CellState::Empty)).unwrap();
        assert!(!board.is_row_solved(0));
    }

    #[test]
    fn empty_clue_row_is_solved_until_something_is_filled() {
        let mut board = board_5x5();
        assert!(board.is_row_solved(1));
        board.apply_move(Move::new(1, 3, CellState::Filled)).unwrap();
        assert!(!board.is_row_solved(1));
    }

    #[test]
    fn is_solved_requires_every_row_and_column() {
        // 1x1 board with clue [1] on both lines
        let mut board = Board::new(vec![Clue::new(vec![1])], vec![Clue::new(vec![1])]);
        assert!(!board.is_solved());
        board.apply_move(Move::new(0, 0, CellState::Filled)).unwrap();
        assert!(board.is_solved());
    }

    #[test]
    fn apply_move_notifies_with_the_updated_cell() {
        let mut board = board_5x5();
        let seen = Rc::new(StdCell::new(None));
        let seen_clone = seen.clone();
        board.subscribe(move |event: &BoardEvent| {
            if let BoardEvent::CellChanged(cell) = event {
                seen_clone.set(Some(*cell));
            }
        });

        board.apply_move(Move::new(2, 3, CellState::Filled)).unwrap();
        let cell = seen.get().expect("subscriber not called");
        assert_eq!(cell.get_row(), 2);
        assert_eq!(cell.get_col(), 3);
        assert_eq!(cell.get_state(), CellState::Filled);
    }

    #[test]
    fn clear_resets_everything_and_is_idempotent() {
        let mut board = board_5x5();
        board.apply_move(Move::new(0, 0, CellState::Filled)).unwrap();
        board.apply_move(Move::new(4, 4, CellState::Empty)).unwrap();

        let cleared = Rc::new(StdCell::new(0));
        let cleared_clone = cleared.clone();
        board.subscribe(move |event: &BoardEvent| {
            if *event == BoardEvent::Cleared {
                cleared_clone.set(cleared_clone.get() + 1);
            }
        });

        board.clear();
        board.clear();
        assert_eq!(cleared.get(), 2);
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(board.cell(r, c).unwrap().get_state(), CellState::Unknown);
            }
        }
    }

    #[test]
    fn column_states_run_top_to_bottom() {
        let mut board = board_5x5();
        board.apply_move(Move::new(0, 1, CellState::Filled)).unwrap();
        board.apply_move(Move::new(3, 1, CellState::Filled)).unwrap();
        let states = board.col_states(1);
        assert_eq!(states[0], CellState::Filled);
        assert_eq!(states[3], CellState::Filled);
        assert_eq!(states[1], CellState::Unknown);
    }

    #[test]
    fn render_gives_two_sided_line_feedback() {
        const GREEN: &str = "\u{1b}[32m";
        const ORANGE: &str = "\u{1b}[38;5;208m";

        let mut board = board_5x5();
        // untouched board: neither color anywhere
        let rendered = board.render(true);
        assert!(!rendered.contains(ORANGE));

        // a partial fill of row 0 marks its clue orange, not green
        board.apply_move(Move::new(0, 0, CellState::Filled)).unwrap();
        board.apply_move(Move::new(0, 1, CellState::Filled)).unwrap();
        assert!(!board.is_row_solved(0));
        let rendered = board.render(true);
        assert!(rendered.contains(ORANGE));

        // completing the row turns its clue green
        for c in 2..5 {
            board.apply_move(Move::new(0, c, CellState::Filled)).unwrap();
        }
        assert!(board.is_row_solved(0));
        assert!(board.render(true).contains(GREEN));

        // with color disabled no escape sequences leak through
        assert!(!board.render(false).contains('\u{1b}'));
    }

    #[test]
    fn render_marks_every_line_of_the_grid() {
        let board = board_5x5();
        let rendered = board.render(false);
        // header (one line of column clues) + top border + 5 rows + bottom border
        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.contains("\u{2554}"));
        assert!(rendered.contains("5"));
    }
}
