// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use ansi_term::{Colour, Style, ANSIString};

use super::cell::CellState;

/// The maximal contiguous Filled-run decomposition of a line. Unknown and
/// Empty cells break runs identically; only Filled cells count.
pub fn line_runs(states: &[CellState]) -> Vec<usize> {
    let mut runs = Vec::<usize>::new();
    let mut current: usize = 0;
    for &state in states {
        if state == CellState::Filled {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current); // a run against the line boundary is still a run
    }
    runs
}

/// An immutable ordered sequence of run lengths for one line. An empty
/// sequence means the line must contain no Filled cells at all.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Clue {
    runs: Vec<usize>,
}

impl Clue {
    /// Run lengths must already be validated as positive; the loader rejects
    /// zero or negative tokens before this is ever called.
    pub fn new(runs: Vec<usize>) -> Clue {
        debug_assert!(runs.iter().all(|&len| len > 0));
        Clue { runs: runs }
    }
    pub fn empty() -> Clue {
        Clue { runs: Vec::new() }
    }

    pub fn runs(&self) -> &[usize] { &self.runs }
    pub fn len(&self) -> usize { self.runs.len() }
    pub fn is_empty(&self) -> bool { self.runs.is_empty() }

    /// Minimum number of cells the clue needs: the runs plus a one-cell gap
    /// between each pair. Advisory only; an infeasible clue is never
    /// rejected, the puzzle it belongs to is simply unsolvable.
    pub fn min_span(&self) -> usize {
        match self.runs.len() {
            0 => 0,
            n => self.runs.iter().sum::<usize>() + (n - 1),
        }
    }

    /// A line satisfies its clue iff its actual Filled-run sequence equals
    /// the clue sequence exactly, in length and at every index. A partially
    /// correct prefix is not partially solved; it is unsolved.
    pub fn is_satisfied_by(&self, states: &[CellState]) -> bool {
        line_runs(states) == self.runs
    }

    /// Green once satisfied, orange while the line has Filled cells that do
    /// not (yet) match, unstyled while the line is untouched.
    pub fn to_colored_string(&self, satisfied: bool, attempted: bool) -> ANSIString {
        self.line_style(satisfied, attempted).paint(self.to_string())
    }

    pub fn line_style(&self, satisfied: bool, attempted: bool) -> Style {
        if satisfied {
            Style::new().fg(Colour::Green)
        } else if attempted {
            Style::new().fg(Colour::Fixed(208)) // orange
        } else {
            Style::default()
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.runs.is_empty() {
            return write!(f, "0");
        }
        let parts = self.runs.iter()
                             .map(|len| len.to_string())
                             .collect::<Vec<_>>();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::CellState::{Unknown, Filled, Empty};

    #[test]
    fn runs_of_blank_line_are_empty() {
        assert_eq!(line_runs(&[Unknown, Unknown, Empty]), Vec::<usize>::new());
        assert_eq!(line_runs(&[]), Vec::<usize>::new());
    }

    #[test]
    fn unknown_and_empty_both_break_runs() {
        assert_eq!(line_runs(&[Filled, Unknown, Filled]), vec![1, 1]);
        assert_eq!(line_runs(&[Filled, Empty, Filled]), vec![1, 1]);
    }

    #[test]
    fn runs_touching_the_boundary_count() {
        assert_eq!(line_runs(&[Filled, Filled, Unknown, Filled]), vec![2, 1]);
        assert_eq!(line_runs(&[Filled; 5]), vec![5]);
    }

    #[test]
    fn empty_clue_matches_only_a_line_with_no_filled_cells() {
        let clue = Clue::empty();
        assert!(clue.is_satisfied_by(&[Unknown, Empty, Unknown]));
        assert!(!clue.is_satisfied_by(&[Unknown, Filled, Unknown]));
    }

    #[test]
    fn exact_match_required() {
        let clue = Clue::new(vec![2, 1]);
        assert!(clue.is_satisfied_by(&[Filled, Filled, Empty, Filled]));
        // correct prefix but missing second run: unsolved
        assert!(!clue.is_satisfied_by(&[Filled, Filled, Empty, Unknown]));
        // runs in the wrong order
        assert!(!clue.is_satisfied_by(&[Filled, Empty, Filled, Filled]));
        // an extra run disqualifies even when the clue's runs are present
        assert!(!clue.is_satisfied_by(&[Filled, Filled, Empty, Filled, Empty, Filled]));
    }

    #[test]
    fn min_span_counts_gaps() {
        assert_eq!(Clue::empty().min_span(), 0);
        assert_eq!(Clue::new(vec![5]).min_span(), 5);
        assert_eq!(Clue::new(vec![2, 1, 3]).min_span(), 8);
    }

    #[test]
    fn display_joins_runs_with_spaces() {
        assert_eq!(Clue::new(vec![1, 4]).to_string(), "1 4");
        assert_eq!(Clue::empty().to_string(), "0");
    }
}
