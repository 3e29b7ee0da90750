// vim: set ai et ts=4 sts=4 sw=4:
//! Parses a puzzle definition into row/column clues and constructs an
//! all-Unknown board. The definition is a YAML document with two required
//! list-valued keys, `rows:` and `cols:`; each list entry is one line's
//! clue, written as a whitespace-separated run-length string ("1 4"), a
//! bare integer, or null for the empty clue. Column clues are listed top
//! to bottom. Optional `height:`/`width:` keys cross-check the list
//! lengths when present.
use std::fs;
use std::path::Path;

use log::debug;
use yaml_rust::{Yaml, YamlLoader};

use super::board::Board;
use super::clue::Clue;
use super::error::Error;

pub fn load_puzzle_str(text: &str) -> Result<Board, Error> {
    let docs = YamlLoader::load_from_str(text)
        .map_err(|e| Error::PuzzleFormat(format!("invalid yaml: {}", e)))?;
    let doc = docs.get(0)
        .ok_or_else(|| Error::PuzzleFormat("empty puzzle document".to_string()))?;

    let row_clues = parse_clue_list(&doc["rows"], "rows")?;
    let col_clues = parse_clue_list(&doc["cols"], "cols")?;
    check_declared_count(&doc["height"], row_clues.len(), "height")?;
    check_declared_count(&doc["width"], col_clues.len(), "width")?;

    // feasibility is deliberately not validated; an oversized clue just
    // makes the puzzle unsolvable
    for (r, clue) in row_clues.iter().enumerate() {
        if clue.min_span() > col_clues.len() {
            debug!(target: "loader", "row {} clue '{}' cannot fit in {} cells", r, clue, col_clues.len());
        }
    }
    for (c, clue) in col_clues.iter().enumerate() {
        if clue.min_span() > row_clues.len() {
            debug!(target: "loader", "col {} clue '{}' cannot fit in {} cells", c, clue, row_clues.len());
        }
    }

    Ok(Board::new(row_clues, col_clues))
}

pub fn load_puzzle_file<P: AsRef<Path>>(path: P) -> Result<Board, Error> {
    let text = fs::read_to_string(&path)
        .map_err(|e| Error::PuzzleNotFound(format!("{}: {}", path.as_ref().display(), e)))?;
    load_puzzle_str(&text)
}

fn parse_clue_list(node: &Yaml, key: &str) -> Result<Vec<Clue>, Error> {
    let list = node.as_vec()
        .ok_or_else(|| Error::PuzzleFormat(format!("missing or non-list '{}' entry", key)))?;
    if list.is_empty() {
        return Err(Error::PuzzleFormat(format!("'{}' must list at least one clue", key)));
    }
    list.iter()
        .enumerate()
        .map(|(i, entry)| {
            parse_clue(entry)
                .map_err(|msg| Error::PuzzleFormat(format!("{} clue {}: {}", key, i, msg)))
        })
        .collect()
}

fn parse_clue(node: &Yaml) -> Result<Clue, String> {
    match node {
        Yaml::String(s) => {
            let runs = s.split_whitespace()
                        .map(parse_run_length)
                        .collect::<Result<Vec<_>, _>>()?;
            Ok(Clue::new(runs))
        }
        Yaml::Integer(n) if *n > 0 => Ok(Clue::new(vec![*n as usize])),
        Yaml::Integer(n) => Err(format!("non-positive run length {}", n)),
        Yaml::Null => Ok(Clue::empty()),
        other => Err(format!("unexpected clue value: {:?}", other)),
    }
}

fn parse_run_length(token: &str) -> Result<usize, String> {
    let value = token.parse::<i64>()
        .map_err(|_| format!("non-numeric run length '{}'", token))?;
    if value <= 0 {
        return Err(format!("non-positive run length {}", value));
    }
    Ok(value as usize)
}

fn check_declared_count(node: &Yaml, actual: usize, key: &str) -> Result<(), Error> {
    match node {
        Yaml::BadValue => Ok(()), // key absent; the clue lists alone fix the dimensions
        Yaml::Integer(n) if *n >= 0 && *n as usize == actual => Ok(()),
        Yaml::Integer(n) => Err(Error::PuzzleFormat(
            format!("declared {} {} does not match {} clue lines", key, n, actual))),
        _ => Err(Error::PuzzleFormat(format!("non-numeric '{}' entry", key))),
    }
}
