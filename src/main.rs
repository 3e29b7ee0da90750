// vim: set ai et ts=4 sts=4 sw=4:
use std::convert::TryFrom;
use std::io;
use std::io::BufRead;
use std::process;

use ansi_term::Colour;
use clap::{App, Arg};
use log::{debug, warn};

use picross_play::cell::CellState;
use picross_play::error::Error;
use picross_play::loader;
use picross_play::notify::BoardEvent;
use picross_play::session::{Difficulty, Session};
use picross_play::util::{is_a_tty, maybe_color};

fn init_logging(verbose: bool) {
    let level = match verbose {
        true  => log::LevelFilter::Debug,
        false => log::LevelFilter::Warn,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.target(), record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .expect("logger initialization failed");
}

fn main() {
    let matches = App::new("picross-play")
        .about("grid-deduction puzzle board: play, validate, save and replay moves")
        .arg(Arg::with_name("puzzle")
            .help("puzzle definition file (YAML with 'rows:' and 'cols:' clue lists)")
            .index(1))
        .arg(Arg::with_name("difficulty")
            .short("d")
            .long("difficulty")
            .takes_value(true)
            .possible_values(&["easy", "medium", "hard"])
            .conflicts_with("puzzle")
            .help("play one of the bundled puzzles instead of a file"))
        .arg(Arg::with_name("moves")
            .short("m")
            .long("moves")
            .takes_value(true)
            .help("move file to replay onto the board before play starts"))
        .arg(Arg::with_name("no-color")
            .long("no-color")
            .help("never emit ANSI color codes"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("log engine activity to stderr"))
        .get_matches();

    init_logging(matches.is_present("verbose"));

    let session = match matches.value_of("puzzle") {
        Some(path) => loader::load_puzzle_file(path).map(Session::new),
        None => {
            let difficulty = matches.value_of("difficulty")
                .and_then(|name| Difficulty::try_from(name).ok()) // possible_values guards this
                .unwrap_or(Difficulty::Easy);
            Session::from_difficulty(difficulty)
        }
    };
    let mut session = match session {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let emit_color = !matches.is_present("no-color") && is_a_tty(io::stdout());

    session.subscribe(|event: &BoardEvent| {
        if let BoardEvent::CellChanged(cell) = event {
            debug!(target: "main", "cell updated: {}", cell);
        }
    });

    if let Some(path) = matches.value_of("moves") {
        match session.load_moves(path) {
            Ok(count) => println!("replayed {} moves from {}", count, path),
            Err(err) => {
                // moves applied before a bad line stay applied
                warn!(target: "main", "move replay stopped: {}", err);
                eprintln!("{}", err);
            }
        }
    }

    redraw(&session, emit_color);
    print_help();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        match run_command(&mut session, &line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Redraw) => redraw(&session, emit_color),
            Ok(Outcome::Nothing) => {}
            Err(err) => eprintln!("{}", err),
        }
    }
}

enum Outcome {
    Redraw,
    Nothing,
    Quit,
}

fn run_command(session: &mut Session, line: &str) -> Result<Outcome, Error> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        [] => Ok(Outcome::Nothing),
        ["quit"] | ["q"] => Ok(Outcome::Quit),
        ["help"] => {
            print_help();
            Ok(Outcome::Nothing)
        }
        ["undo"] => {
            match session.undo()? {
                Some(mv) => println!("undone; cell is back to {}", mv),
                None => println!("there are no more moves you can undo"),
            }
            Ok(Outcome::Redraw)
        }
        ["clear"] => {
            session.clear_board();
            Ok(Outcome::Redraw)
        }
        ["save", path] => {
            session.save_moves(path)?;
            println!("moves saved to {}", path);
            Ok(Outcome::Nothing)
        }
        ["load", path] => {
            let count = session.load_moves(path)?;
            println!("replayed {} moves from {}", count, path);
            Ok(Outcome::Redraw)
        }
        ["puzzle", path] => {
            session.load_puzzle(path)?;
            println!("switched puzzle to {}", path);
            Ok(Outcome::Redraw)
        }
        [row, col] => match parse_coordinate(row, col) {
            Some((row, col)) => {
                session.toggle(row, col)?;
                Ok(Outcome::Redraw)
            }
            None => {
                print_help();
                Ok(Outcome::Nothing)
            }
        },
        [row, col, state] => {
            let coordinate = parse_coordinate(row, col);
            let state = state.parse::<u8>().ok().and_then(CellState::from_code);
            match (coordinate, state) {
                (Some((row, col)), Some(state)) => {
                    session.new_move(row, col, state)?;
                    Ok(Outcome::Redraw)
                }
                (Some(_), None) => {
                    println!("state must be 0 (unknown), 1 (filled) or 2 (empty)");
                    Ok(Outcome::Nothing)
                }
                _ => {
                    print_help();
                    Ok(Outcome::Nothing)
                }
            }
        }
        _ => {
            print_help();
            Ok(Outcome::Nothing)
        }
    }
}

fn parse_coordinate(row: &str, col: &str) -> Option<(usize, usize)> {
    match (row.parse::<usize>(), col.parse::<usize>()) {
        (Ok(row), Ok(col)) => Some((row, col)),
        _ => None,
    }
}

fn redraw(session: &Session, emit_color: bool) {
    print!("{}", session.board().render(emit_color));
    if session.is_solved() {
        let banner = Colour::Green.bold().paint("you have won the game!");
        println!("{}", maybe_color(&banner, emit_color));
    }
}

fn print_help() {
    println!("commands:");
    println!("  <row> <col>          toggle a cell (unknown -> filled -> empty)");
    println!("  <row> <col> <state>  set a cell directly (0/1/2)");
    println!("  undo                 take back the last move");
    println!("  clear                reset the board and the move log");
    println!("  save <file>          write the move log to a file");
    println!("  load <file>          replay a move file onto the board");
    println!("  puzzle <file>        switch to another puzzle definition");
    println!("  quit");
}
