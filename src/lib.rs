// vim: set ai et ts=4 sts=4 sw=4:
pub mod util;
pub mod error;
pub mod cell;
pub mod clue;
pub mod notify;
pub mod board;
pub mod moves;
pub mod codec;
pub mod loader;
pub mod session;

pub use self::error::Error;
