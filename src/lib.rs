#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod controller;
mod game;
#[cfg(feature = "std")]
mod logging;
mod opponent;
pub mod persist;
pub mod prelude;
#[cfg(feature = "std")]
pub mod ui;
pub mod win;

pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use controller::{key_to_command, Controller};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use opponent::*;
pub use persist::{PersistError, SavedGame};
pub use win::compute_winner;
