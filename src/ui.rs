#![cfg(feature = "std")]

//! Text layout for the terminal display. Pure functions; drawing happens in
//! the controller.

use crate::{
    board::BoardSnapshot,
    config::{INSTRUCTIONS_HEIGHT, WELCOME_HEIGHT},
    game::{GameState, RenderSnapshot},
};

pub const WELCOME_LINES: [&str; WELCOME_HEIGHT] = [
    "###########################################",
    "#          WELCOME TO TIC-TAC-TOE         #",
    "###########################################",
    "",
];

pub const INSTRUCTIONS_LINES: [&str; INSTRUCTIONS_HEIGHT] = [
    "Use arrow keys to move the cursor.",
    "Press space to put `X` on the playing area.",
    "Press s to save and quit.",
    "Press q to quit.",
    "",
];

pub const CONTINUE_LINES: [&str; 2] = ["Press p to start new game.", "Press q to quit."];

/// Terminal rows needed to show a board `board_height` cells tall.
pub fn required_height(board_height: usize) -> usize {
    WELCOME_HEIGHT + board_height + 1 + INSTRUCTIONS_HEIGHT + 1
}

/// One text row per board row.
pub fn board_lines(board: &BoardSnapshot) -> Vec<String> {
    board
        .rows()
        .map(|row| row.iter().map(|c| c.symbol()).collect())
        .collect()
}

/// Screen row where the board starts.
pub fn board_top() -> usize {
    WELCOME_HEIGHT
}

/// Full frame: banner, board, a blank row, then the status and key help
/// for the current state. `message` is an error shown below the help.
pub fn frame_lines(snapshot: &RenderSnapshot, message: Option<&str>) -> Vec<String> {
    let mut lines: Vec<String> = WELCOME_LINES.iter().map(|s| s.to_string()).collect();
    lines.extend(board_lines(&snapshot.board));
    lines.push(String::new());
    match snapshot.state {
        GameState::UserTurn => {
            lines.extend(INSTRUCTIONS_LINES.iter().map(|s| s.to_string()));
        }
        GameState::XWin | GameState::OWin | GameState::Draw | GameState::Continue => {
            lines.push(snapshot.status_message().to_string());
            lines.extend(CONTINUE_LINES.iter().map(|s| s.to_string()));
        }
        GameState::AiTurn | GameState::WinnerChecking => {
            lines.push(snapshot.status_message().to_string());
        }
    }
    if let Some(msg) = message {
        lines.push(msg.to_string());
    }
    lines
}
