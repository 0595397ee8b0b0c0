#![cfg(feature = "std")]

//! Terminal driver: turns key presses into engine commands and draws the
//! engine's snapshots with crossterm.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};

use crate::{
    common::Direction,
    game::{Command, GameEngine, GameError, GameState, Response},
    opponent::Opponent,
    persist,
    ui,
};

/// Map a key press to the command it means in `state`.
pub fn key_to_command(key: KeyEvent, state: GameState) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match (state, key.code) {
        (_, KeyCode::Char('q')) => Some(Command::Quit),
        (GameState::UserTurn, KeyCode::Up) => Some(Command::MoveCursor(Direction::Up)),
        (GameState::UserTurn, KeyCode::Down) => Some(Command::MoveCursor(Direction::Down)),
        (GameState::UserTurn, KeyCode::Left) => Some(Command::MoveCursor(Direction::Left)),
        (GameState::UserTurn, KeyCode::Right) => Some(Command::MoveCursor(Direction::Right)),
        (GameState::UserTurn, KeyCode::Char(' ')) => Some(Command::PlaceMark),
        (GameState::UserTurn, KeyCode::Char('s')) => Some(Command::Save),
        (GameState::Continue, KeyCode::Char('p')) => Some(Command::Restart),
        _ => None,
    }
}

/// Raw mode and the alternate screen, undone on drop even when setup or
/// the session fails part way.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard { out };
        execute!(guard.out, EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Owns the engine for one terminal session.
pub struct Controller<O: Opponent> {
    engine: GameEngine<O>,
    save_path: PathBuf,
    message: Option<String>,
}

impl<O: Opponent> Controller<O> {
    pub fn new(engine: GameEngine<O>, save_path: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            save_path: save_path.into(),
            message: None,
        }
    }

    pub fn engine(&self) -> &GameEngine<O> {
        &self.engine
    }

    /// Error text shown under the instructions, if the last move was rejected.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn handle_command(&mut self, command: Command) -> anyhow::Result<bool> {
        self.message = None;
        match self.engine.apply(command) {
            Ok(Response::Ok) => Ok(true),
            Ok(Response::Quit) => Ok(false),
            Ok(Response::Saved(saved)) => {
                let bytes = persist::encode(&saved)?;
                std::fs::write(&self.save_path, bytes).with_context(|| {
                    format!("failed to write save file {}", self.save_path.display())
                })?;
                info!("game saved to {}", self.save_path.display());
                Ok(false)
            }
            Err(GameError::IllegalMove(err)) => {
                self.message = Some(err.to_string());
                Ok(true)
            }
            Err(err) => {
                debug!("ignored command: {}", err);
                Ok(true)
            }
        }
    }

    /// Run the interactive loop until the player quits or saves.
    pub fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = TerminalGuard::enter(io::stdout())?;
        self.event_loop(&mut terminal.out)
    }

    fn event_loop(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let needed = ui::required_height(self.engine.board().height());
        loop {
            self.engine.settle();
            let (_, rows) = terminal::size()?;
            if (rows as usize) < needed {
                anyhow::bail!("Please make your terminal screen larger.");
            }
            self.draw(out)?;

            if self.engine.state().is_outcome() {
                self.engine.step();
                continue;
            }

            let key = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => key,
                _ => continue,
            };
            let Some(command) = key_to_command(key, self.engine.state()) else {
                continue;
            };
            if !self.handle_command(command)? {
                return Ok(());
            }
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let snapshot = self.engine.snapshot();
        queue!(out, Clear(ClearType::All))?;
        for (row, line) in ui::frame_lines(&snapshot, self.message()).iter().enumerate() {
            queue!(out, MoveTo(0, row as u16), Print(line))?;
        }
        if snapshot.state == GameState::UserTurn {
            let (r, c) = snapshot.board.cursor;
            let symbol = snapshot.board.get((r, c)).symbol();
            queue!(
                out,
                MoveTo(c as u16, (ui::board_top() + r) as u16),
                SetAttribute(Attribute::Reverse),
                Print(symbol),
                SetAttribute(Attribute::Reset)
            )?;
        }
        out.flush()
    }
}
