use crate::{
    board::{Board, BoardSnapshot},
    common::{BoardError, CellState, Direction, Pos},
    opponent::{Opponent, RandomOpponent},
    persist::SavedGame,
    win::compute_winner,
};
use log::{debug, info, warn};

/// Phase of the turn-based state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Waiting for the human player.
    UserTurn,
    /// The opponent moves next; needs no input.
    AiTurn,
    /// A mark was just placed; the board is checked for a result.
    WinnerChecking,
    XWin,
    OWin,
    Draw,
    /// Round over; waiting for restart or quit.
    Continue,
}

impl GameState {
    /// States that advance on their own without a command.
    pub fn is_automatic(self) -> bool {
        matches!(self, GameState::AiTurn | GameState::WinnerChecking)
    }

    /// States announcing the result of a round.
    pub fn is_outcome(self) -> bool {
        matches!(self, GameState::XWin | GameState::OWin | GameState::Draw)
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    XWins,
    OWins,
    Draw,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::XWins => "X wins!",
            Outcome::OWins => "O wins!",
            Outcome::Draw => "Draw!",
        }
    }
}

/// Discrete input accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveCursor(Direction),
    /// Place an X under the cursor.
    PlaceMark,
    Save,
    Quit,
    Restart,
}

/// Result of a successfully processed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ok,
    /// Snapshot to hand to the persistence layer.
    Saved(SavedGame),
    /// The session should end.
    Quit,
}

/// Errors reported by the engine. All but `Board` leave the engine usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The board could not be created.
    Board(BoardError),
    /// The user's move was rejected; nothing changed.
    IllegalMove(BoardError),
    /// The opponent found no empty cell.
    NoMovesAvailable,
    /// The command is not accepted in the current state.
    UnexpectedCommand { state: GameState, command: Command },
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "Cannot create board: {}", e),
            GameError::IllegalMove(e) => write!(f, "{}", e),
            GameError::NoMovesAvailable => write!(f, "All the cells have been already occupied."),
            GameError::UnexpectedCommand { state, command } => {
                write!(f, "Command {:?} is not accepted in state {:?}", command, state)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Everything a display needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub board: BoardSnapshot,
    pub state: GameState,
    /// Result of the finished round, while one is being shown.
    pub outcome: Option<Outcome>,
}

impl RenderSnapshot {
    /// One-line status for the current state.
    pub fn status_message(&self) -> &'static str {
        if let Some(outcome) = self.outcome {
            return outcome.message();
        }
        match self.state {
            GameState::UserTurn => "Your turn: place an X.",
            GameState::AiTurn | GameState::WinnerChecking => "Opponent is moving...",
            GameState::XWin | GameState::OWin | GameState::Draw | GameState::Continue => {
                "Round over."
            }
        }
    }
}

/// Turn sequencing for a human (`X`) against an [`Opponent`] (`O`).
///
/// Every command runs to completion: the automatic `WinnerChecking` and
/// `AiTurn` transitions are taken before the command returns, stopping at a
/// state that needs input or at an outcome state to be shown.
#[derive(Debug, Clone)]
pub struct GameEngine<O: Opponent = RandomOpponent> {
    board: Board,
    state: GameState,
    last_mover: Option<CellState>,
    opponent: O,
}

#[cfg(feature = "std")]
impl GameEngine<RandomOpponent> {
    /// Engine with a randomly seeded opponent.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        Self::with_opponent(width, height, RandomOpponent::from_entropy())
    }
}

impl<O: Opponent> GameEngine<O> {
    /// Create an engine with an empty `width` x `height` board, user to move.
    pub fn with_opponent(width: usize, height: usize, opponent: O) -> Result<Self, GameError> {
        let board = Board::new(width, height).map_err(GameError::Board)?;
        info!("new {}x{} game, win threshold {}", width, height, board.win_threshold());
        Ok(Self {
            board,
            state: GameState::UserTurn,
            last_mover: None,
            opponent,
        })
    }

    pub(crate) fn from_parts(
        board: Board,
        state: GameState,
        last_mover: Option<CellState>,
        opponent: O,
    ) -> Self {
        Self {
            board,
            state,
            last_mover,
            opponent,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Who placed the most recent mark this round.
    pub fn last_mover(&self) -> Option<CellState> {
        self.last_mover
    }

    /// Result of the current round, once there is one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::XWin => Some(Outcome::XWins),
            GameState::OWin => Some(Outcome::OWins),
            GameState::Draw => Some(Outcome::Draw),
            // the board still holds the finished round
            GameState::Continue => Some(match compute_winner(&self.board) {
                Some(CellState::MarkX) => Outcome::XWins,
                Some(CellState::MarkO) => Outcome::OWins,
                _ => Outcome::Draw,
            }),
            GameState::UserTurn | GameState::AiTurn | GameState::WinnerChecking => None,
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            board: self.board.snapshot(),
            state: self.state,
            outcome: self.outcome(),
        }
    }

    /// Dispatch an input command.
    pub fn apply(&mut self, command: Command) -> Result<Response, GameError> {
        match command {
            Command::MoveCursor(direction) => self.move_cursor(direction).map(|()| Response::Ok),
            Command::PlaceMark => self.place_mark(self.board.cursor()).map(|()| Response::Ok),
            Command::Save => self.save_state().map(Response::Saved),
            Command::Restart => self.restart().map(|()| Response::Ok),
            Command::Quit => {
                info!("quit requested in state {:?}", self.state);
                Ok(Response::Quit)
            }
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) -> Result<(), GameError> {
        self.settle();
        self.expect_state(GameState::UserTurn, Command::MoveCursor(direction))?;
        self.board.move_cursor(direction);
        Ok(())
    }

    /// Place the user's X at `pos` and play out the opponent's reply.
    pub fn place_mark(&mut self, pos: Pos) -> Result<(), GameError> {
        self.settle();
        self.expect_state(GameState::UserTurn, Command::PlaceMark)?;
        self.board
            .set_symbol(pos, CellState::MarkX)
            .map_err(GameError::IllegalMove)?;
        debug!("user placed X at {:?}", pos);
        self.last_mover = Some(CellState::MarkX);
        self.transition(GameState::WinnerChecking);
        self.settle();
        Ok(())
    }

    /// Snapshot for persistence; only offered on the user's turn.
    pub fn save_state(&mut self) -> Result<SavedGame, GameError> {
        self.settle();
        self.expect_state(GameState::UserTurn, Command::Save)?;
        Ok(self.to_saved())
    }

    /// Start a new round once the previous one has been shown.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.settle();
        self.expect_state(GameState::Continue, Command::Restart)?;
        self.refresh();
        Ok(())
    }

    /// Clear the board and hand the first move to the user, keeping the
    /// board dimensions.
    pub fn refresh(&mut self) {
        self.board.clear();
        self.last_mover = None;
        self.state = GameState::UserTurn;
        info!("new round on {}x{} board", self.board.width(), self.board.height());
    }

    /// Take one automatic transition. States waiting for a command are left
    /// as they are; outcome states move on to `Continue`.
    pub fn step(&mut self) -> GameState {
        let next = match self.state {
            GameState::UserTurn => GameState::UserTurn,
            GameState::Continue => GameState::Continue,
            GameState::AiTurn => self.on_ai_turn(),
            GameState::WinnerChecking => self.on_winner_checking(),
            GameState::XWin | GameState::OWin | GameState::Draw => self.on_outcome(),
        };
        self.transition(next);
        next
    }

    /// Run automatic transitions until the engine needs input or has an
    /// outcome to show.
    pub fn settle(&mut self) -> GameState {
        while self.state.is_automatic() {
            let before = self.state;
            if self.step() == before {
                break;
            }
        }
        self.state
    }

    /// Let the opponent place an `O`. A missing or unusable choice falls
    /// back to the first empty cell so the round always advances.
    fn ai_turn(&mut self) -> Result<Pos, GameError> {
        let empty = self.board.empty_cells();
        let first = *empty.first().ok_or(GameError::NoMovesAvailable)?;
        let pos = match self.opponent.select_cell(empty) {
            Some(pos) if empty.contains(&pos) => pos,
            choice => {
                warn!("opponent chose {:?}, placing O at {:?} instead", choice, first);
                first
            }
        };
        self.board
            .set_symbol(pos, CellState::MarkO)
            .map_err(GameError::IllegalMove)?;
        self.last_mover = Some(CellState::MarkO);
        Ok(pos)
    }

    fn on_ai_turn(&mut self) -> GameState {
        match self.ai_turn() {
            Ok(pos) => {
                debug!("opponent placed O at {:?}", pos);
                GameState::WinnerChecking
            }
            Err(GameError::NoMovesAvailable) => {
                debug!("opponent has no move left");
                GameState::Draw
            }
            Err(err) => {
                warn!("opponent move failed: {}", err);
                GameState::AiTurn
            }
        }
    }

    fn on_winner_checking(&mut self) -> GameState {
        match compute_winner(&self.board) {
            Some(CellState::MarkX) => GameState::XWin,
            Some(CellState::MarkO) => GameState::OWin,
            _ if self.board.is_full() => GameState::Draw,
            _ => match self.last_mover {
                Some(CellState::MarkX) => GameState::AiTurn,
                _ => GameState::UserTurn,
            },
        }
    }

    fn on_outcome(&self) -> GameState {
        info!("round finished: {:?}", self.state);
        GameState::Continue
    }

    fn transition(&mut self, next: GameState) {
        if next != self.state {
            debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn expect_state(&self, expected: GameState, command: Command) -> Result<(), GameError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GameError::UnexpectedCommand {
                state: self.state,
                command,
            })
        }
    }
}
