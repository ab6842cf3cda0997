use std::fmt;

use crate::ClickSource;
use crate::board::{self, Board, BoardError, Color, Location};
use crate::feedback::{CheckInfo, FeedbackSource};
use crate::rules;

/// Whether the game is still being played, and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    InProgress { side_to_move: Color },
    GameOver { winner: Color },
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub applied: bool,
    pub game_over: bool,
    pub winner: Option<Color>,
}

impl MoveOutcome {
    const REJECTED: Self = Self {
        applied: false,
        game_over: false,
        winner: None,
    };
}

/// What a click on a square did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece of the side to move is now selected.
    Selected { from: Location },
    /// The previous selection was cleared.
    Deselected,
    /// The selected piece moved to the clicked square.
    Moved(MoveOutcome),
}

/// Current game state snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    status: Status,
    selected: Option<Location>,
    destinations: Vec<Location>,
    king: Option<Location>,
    checkers: Vec<Location>,
}

impl GameState {
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver { .. })
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            Status::GameOver { winner } => Some(winner),
            Status::InProgress { .. } => None,
        }
    }
}

impl FeedbackSource for GameState {
    fn board(&self) -> &Board {
        &self.board
    }

    fn selected(&self) -> Option<Location> {
        self.selected
    }

    fn destinations(&self) -> &[Location] {
        &self.destinations
    }

    fn check_info(&self) -> Option<CheckInfo> {
        match self.king {
            Some(king) if !self.checkers.is_empty() => Some(CheckInfo {
                king,
                checkers: self.checkers.clone(),
            }),
            _ => None,
        }
    }
}

/// Two-player game: owns the board, enforces turn order and detects checkmate.
pub struct GameEngine {
    board: Board,

    /// Side whose turn it is. Not flipped by a mating move.
    side_to_move: Color,

    selected: Option<Location>,

    winner: Option<Color>,
}

impl GameEngine {
    /// Standard starting position, white to move.
    #[inline]
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
            selected: None,
            winner: None,
        }
    }

    /// Creates a GameEngine from an existing board.
    ///
    /// Fails if the side not on move is in check, since its king could be
    /// captured. A board on which `side_to_move` is already checkmated
    /// starts as a finished game, with the winner on move as after a
    /// mating move.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, BoardError> {
        let waiting = side_to_move.other();
        if rules::is_in_check(&board, waiting) {
            return Err(BoardError::OpponentInCheck(waiting));
        }

        let mated = rules::is_checkmate(&board, side_to_move);
        if mated {
            log::info!("loaded position is checkmate, {waiting:?} wins");
        }
        Ok(Self {
            board,
            side_to_move: if mated { waiting } else { side_to_move },
            selected: None,
            winner: mated.then_some(waiting),
        })
    }

    /// Creates a GameEngine from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let (board, side_to_move) = board::parse_fen(fen)?;
        Self::from_board(board, side_to_move)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn selected(&self) -> Option<Location> {
        self.selected
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn status(&self) -> Status {
        match self.winner {
            Some(winner) => Status::GameOver { winner },
            None => Status::InProgress {
                side_to_move: self.side_to_move,
            },
        }
    }

    /// Legal destinations for the piece on `from`.
    ///
    /// Empty unless the game is in progress and the piece belongs to the
    /// side to move.
    pub fn legal_moves(&self, from: Location) -> Vec<Location> {
        let piece = self.board.at(from);
        if self.is_game_over() || !piece.is_color(self.side_to_move) {
            return Vec::new();
        }
        rules::legal_moves(&piece, &self.board)
    }

    /// Handle a click on a square.
    ///
    /// Selects a piece of the side to move, moves the selected piece when
    /// the square is one of its legal destinations, and otherwise clears
    /// the selection.
    pub fn click(&mut self, at: Location) -> ClickOutcome {
        if self.is_game_over() {
            log::trace!("click on {at} ignored, game is over");
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selected {
            if at == from {
                self.selected = None;
                return ClickOutcome::Deselected;
            }
            if self.legal_moves(from).contains(&at) {
                self.selected = None;
                return ClickOutcome::Moved(self.commit(from, at));
            }
        }

        if self.board.at(at).is_color(self.side_to_move) {
            log::debug!("{:?} selects {at}", self.side_to_move);
            self.selected = Some(at);
            return ClickOutcome::Selected { from: at };
        }

        if self.selected.take().is_some() {
            ClickOutcome::Deselected
        } else {
            log::trace!("click on {at} ignored");
            ClickOutcome::Ignored
        }
    }

    /// Move the piece on `from` to `to` if that is legal for the side to move.
    ///
    /// Any selection is cleared when the move is applied and kept otherwise.
    pub fn attempt_move(&mut self, from: Location, to: Location) -> MoveOutcome {
        if !self.legal_moves(from).contains(&to) {
            log::trace!("rejected move {from}{to}");
            return MoveOutcome::REJECTED;
        }
        self.selected = None;
        self.commit(from, to)
    }

    /// Apply every pending click from `source`, returning the resulting state.
    pub fn play_clicks<S: ClickSource>(&mut self, source: &mut S) -> Result<GameState, S::Error> {
        while let Some(at) = source.next_click()? {
            self.click(at);
        }
        Ok(self.state())
    }

    /// Back to the starting position, white to move.
    pub fn restart(&mut self) {
        log::info!("game restarted");
        *self = Self::new();
    }

    /// Snapshot of the game for rendering.
    pub fn state(&self) -> GameState {
        let destinations = self
            .selected
            .map(|from| self.legal_moves(from))
            .unwrap_or_default();

        // After mate the side to move is the winner; the mated king is the other one.
        let defender = match self.winner {
            Some(winner) => winner.other(),
            None => self.side_to_move,
        };

        GameState {
            board: self.board,
            side_to_move: self.side_to_move,
            status: self.status(),
            selected: self.selected,
            destinations,
            king: self.board.king_location(defender),
            checkers: rules::checkers(&self.board, defender),
        }
    }

    fn commit(&mut self, from: Location, to: Location) -> MoveOutcome {
        let mover = self.side_to_move;
        log::debug!("{mover:?} plays {from}{to}");
        self.board = self.board.with_move(from, to);

        let opponent = mover.other();
        if rules::is_checkmate(&self.board, opponent) {
            log::info!("checkmate, {mover:?} wins");
            self.winner = Some(mover);
        } else {
            self.side_to_move = opponent;
        }

        MoveOutcome {
            applied: true,
            game_over: self.winner.is_some(),
            winner: self.winner,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field(
                "position",
                &format_args!("{} {}", self.board.to_fen(), self.side_to_move.char()),
            )
            .field("selected", &self.selected)
            .field("winner", &self.winner)
            .finish()
    }
}
