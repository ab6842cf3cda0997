use crate::board::{Board, Location};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination onto an empty square
    Destination,
    /// Legal destination that captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side in check
    Check,
    /// Piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by renderers to provide
/// visual cues to the player: the selected piece, where it may go, and who is giving check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Location, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Location, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, location: Location) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, feedback)| *feedback)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Location, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Location, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Check details for the side whose king is attacked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king: Location,
    pub checkers: Vec<Location>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game engine.
pub trait FeedbackSource {
    /// The board being shown
    fn board(&self) -> &Board;

    /// The currently selected piece, if any
    fn selected(&self) -> Option<Location>;

    /// Legal destinations of the selected piece
    fn destinations(&self) -> &[Location];

    /// Check details, if the relevant king is attacked
    fn check_info(&self) -> Option<CheckInfo>;
}

/// Compute visual feedback based on current game state.
///
/// - Piece selected: shows it and its legal destinations
/// - Nothing selected, king in check: shows the king and its attackers
/// - Otherwise nothing
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    match (source.selected(), source.check_info()) {
        (Some(from), _) => show_destinations_for(source.board(), from, source.destinations()),
        (None, Some(check)) => show_check(&check),
        (None, None) => BoardFeedback::default(),
    }
}

/// Show legal destinations of the selected piece
fn show_destinations_for(board: &Board, from: Location, destinations: &[Location]) -> BoardFeedback {
    std::iter::once((from, SquareFeedback::Origin))
        .chain(destinations.iter().map(|&to| classify_destination(board, to)))
        .collect::<Vec<_>>()
        .into()
}

fn show_check(check: &CheckInfo) -> BoardFeedback {
    std::iter::once((check.king, SquareFeedback::Check))
        .chain(
            check
                .checkers
                .iter()
                .map(|&checker| (checker, SquareFeedback::Checker)),
        )
        .collect::<Vec<_>>()
        .into()
}

/// Classify a destination as either a capture or regular destination
fn classify_destination(board: &Board, to: Location) -> (Location, SquareFeedback) {
    if board.at(to).is_empty() {
        (to, SquareFeedback::Destination)
    } else {
        (to, SquareFeedback::Capture)
    }
}
