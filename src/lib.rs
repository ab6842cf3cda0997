pub mod board;
pub mod feedback;
pub mod game_logic;
pub mod movegen;
pub mod rules;
pub mod terminal;

use board::Location;

/// Trait for receiving square clicks from the player.
///
/// Abstracts over interactive input and scripted click sequences,
/// providing a uniform interface for `GameEngine::play_clicks`.
pub trait ClickSource {
    /// Error type for input failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// The next clicked square, or `None` when no input is pending.
    fn next_click(&mut self) -> Result<Option<Location>, Self::Error>;
}

/// Trait for displaying the board and its feedback to the player.
///
/// Mirrors [`ClickSource`] on the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given game snapshot with its square highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants to
    /// their own output (terminal colors, UI highlights, etc.).
    fn show(
        &mut self,
        state: &game_logic::GameState,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
