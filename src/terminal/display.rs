use std::io::{self, Write};

use crate::BoardDisplay;
use crate::board::{Board, Color, Location, Piece, SIZE};
use crate::feedback::{BoardFeedback, FeedbackSource, SquareFeedback};
use crate::game_logic::{GameState, Status};

/// Terminal-based board display.
///
/// Renders the board as an 8×8 grid of FEN piece letters with ANSI
/// color-coded backgrounds matching the feedback type, followed by a
/// status line.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, state: &GameState, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_state(&mut io::stdout(), state, feedback)
    }
}

/// Render board and status to any writer. Extracted for testability.
fn render_state(
    w: &mut impl Write,
    state: &GameState,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    render_board(w, state.board(), feedback)?;
    writeln!(w)?;
    match state.status() {
        Status::InProgress { side_to_move } => {
            writeln!(w, "It is now {}'s turn", color_name(side_to_move))?;
        }
        Status::GameOver { winner } => {
            writeln!(w, "Checkmate! {} wins", color_name(winner))?;
        }
    }
    if let Some(selected) = state.selected() {
        let piece = state.board().at(selected);
        writeln!(w, "Selected piece: {} on {selected}", piece_symbol(&piece))?;
    }
    w.flush()?;
    Ok(())
}

fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for location in Location::all() {
        if location.col() == 0 {
            write!(w, " {} ", SIZE - location.row())?;
        }
        let cell = format_square(&board.at(location), feedback.get(location));
        write!(w, "{cell}")?;
        if location.col() == SIZE - 1 {
            writeln!(w)?;
        }
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    Ok(())
}

/// Map a piece and its feedback variant to an ANSI-colored cell string.
fn format_square(piece: &Piece, feedback: Option<SquareFeedback>) -> String {
    let symbol = piece_symbol(piece);
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {symbol} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {symbol} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {symbol} \x1b[0m"),
        Some(SquareFeedback::Check) => format!("\x1b[45m {symbol} \x1b[0m"),
        Some(SquareFeedback::Checker) => format!("\x1b[43m {symbol} \x1b[0m"),
        None => format!(" {symbol} "),
    }
}

fn piece_symbol(piece: &Piece) -> char {
    piece.char().unwrap_or('·')
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}
