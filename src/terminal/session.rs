use std::io::{self, Write};

use super::{ScriptedClicks, TerminalDisplay};
use crate::BoardDisplay;
use crate::board::Location;
use crate::feedback::compute_feedback;
use crate::game_logic::{ClickOutcome, GameEngine};

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive two-player session in the terminal.
///
/// Players take turns clicking squares by name; the board is redrawn with
/// the selection, legal destinations and check highlights after each command.
pub fn run_interactive_terminal() {
    let mut engine = GameEngine::new();
    let mut display = TerminalDisplay::new();

    clear_screen();
    draw_interface(&mut display, &engine);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let message = match parts[0] {
            "m" => {
                if parts.len() < 3 {
                    Some("Usage: m <from> <to>".to_string())
                } else {
                    match (parts[1].parse::<Location>(), parts[2].parse::<Location>()) {
                        (Ok(from), Ok(to)) => {
                            if engine.attempt_move(from, to).applied {
                                None
                            } else {
                                Some(format!("❌ {from}{to} is not a legal move"))
                            }
                        }
                        (Err(e), _) | (_, Err(e)) => Some(format!("Invalid square: {}", e)),
                    }
                }
            }
            "s" => {
                let mut clicks = ScriptedClicks::new();
                match clicks.push_script(&parts[1..].join(" ")) {
                    Ok(()) => match engine.play_clicks(&mut clicks) {
                        Ok(_) => None,
                        Err(e) => match e {},
                    },
                    Err(e) => Some(format!("Invalid script: {}", e)),
                }
            }
            "load" => {
                if parts.len() < 2 {
                    Some("Usage: load <fen> | load startpos".to_string())
                } else {
                    let fen_str = if parts[1] == "startpos" {
                        STARTPOS.to_string()
                    } else {
                        // Rejoin the rest of the parts as FEN contains spaces
                        parts[1..].join(" ")
                    };

                    match GameEngine::from_fen(&fen_str) {
                        Ok(loaded) => {
                            engine = loaded;
                            Some("✅ Position loaded from FEN".to_string())
                        }
                        Err(e) => Some(format!("❌ {}", e)),
                    }
                }
            }
            "r" => {
                engine.restart();
                Some("🔄 New game".to_string())
            }
            "p" => None,
            "q" => break,
            square => match square.parse::<Location>() {
                Ok(at) => match engine.click(at) {
                    ClickOutcome::Ignored => Some(format!("Nothing to do on {at}")),
                    _ => None,
                },
                Err(_) => Some("Unknown command".to_string()),
            },
        };

        clear_screen();
        draw_interface(&mut display, &engine);
        if let Some(message) = message {
            println!("\n{message}");
        }
    }
}

/// Draws the complete interface: help text, board and status.
fn draw_interface(display: &mut TerminalDisplay, engine: &GameEngine) {
    println!("♟️  Hotseat Chess");
    println!();
    println!(
        "Commands: <square> (click) | m <from> <to> | s <clicks> | load <fen> | r (restart) | p (refresh) | q (quit)"
    );
    println!();

    let state = engine.state();
    let feedback = compute_feedback(&state);
    if let Err(e) = display.show(&state, &feedback) {
        eprintln!("Failed to draw board: {}", e);
    }
}
