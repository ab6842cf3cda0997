use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::ClickSource;
use crate::board::Location;

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseError(String);

/// A scriptable click source.
///
/// Queues squares parsed from a script and hands them out one click at a
/// time. New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClicks {
    pending: VecDeque<Location>,
}

impl ScriptedClicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional clicks.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1")
    /// - Whitespace and periods separate squares but are optional
    ///
    /// Examples:
    /// - `"e2e4"` - Click e2, then e4
    /// - `"e2 e4. e7 e5."` - White plays e2-e4, black answers e7-e5
    ///
    /// Nothing is queued if any token is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let clicks = parse_script(script)?;
        self.pending.extend(clicks);
        Ok(())
    }

    /// Number of clicks not yet handed out.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Next pending click, or None if the script is exhausted.
    pub fn tick(&mut self) -> Option<Location> {
        self.pending.pop_front()
    }

    /// Hand out all pending clicks, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_click: F)
    where
        F: FnMut(Location),
    {
        while let Some(at) = self.tick() {
            on_click(at);
        }
    }
}

impl ClickSource for ScriptedClicks {
    type Error = Infallible;

    fn next_click(&mut self) -> Result<Option<Location>, Self::Error> {
        Ok(self.tick())
    }
}

/// Parse a click script into the squares to click, in order.
fn parse_script(script: &str) -> Result<Vec<Location>, ParseError> {
    let mut clicks = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut clicks)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut clicks)?,
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut clicks)?;
                }
            }
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut clicks)?;
    Ok(clicks)
}

/// Add current token to the click list and clear it.
fn flush_token(token: &mut String, clicks: &mut Vec<Location>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let location: Location = token.parse().map_err(|_| ParseError(token.clone()))?;
        clicks.push(location);
        token.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(square: &str) -> Location {
        square.parse().expect("test square is valid")
    }

    #[test_case("e2e4"; "compact")]
    #[test_case("e2 e4"; "spaced")]
    #[test_case("e2. e4."; "dotted")]
    #[test_case("  e2\te4\n"; "stray whitespace")]
    fn test_parse_two_clicks(script: &str) {
        let mut clicks = ScriptedClicks::new();
        clicks.push_script(script).expect("valid script");

        assert_eq!(clicks.len(), 2);
        assert_eq!(clicks.tick(), Some(sq("e2")));
        assert_eq!(clicks.tick(), Some(sq("e4")));
        assert_eq!(clicks.tick(), None);
    }

    #[test]
    fn test_parse_error_invalid_square() {
        let mut clicks = ScriptedClicks::new();
        let result = clicks.push_script("e2 zz");
        assert_eq!(result, Err(ParseError("zz".to_string())));
    }

    #[test]
    fn test_parse_error_trailing_half_token() {
        let mut clicks = ScriptedClicks::new();
        let result = clicks.push_script("e2 e");
        assert_eq!(result, Err(ParseError("e".to_string())));
    }

    #[test]
    fn test_parse_error_does_not_modify_state() {
        let mut clicks = ScriptedClicks::new();

        clicks.push_script("e2").unwrap();

        let result = clicks.push_script("xx");
        assert!(result.is_err());

        // The valid click should still be pending
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks.next_click(), Ok(Some(sq("e2"))));
        assert_eq!(clicks.next_click(), Ok(None));
    }

    #[test]
    fn test_drain_visits_clicks_in_order() {
        let mut clicks = ScriptedClicks::new();
        clicks.push_script("g1 f3 b8").unwrap();

        let mut seen = Vec::new();
        clicks.drain(|at| seen.push(at));

        assert_eq!(seen, vec![sq("g1"), sq("f3"), sq("b8")]);
        assert!(clicks.is_empty());
    }
}
