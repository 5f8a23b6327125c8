use crate::domain::action::Action;
use crate::error::{LocError, Result};
use std::io::BufRead;

/// Reads actions from newline-delimited JSON.
///
/// Each non-blank line holds one action object tagged by its `action` field.
/// A malformed line yields an error for that line only; reading continues
/// with the next one.
pub struct ActionReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> ActionReader<R> {
    /// Creates a new `ActionReader` from any buffered source (e.g., `BufReader<File>`, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily reads and deserializes actions.
    pub fn actions(self) -> impl Iterator<Item = Result<Action>> {
        self.source
            .lines()
            .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|line| {
                let line = line.map_err(LocError::from)?;
                serde_json::from_str(line.trim()).map_err(LocError::from)
            })
    }
}
