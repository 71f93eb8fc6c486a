//! Game records as seen by the estimator.

use serde::Serialize;

/// The resolved result of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// White won the game.
    WhiteWin,
    /// Black won the game.
    BlackWin,
    /// The game ended in a draw.
    Draw,
    /// The game is still running or its result could not be read.
    Unknown,
}

impl Outcome {
    /// Returns true for a white or black win.
    #[inline]
    pub const fn is_decisive(self) -> bool {
        matches!(self, Outcome::WhiteWin | Outcome::BlackWin)
    }
}

/// One game of a match: its outcome and who played which side.
///
/// Records are built once by whoever reads the results log and are never
/// modified afterwards. Side assignment usually alternates between games,
/// so the same contestant shows up as `white_id` in one record and as
/// `black_id` in the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameRecord {
    /// The outcome of the game.
    pub outcome: Outcome,
    /// Name of the contestant playing white.
    pub white_id: String,
    /// Name of the contestant playing black.
    pub black_id: String,
}

impl GameRecord {
    /// Creates a record from an outcome and the two contestant names.
    pub fn new(outcome: Outcome, white_id: impl Into<String>, black_id: impl Into<String>) -> Self {
        Self {
            outcome,
            white_id: white_id.into(),
            black_id: black_id.into(),
        }
    }

    /// Returns the name of the winner, or `None` for draws and unknown results.
    pub fn winner(&self) -> Option<&str> {
        match self.outcome {
            Outcome::WhiteWin => Some(&self.white_id),
            Outcome::BlackWin => Some(&self.black_id),
            Outcome::Draw | Outcome::Unknown => None,
        }
    }
}
