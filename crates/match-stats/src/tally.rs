//! Win/draw counting for a pair of contestants.

use serde::Serialize;

use crate::record::{GameRecord, Outcome};

/// Wins for contestant A, wins for contestant B, and draws over some prefix
/// of a match.
///
/// Games with an [`Outcome::Unknown`] result are not counted anywhere, so the
/// three counts may add up to less than the number of games played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchOutcomeTally {
    /// Games won by contestant A.
    pub wins_a: usize,
    /// Games won by contestant B.
    pub wins_b: usize,
    /// Drawn games, whoever played them.
    pub draws: usize,
}

impl MatchOutcomeTally {
    /// Creates a tally from explicit counts.
    #[must_use]
    pub const fn new(wins_a: usize, wins_b: usize, draws: usize) -> Self {
        Self {
            wins_a,
            wins_b,
            draws,
        }
    }

    /// Returns the number of games that were counted.
    #[must_use]
    pub const fn counted(&self) -> usize {
        self.wins_a + self.wins_b + self.draws
    }

    /// Returns the same tally seen from contestant B's side.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            wins_a: self.wins_b,
            wins_b: self.wins_a,
            draws: self.draws,
        }
    }

    /// Adds one game to the tally.
    ///
    /// A win is credited to A or B only when the winning side's name matches
    /// one of them; A is checked first.
    pub(crate) fn add(&mut self, record: &GameRecord, id_a: &str, id_b: &str) {
        if record.outcome.is_decisive() {
            let winner = record.winner().unwrap_or_default();
            if winner == id_a {
                self.wins_a += 1;
            } else if winner == id_b {
                self.wins_b += 1;
            }
        } else if record.outcome == Outcome::Draw {
            self.draws += 1;
        }
    }
}

/// Counts wins for `id_a`, wins for `id_b`, and draws over `records`.
///
/// Draws count no matter who played them. Wins by a contestant that is
/// neither `id_a` nor `id_b` are ignored, as are unknown results. Passing the
/// same name twice is a caller error.
///
/// # Example
///
/// ```
/// use match_stats::{tally, GameRecord, Outcome};
///
/// let games = vec![
///     GameRecord::new(Outcome::WhiteWin, "new", "base"),
///     GameRecord::new(Outcome::WhiteWin, "base", "new"),
///     GameRecord::new(Outcome::Draw, "new", "base"),
/// ];
///
/// let counts = tally(&games, "new", "base");
/// assert_eq!((counts.wins_a, counts.wins_b, counts.draws), (1, 1, 1));
/// ```
pub fn tally(records: &[GameRecord], id_a: &str, id_b: &str) -> MatchOutcomeTally {
    let mut counts = MatchOutcomeTally::default();
    for record in records {
        counts.add(record, id_a, id_b);
    }
    counts
}
