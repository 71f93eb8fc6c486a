//! Incrementally maintained match counters.

use crate::estimate::{estimate, EloEstimate};
use crate::record::GameRecord;
use crate::tally::MatchOutcomeTally;

/// Running win/draw counters for a fixed pair of contestants.
///
/// Feeding games one at a time with [`push`](Self::push) keeps the counters
/// equal to [`tally`](crate::tally) over everything pushed so far, so a
/// growing results log costs O(1) per new game instead of a full recount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTally {
    id_a: String,
    id_b: String,
    counts: MatchOutcomeTally,
    games: usize,
}

impl RunningTally {
    /// Creates empty counters for contestants `id_a` and `id_b`.
    pub fn new(id_a: impl Into<String>, id_b: impl Into<String>) -> Self {
        Self {
            id_a: id_a.into(),
            id_b: id_b.into(),
            counts: MatchOutcomeTally::default(),
            games: 0,
        }
    }

    /// Name of contestant A.
    pub fn id_a(&self) -> &str {
        &self.id_a
    }

    /// Name of contestant B.
    pub fn id_b(&self) -> &str {
        &self.id_b
    }

    /// Adds one game. Unknown results still count towards [`games`](Self::games).
    pub fn push(&mut self, record: &GameRecord) {
        self.counts.add(record, &self.id_a, &self.id_b);
        self.games += 1;
    }

    /// Adds several games in order.
    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a GameRecord>,
    {
        for record in records {
            self.push(record);
        }
    }

    /// Clears the counters, keeping the contestants.
    pub fn reset(&mut self) {
        self.counts = MatchOutcomeTally::default();
        self.games = 0;
    }

    /// The counts so far.
    #[must_use]
    pub fn tally(&self) -> MatchOutcomeTally {
        self.counts
    }

    /// Number of games pushed so far, unknown results included.
    #[must_use]
    pub fn games(&self) -> usize {
        self.games
    }

    /// The estimate over every game pushed so far.
    #[must_use]
    pub fn estimate(&self) -> EloEstimate {
        estimate(&self.counts, self.games)
    }
}
