//! Per-prefix estimates for trend display.

use std::iter::FusedIterator;
use std::slice;

use crate::estimate::EloEstimate;
use crate::record::GameRecord;
use crate::running::RunningTally;

/// The estimate after the first `game` games of a match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Length of the prefix, starting at 1.
    pub game: usize,
    /// The estimate over that prefix.
    pub estimate: EloEstimate,
}

/// Lazy iterator over [`SeriesPoint`]s, created by [`series`].
///
/// Each step pushes one game into a [`RunningTally`], so walking the whole
/// series is linear in the number of games. Cloning the iterator gives an
/// independent restart point.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    records: slice::Iter<'a, GameRecord>,
    running: RunningTally,
}

impl Iterator for Series<'_> {
    type Item = SeriesPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.running.push(record);
        Some(SeriesPoint {
            game: self.running.games(),
            estimate: self.running.estimate(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Series<'_> {}

impl FusedIterator for Series<'_> {}

/// Returns one estimate per prefix of `records`, from the first game to the
/// last.
///
/// The `i`-th point equals
/// `estimate(&tally(&records[..i], id_a, id_b), i)`. Infinite Elo values are
/// passed through unchanged.
///
/// # Example
///
/// ```
/// use match_stats::{series, GameRecord, Outcome};
///
/// let games = vec![
///     GameRecord::new(Outcome::WhiteWin, "A", "B"),
///     GameRecord::new(Outcome::WhiteWin, "B", "A"),
/// ];
///
/// let points: Vec<_> = series(&games, "A", "B").collect();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].estimate.elo_diff, f64::INFINITY);
/// assert_eq!(points[1].estimate.elo_diff, 0.0);
/// ```
pub fn series<'a>(records: &'a [GameRecord], id_a: &str, id_b: &str) -> Series<'a> {
    Series {
        records: records.iter(),
        running: RunningTally::new(id_a, id_b),
    }
}
