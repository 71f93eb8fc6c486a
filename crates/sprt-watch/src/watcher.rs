//! Incremental tracking of a results file that grows while a match runs.
//!
//! The match runner only ever appends games to its results file, so on each
//! refresh the watcher re-reads the file, checks that the games it already
//! knows are still there, and feeds only the new ones into its running
//! counters. If the file was cleared or replaced, everything is rebuilt.

use match_stats::{EloEstimate, GameRecord, MatchOutcomeTally, RunningTally, SeriesPoint};
use std::path::{Path, PathBuf};

use crate::pgn::{read_results_file, ReadError, ResultEntry};

/// The two contestants a report is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    /// Contestant A, whose Elo advantage is reported.
    pub a: String,
    /// Contestant B, the baseline.
    pub b: String,
}

impl Matchup {
    /// Creates a matchup from two contestant names.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Takes White as A and Black as B.
    pub fn from_record(record: &GameRecord) -> Self {
        Self::new(record.white_id.clone(), record.black_id.clone())
    }
}

/// What a call to [`ResultsWatcher::refresh`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// There are no games yet.
    Waiting,
    /// The state was rebuilt from scratch over this many games.
    Rebuilt(usize),
    /// This many games were appended since the previous refresh.
    Appended(usize),
}

impl RefreshOutcome {
    /// Returns true when the reportable state changed.
    pub fn changed(self) -> bool {
        match self {
            RefreshOutcome::Waiting => false,
            RefreshOutcome::Rebuilt(_) => true,
            RefreshOutcome::Appended(n) => n > 0,
        }
    }
}

/// Read-only view of the watcher state, handed to the report functions.
#[derive(Debug, Clone, Copy)]
pub struct MatchSnapshot<'a> {
    /// Who is being compared.
    pub matchup: &'a Matchup,
    /// Every game read so far, in play order.
    pub entries: &'a [ResultEntry],
    /// Counts over all games.
    pub tally: MatchOutcomeTally,
    /// Estimate over all games.
    pub estimate: EloEstimate,
    /// One estimate per game prefix.
    pub series: &'a [SeriesPoint],
}

#[derive(Debug)]
struct WatchState {
    matchup: Matchup,
    entries: Vec<ResultEntry>,
    running: RunningTally,
    series: Vec<SeriesPoint>,
}

impl WatchState {
    fn new(matchup: Matchup) -> Self {
        let running = RunningTally::new(matchup.a.clone(), matchup.b.clone());
        Self {
            matchup,
            entries: Vec::new(),
            running,
            series: Vec::new(),
        }
    }

    fn append(&mut self, new_entries: Vec<ResultEntry>) {
        self.series.reserve(new_entries.len());
        for entry in &new_entries {
            self.running.push(&entry.record);
            self.series.push(SeriesPoint {
                game: self.running.games(),
                estimate: self.running.estimate(),
            });
        }
        self.entries.extend(new_entries);
    }
}

/// Follows a results file and keeps running match statistics for it.
///
/// When no [`Matchup`] is given, the contestants are taken from the first
/// game and kept until the file is reset.
#[derive(Debug)]
pub struct ResultsWatcher {
    path: PathBuf,
    configured: Option<Matchup>,
    state: Option<WatchState>,
}

impl ResultsWatcher {
    /// Creates a watcher for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>, matchup: Option<Matchup>) -> Self {
        Self {
            path: path.into(),
            configured: matchup,
            state: None,
        }
    }

    /// The watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the results file and updates the running statistics.
    ///
    /// # Errors
    ///
    /// Returns the reader's error if the file cannot be read. The previous
    /// state is kept in that case.
    pub fn refresh(&mut self) -> Result<RefreshOutcome, ReadError> {
        let entries = read_results_file(&self.path)?;
        Ok(self.update(entries))
    }

    /// Updates the running statistics from a full read of the results.
    ///
    /// `entries` must be the complete current contents, not just new games.
    pub fn update(&mut self, mut entries: Vec<ResultEntry>) -> RefreshOutcome {
        if entries.is_empty() {
            if self.state.take().is_some() {
                tracing::info!("Results file {:?} was cleared", self.path);
            }
            return RefreshOutcome::Waiting;
        }

        if let Some(state) = self.state.as_mut() {
            if entries.starts_with(&state.entries) {
                let appended = entries.split_off(state.entries.len());
                let count = appended.len();
                state.append(appended);
                if count > 0 {
                    tracing::debug!("{} new game(s), {} total", count, state.entries.len());
                }
                return RefreshOutcome::Appended(count);
            }
            tracing::info!(
                "Results file {:?} no longer matches the previous read, rebuilding",
                self.path
            );
        }

        let matchup = self
            .configured
            .clone()
            .unwrap_or_else(|| Matchup::from_record(&entries[0].record));
        tracing::info!("Tracking {} vs {}", matchup.a, matchup.b);

        let total = entries.len();
        let mut state = WatchState::new(matchup);
        state.append(entries);
        self.state = Some(state);
        RefreshOutcome::Rebuilt(total)
    }

    /// Returns the current state, or `None` while waiting for the first game.
    pub fn snapshot(&self) -> Option<MatchSnapshot<'_>> {
        self.state.as_ref().map(|state| MatchSnapshot {
            matchup: &state.matchup,
            entries: &state.entries,
            tally: state.running.tally(),
            estimate: state.running.estimate(),
            series: &state.series,
        })
    }
}
