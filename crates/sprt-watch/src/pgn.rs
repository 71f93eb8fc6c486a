//! Reading match results from a PGN results file.
//!
//! The match runner appends one game at a time to its results file. This
//! module turns that file into an ordered list of [`ResultEntry`] values,
//! keeping only the headers the watcher needs. Move legality is never
//! checked; a game is only looked at for its tags, its mainline length and
//! its termination marker.

use match_stats::{GameRecord, Outcome};
use pgn_reader::{Outcome as PgnOutcome, RawTag, Reader, SanPlus, Skip, Visitor};
use std::fs::File;
use std::io::{self, Read};
use std::mem;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a results file.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The results file exists but could not be opened.
    #[error("Failed to open {path:?}: {source}")]
    Open {
        /// Path of the results file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Reading failed before a single game could be parsed.
    #[error("Failed to read PGN: {0}")]
    Io(#[from] io::Error),
}

/// One game from the results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// What the estimator sees: outcome and contestants.
    pub record: GameRecord,
    /// Normalized result text, e.g. `1-0`, `1/2-1/2` or `*`.
    pub result: String,
    /// The `Termination` tag, if present.
    pub termination: Option<String>,
    /// Number of mainline half-moves.
    pub plies: u32,
}

/// Normalizes the spellings of a PGN result found in the wild.
///
/// Decisive results pass through, the various draw spellings become
/// `1/2-1/2`, and an empty value becomes `*`. Anything else is returned
/// trimmed but otherwise untouched.
pub fn normalize_result(raw: &str) -> &str {
    match raw.trim() {
        "" => "*",
        "1/2-1/2" | "1/2 - 1/2" | "½-½" | "1/2–1/2" => "1/2-1/2",
        other => other,
    }
}

/// Maps a normalized result to an [`Outcome`].
pub fn outcome_from_result(result: &str) -> Outcome {
    match result {
        "1-0" => Outcome::WhiteWin,
        "0-1" => Outcome::BlackWin,
        "1/2-1/2" => Outcome::Draw,
        _ => Outcome::Unknown,
    }
}

/// A game as seen by [`ResultVisitor`], before normalization.
#[derive(Debug)]
struct ParsedGame {
    white: String,
    black: String,
    result_tag: Option<String>,
    termination: Option<String>,
    marker: Option<String>,
    plies: u32,
}

impl ParsedGame {
    /// True when the movetext ended with a result marker.
    ///
    /// A game that is still being written has its tags but no marker yet.
    fn is_terminated(&self) -> bool {
        self.marker.is_some()
    }

    fn into_entry(self) -> ResultEntry {
        let raw = self
            .result_tag
            .as_deref()
            .or(self.marker.as_deref())
            .unwrap_or_default();
        let result = normalize_result(raw).to_string();
        let outcome = outcome_from_result(&result);

        ResultEntry {
            record: GameRecord::new(outcome, self.white, self.black),
            result,
            termination: self.termination,
            plies: self.plies,
        }
    }
}

/// Streaming visitor that keeps the tags a results report needs.
#[derive(Default)]
struct ResultVisitor {
    white: String,
    black: String,
    result_tag: String,
    termination: String,
    marker: Option<String>,
    plies: u32,
}

impl ResultVisitor {
    fn opt_take(field: &mut String) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(mem::take(field))
        }
    }
}

impl Visitor for ResultVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ParsedGame;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        *self = Self::default();
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let slot = match key {
            b"White" => &mut self.white,
            b"Black" => &mut self.black,
            b"Result" => &mut self.result_tag,
            b"Termination" => &mut self.termination,
            _ => return ControlFlow::Continue(()),
        };

        // First occurrence wins.
        if slot.is_empty() {
            *slot = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, _: &mut Self::Movetext, _: SanPlus) -> ControlFlow<Self::Output> {
        self.plies += 1;
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: PgnOutcome) -> ControlFlow<Self::Output> {
        self.marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
        ParsedGame {
            white: mem::take(&mut self.white),
            black: mem::take(&mut self.black),
            result_tag: Self::opt_take(&mut self.result_tag),
            termination: Self::opt_take(&mut self.termination),
            marker: self.marker.take(),
            plies: self.plies,
        }
    }
}

/// Reads every game from a PGN stream, in file order.
///
/// The last game is dropped when its movetext has no termination marker,
/// since the match runner is most likely still writing it. A read error after
/// at least one game stops parsing and returns what was read so far.
///
/// # Errors
///
/// Returns [`ReadError::Io`] if reading fails before any game was parsed.
pub fn read_results<R: Read>(input: R) -> Result<Vec<ResultEntry>, ReadError> {
    let mut reader = Reader::new(input);
    let mut visitor = ResultVisitor::default();
    let mut games: Vec<ParsedGame> = Vec::new();

    loop {
        match reader.read_game(&mut visitor) {
            Ok(Some(game)) => games.push(game),
            Ok(None) => break,
            Err(err) if games.is_empty() => return Err(ReadError::Io(err)),
            Err(err) => {
                tracing::warn!(
                    "Stopped reading results after game {}: {}",
                    games.len(),
                    err
                );
                break;
            }
        }
    }

    if games.last().is_some_and(|game| !game.is_terminated()) {
        tracing::debug!("Skipping unterminated trailing game {}", games.len());
        games.pop();
    }

    Ok(games.into_iter().map(ParsedGame::into_entry).collect())
}

/// Reads the results file at `path`.
///
/// A missing file is not an error: the match has simply not produced a game
/// yet, so an empty list is returned.
pub fn read_results_file(path: &Path) -> Result<Vec<ResultEntry>, ReadError> {
    match File::open(path) {
        Ok(file) => read_results(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(ReadError::Open {
            path: path.to_path_buf(),
            source,
        }),
    }
}
