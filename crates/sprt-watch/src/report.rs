//! Text and JSON rendering of match snapshots.
//!
//! Reports are written to stdout by the binary. Infinite Elo values only
//! occur while one side has scored everything (or nothing), so the trend
//! clamps them to the configured axis range, and the JSON output spells the
//! bound out instead of emitting a non-finite number.

use chrono::Utc;
use match_stats::{EloEstimate, MatchOutcomeTally, Outcome, SeriesPoint};
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::WatchConfig;
use crate::pgn::ResultEntry;
use crate::watcher::MatchSnapshot;

/// Settings that shape a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    /// How many recent games and trend points to list.
    pub console_lines: usize,
    /// Trend values are clamped to `±elo_axis_range`.
    pub elo_axis_range: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&WatchConfig::default())
    }
}

impl From<&WatchConfig> for ReportOptions {
    fn from(config: &WatchConfig) -> Self {
        Self {
            console_lines: config.console_lines,
            elo_axis_range: config.elo_axis_range,
        }
    }
}

/// Clamps an Elo value to `±range` for display. NaN maps to zero.
///
/// The sign of `range` is ignored. A NaN range leaves the value unclamped.
pub fn clamp_elo(elo: f64, range: f64) -> f64 {
    if elo.is_nan() {
        return 0.0;
    }
    let range = range.abs();
    if range.is_nan() {
        return elo;
    }
    elo.clamp(-range, range)
}

/// Formats an estimate as `+12.3 ± 4.5 (LOS 61.2%)`.
pub fn format_estimate(estimate: &EloEstimate) -> String {
    if estimate.elo_diff.is_infinite() {
        let sign = if estimate.elo_diff > 0.0 { "+" } else { "-" };
        format!("{}inf (LOS {:.1}%)", sign, estimate.los)
    } else {
        format!(
            "{:+.1} ± {:.1} (LOS {:.1}%)",
            estimate.elo_diff, estimate.std_error, estimate.los
        )
    }
}

/// One line of the recent-games console.
pub fn console_line(number: usize, entry: &ResultEntry) -> String {
    format!(
        "Game {}: {} vs {} -> {} ({})",
        number,
        entry.record.white_id,
        entry.record.black_id,
        entry.result,
        entry.termination.as_deref().unwrap_or("-")
    )
}

/// The message shown while the results file has no games.
pub fn waiting_message(path: &Path) -> String {
    format!(
        "No games found in {} yet. Waiting for first game...",
        path.display()
    )
}

fn tail<T>(items: &[T], count: usize) -> &[T] {
    &items[items.len().saturating_sub(count)..]
}

/// Plain-text view of a snapshot.
struct TextReport<'a> {
    snapshot: &'a MatchSnapshot<'a>,
    options: &'a ReportOptions,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let matchup = snapshot.matchup;
        let lines = self.options.console_lines;

        writeln!(f, "Match: {} vs {}", matchup.a, matchup.b)?;
        writeln!(f, "Games played: {}", snapshot.entries.len())?;
        writeln!(f, "{} wins: {}", matchup.a, snapshot.tally.wins_a)?;
        writeln!(f, "{} wins: {}", matchup.b, snapshot.tally.wins_b)?;
        writeln!(f, "Draws: {}", snapshot.tally.draws)?;
        writeln!(f, "Elo: {}", format_estimate(&snapshot.estimate))?;

        let offset = snapshot.entries.len().saturating_sub(lines);
        writeln!(f)?;
        writeln!(f, "Latest games:")?;
        for (i, entry) in tail(snapshot.entries, lines).iter().enumerate() {
            writeln!(f, "  {}", console_line(offset + i + 1, entry))?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Elo trend (clamped to ±{}):",
            self.options.elo_axis_range
        )?;
        for point in tail(snapshot.series, lines) {
            writeln!(
                f,
                "  {:>5} {:>+8.1} ± {:.1}",
                point.game,
                clamp_elo(point.estimate.elo_diff, self.options.elo_axis_range),
                point.estimate.std_error
            )?;
        }
        Ok(())
    }
}

/// Renders a plain-text report.
pub fn render_text(snapshot: &MatchSnapshot<'_>, options: &ReportOptions) -> String {
    TextReport { snapshot, options }.to_string()
}

#[derive(Serialize)]
struct EstimateJson {
    /// `None` when the estimate is unbounded.
    elo_diff: Option<f64>,
    /// `"+inf"` or `"-inf"` when the estimate is unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    elo_bound: Option<&'static str>,
    std_error: f64,
    los: f64,
}

impl From<&EloEstimate> for EstimateJson {
    fn from(estimate: &EloEstimate) -> Self {
        let elo_bound = if estimate.elo_diff == f64::INFINITY {
            Some("+inf")
        } else if estimate.elo_diff == f64::NEG_INFINITY {
            Some("-inf")
        } else {
            None
        };
        Self {
            elo_diff: estimate.is_finite().then_some(estimate.elo_diff),
            elo_bound,
            std_error: estimate.std_error,
            los: estimate.los,
        }
    }
}

#[derive(Serialize)]
struct GameJson<'a> {
    game: usize,
    outcome: Outcome,
    white: &'a str,
    black: &'a str,
    result: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    termination: Option<&'a str>,
    plies: u32,
}

#[derive(Serialize)]
struct TrendJson {
    game: usize,
    elo: f64,
    std_error: f64,
}

impl TrendJson {
    fn new(point: &SeriesPoint, range: f64) -> Self {
        Self {
            game: point.game,
            elo: clamp_elo(point.estimate.elo_diff, range),
            std_error: point.estimate.std_error,
        }
    }
}

#[derive(Serialize)]
struct SnapshotJson<'a> {
    engine_a: &'a str,
    engine_b: &'a str,
    games: usize,
    #[serde(flatten)]
    tally: MatchOutcomeTally,
    estimate: EstimateJson,
    latest_games: Vec<GameJson<'a>>,
    trend: Vec<TrendJson>,
    generated_at: String,
}

/// Renders the snapshot as a single line of JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(
    snapshot: &MatchSnapshot<'_>,
    options: &ReportOptions,
) -> serde_json::Result<String> {
    let offset = snapshot.entries.len().saturating_sub(options.console_lines);
    let latest_games = tail(snapshot.entries, options.console_lines)
        .iter()
        .enumerate()
        .map(|(i, entry)| GameJson {
            game: offset + i + 1,
            outcome: entry.record.outcome,
            white: &entry.record.white_id,
            black: &entry.record.black_id,
            result: &entry.result,
            termination: entry.termination.as_deref(),
            plies: entry.plies,
        })
        .collect();
    let trend = tail(snapshot.series, options.console_lines)
        .iter()
        .map(|point| TrendJson::new(point, options.elo_axis_range))
        .collect();

    let json = SnapshotJson {
        engine_a: &snapshot.matchup.a,
        engine_b: &snapshot.matchup.b,
        games: snapshot.entries.len(),
        tally: snapshot.tally,
        estimate: EstimateJson::from(&snapshot.estimate),
        latest_games,
        trend,
        generated_at: Utc::now().to_rfc3339(),
    };

    serde_json::to_string(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watcher::{Matchup, ResultsWatcher};
    use match_stats::{GameRecord, MatchOutcomeTally, Outcome};

    fn entry(outcome: Outcome, white: &str, black: &str, result: &str) -> ResultEntry {
        ResultEntry {
            record: GameRecord::new(outcome, white, black),
            result: result.to_string(),
            termination: Some("adjudication".to_string()),
            plies: 61,
        }
    }

    fn watcher_with(entries: Vec<ResultEntry>) -> ResultsWatcher {
        let mut watcher = ResultsWatcher::new("results.pgn", None);
        watcher.update(entries);
        watcher
    }

    #[test]
    fn test_clamp_elo() {
        assert_eq!(clamp_elo(f64::INFINITY, 100.0), 100.0);
        assert_eq!(clamp_elo(f64::NEG_INFINITY, 100.0), -100.0);
        assert_eq!(clamp_elo(42.5, 100.0), 42.5);
        assert_eq!(clamp_elo(-250.0, 100.0), -100.0);
        assert_eq!(clamp_elo(f64::NAN, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_elo_tolerates_bad_range() {
        assert_eq!(clamp_elo(f64::INFINITY, -50.0), 50.0);
        assert_eq!(clamp_elo(-80.0, -50.0), -50.0);
        assert_eq!(clamp_elo(12.5, f64::NAN), 12.5);
        assert_eq!(clamp_elo(f64::NEG_INFINITY, f64::NAN), f64::NEG_INFINITY);
    }

    #[test]
    fn test_render_text_with_negative_axis_range() {
        let watcher = watcher_with(vec![entry(Outcome::WhiteWin, "new", "base", "1-0")]);
        let snapshot = watcher.snapshot().unwrap();
        let options = ReportOptions {
            elo_axis_range: -50.0,
            ..ReportOptions::default()
        };

        let text = render_text(&snapshot, &options);

        assert!(text.contains("    1    +50.0"), "trend not clamped:\n{}", text);
        assert!(render_json(&snapshot, &options).is_ok());
    }

    #[test]
    fn test_format_estimate() {
        let finite = EloEstimate {
            elo_diff: 35.24,
            std_error: 12.0,
            los: 99.61,
        };
        assert_eq!(format_estimate(&finite), "+35.2 ± 12.0 (LOS 99.6%)");

        let top = match_stats::estimate(&MatchOutcomeTally::new(3, 0, 0), 3);
        assert_eq!(format_estimate(&top), "+inf (LOS 100.0%)");

        let bottom = match_stats::estimate(&MatchOutcomeTally::new(0, 3, 0), 3);
        assert_eq!(format_estimate(&bottom), "-inf (LOS 0.0%)");
    }

    #[test]
    fn test_console_line() {
        let line = console_line(7, &entry(Outcome::BlackWin, "x", "y", "0-1"));
        assert_eq!(line, "Game 7: x vs y -> 0-1 (adjudication)");

        let mut plain = entry(Outcome::Unknown, "x", "y", "*");
        plain.termination = None;
        assert_eq!(console_line(1, &plain), "Game 1: x vs y -> * (-)");
    }

    #[test]
    fn test_waiting_message_names_file() {
        let message = waiting_message(Path::new("results.pgn"));
        assert!(message.contains("results.pgn"));
    }

    #[test]
    fn test_render_text_summary() {
        let watcher = watcher_with(vec![
            entry(Outcome::WhiteWin, "new", "base", "1-0"),
            entry(Outcome::Draw, "base", "new", "1/2-1/2"),
        ]);
        let snapshot = watcher.snapshot().unwrap();

        let text = render_text(&snapshot, &ReportOptions::default());

        assert!(text.contains("Match: new vs base"));
        assert!(text.contains("Games played: 2"));
        assert!(text.contains("new wins: 1"));
        assert!(text.contains("base wins: 0"));
        assert!(text.contains("Draws: 1"));
        assert!(text.contains("Game 2: base vs new -> 1/2-1/2 (adjudication)"));
        // The first point is +inf and must be clamped.
        assert!(text.contains("    1   +100.0"), "trend not clamped:\n{}", text);
    }

    #[test]
    fn test_render_text_limits_console_lines() {
        let entries: Vec<ResultEntry> = (0..5)
            .map(|_| entry(Outcome::Draw, "a", "b", "1/2-1/2"))
            .collect();
        let watcher = watcher_with(entries);
        let snapshot = watcher.snapshot().unwrap();
        let options = ReportOptions {
            console_lines: 2,
            ..ReportOptions::default()
        };

        let text = render_text(&snapshot, &options);

        assert!(!text.contains("Game 3:"));
        assert!(text.contains("Game 4:"));
        assert!(text.contains("Game 5:"));
    }

    #[test]
    fn test_render_json_marks_unbounded_estimate() {
        let watcher = watcher_with(vec![entry(Outcome::WhiteWin, "new", "base", "1-0")]);
        let snapshot = watcher.snapshot().unwrap();

        let json = render_json(&snapshot, &ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["engine_a"], "new");
        assert_eq!(value["games"], 1);
        assert_eq!(value["wins_a"], 1);
        assert_eq!(value["wins_b"], 0);
        assert_eq!(value["draws"], 0);
        assert!(value["estimate"]["elo_diff"].is_null());
        assert_eq!(value["estimate"]["elo_bound"], "+inf");
        assert_eq!(value["estimate"]["los"], 100.0);
        assert_eq!(value["trend"][0]["elo"], 100.0);
        assert_eq!(value["latest_games"][0]["result"], "1-0");
        assert_eq!(value["latest_games"][0]["outcome"], "white_win");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_render_json_finite_estimate_has_no_bound() {
        let mut watcher = ResultsWatcher::new("results.pgn", Some(Matchup::new("new", "base")));
        watcher.update(vec![
            entry(Outcome::WhiteWin, "new", "base", "1-0"),
            entry(Outcome::WhiteWin, "base", "new", "1-0"),
            entry(Outcome::Draw, "new", "base", "1/2-1/2"),
        ]);
        let snapshot = watcher.snapshot().unwrap();

        let json = render_json(&snapshot, &ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["estimate"]["elo_diff"], 0.0);
        assert!(value["estimate"].get("elo_bound").is_none());
    }
}
