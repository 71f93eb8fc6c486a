//! End-to-end tests: a results file grows on disk while the watcher follows it.

use match_stats::{series, tally, GameRecord, MatchOutcomeTally, Outcome};
use sprt_watch::report::{render_text, ReportOptions};
use sprt_watch::watcher::{Matchup, RefreshOutcome, ResultsWatcher};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

fn game(white: &str, black: &str, result: &str, moves: &str) -> String {
    format!(
        "[Event \"SPRT\"]\n[White \"{}\"]\n[Black \"{}\"]\n[Result \"{}\"]\n\n{} {}\n\n",
        white, black, result, moves, result
    )
}

fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("Failed to open results file");
    file.write_all(text.as_bytes())
        .expect("Failed to append to results file");
}

#[test]
fn test_watcher_follows_growing_results_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.pgn");
    let mut watcher = ResultsWatcher::new(&path, None);

    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Waiting);

    append(&path, &game("dev", "base", "1-0", "1. e4 e5 2. Qh5 Nc6"));
    append(&path, &game("base", "dev", "1/2-1/2", "1. d4 d5"));
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Rebuilt(2));

    // A game that is only half written is not picked up yet.
    append(&path, "[Event \"SPRT\"]\n[White \"dev\"]\n[Black \"base\"]\n");
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Appended(0));

    append(&path, "[Result \"0-1\"]\n\n1. f3 e5 2. g4 Qh4# 0-1\n\n");
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Appended(1));

    append(&path, &game("dev", "base", "*", "1. c4"));
    append(&path, &game("base", "dev", "0-1", "1. e4 c5"));
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Appended(2));

    let snapshot = watcher.snapshot().unwrap();
    assert_eq!(snapshot.matchup, &Matchup::new("dev", "base"));
    assert_eq!(snapshot.entries.len(), 5);
    assert_eq!(snapshot.tally, MatchOutcomeTally::new(2, 1, 1));

    // The incrementally built series must equal a from-scratch computation.
    let records: Vec<GameRecord> = snapshot.entries.iter().map(|e| e.record.clone()).collect();
    assert_eq!(records[3].outcome, Outcome::Unknown);
    let expected: Vec<_> = series(&records, "dev", "base").collect();
    assert_eq!(snapshot.series, expected.as_slice());
    assert_eq!(snapshot.tally, tally(&records, "dev", "base"));

    // Unknown results stay in the denominator: (2 + 0.5) / 5.
    let score = 2.5 / 5.0_f64;
    let expected_elo = -400.0 * (1.0 / score - 1.0).log10();
    assert!((snapshot.estimate.elo_diff - expected_elo).abs() < 1e-9);

    let text = render_text(&snapshot, &ReportOptions::default());
    assert!(text.contains("Games played: 5"));
    assert!(text.contains("Game 4: dev vs base -> * (-)"));
    assert!(text.contains("Game 5: base vs dev -> 0-1 (-)"));
}

#[test]
fn test_watcher_rebuilds_after_results_file_is_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.pgn");
    let mut watcher = ResultsWatcher::new(&path, Some(Matchup::new("dev", "base")));

    append(&path, &game("dev", "base", "1-0", "1. e4"));
    append(&path, &game("base", "dev", "1-0", "1. e4"));
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Rebuilt(2));

    // A new run truncates the file.
    std::fs::write(&path, "").unwrap();
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Waiting);
    assert!(watcher.snapshot().is_none());

    append(&path, &game("base", "dev", "0-1", "1. d4"));
    assert_eq!(watcher.refresh().unwrap(), RefreshOutcome::Rebuilt(1));

    let snapshot = watcher.snapshot().unwrap();
    assert_eq!(snapshot.tally, MatchOutcomeTally::new(1, 0, 0));
    assert_eq!(snapshot.estimate.elo_diff, f64::INFINITY);
}
