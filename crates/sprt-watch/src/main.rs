//! SPRT Watch - follows a match runner's results PGN and prints live Elo.
//!
//! Reports go to stdout, logs go to stderr. Set `RUST_LOG` to change the log
//! level (default `info`).

use clap::{Args, Parser, Subcommand};
use match_stats::{estimate, series, tally, GameRecord, SeriesPoint};
use sprt_watch::config::WatchConfig;
use sprt_watch::pgn::read_results_file;
use sprt_watch::report::{self, ReportOptions};
use sprt_watch::watcher::{MatchSnapshot, Matchup, ResultsWatcher};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sprt-watch")]
#[command(about = "Live Elo and LOS for engine-vs-engine test runs")]
struct Cli {
    /// Configuration file (defaults to ./sprt-watch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the results file and print a report whenever games are added
    Watch {
        #[command(flatten)]
        report: ReportArgs,
        /// Refresh interval in milliseconds
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Print a single report for the current results file
    Summary {
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Results PGN written by the match runner
    #[arg(long)]
    pgn: Option<PathBuf>,
    /// Engine whose Elo advantage is reported
    #[arg(long, requires = "engine_b")]
    engine_a: Option<String>,
    /// Baseline engine
    #[arg(long, requires = "engine_a")]
    engine_b: Option<String>,
    /// Number of recent games and trend points to list
    #[arg(long)]
    lines: Option<usize>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl ReportArgs {
    fn apply(&self, config: &mut WatchConfig) {
        if let Some(pgn) = &self.pgn {
            config.pgn_path = pgn.clone();
        }
        if self.engine_a.is_some() {
            config.engine_a = self.engine_a.clone();
            config.engine_b = self.engine_b.clone();
        }
        if let Some(lines) = self.lines {
            config.console_lines = lines;
        }
    }
}

fn print_snapshot(snapshot: &MatchSnapshot<'_>, options: &ReportOptions, json: bool) {
    if json {
        match report::render_json(snapshot, options) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to render JSON report: {}", e),
        }
    } else {
        println!("{}", report::render_text(snapshot, options));
    }
}

fn run_summary(config: &WatchConfig, json: bool) -> anyhow::Result<()> {
    let entries = read_results_file(&config.pgn_path)?;
    if entries.is_empty() {
        println!("{}", report::waiting_message(&config.pgn_path));
        return Ok(());
    }

    let records: Vec<GameRecord> = entries.iter().map(|e| e.record.clone()).collect();
    let matchup = match config.matchup()? {
        Some(matchup) => matchup,
        None => Matchup::from_record(&records[0]),
    };

    let counts = tally(&records, &matchup.a, &matchup.b);
    let points: Vec<SeriesPoint> = series(&records, &matchup.a, &matchup.b).collect();
    let snapshot = MatchSnapshot {
        matchup: &matchup,
        entries: &entries,
        tally: counts,
        estimate: estimate(&counts, records.len()),
        series: &points,
    };

    print_snapshot(&snapshot, &ReportOptions::from(config), json);
    Ok(())
}

async fn run_watch(config: &WatchConfig, json: bool) -> anyhow::Result<()> {
    let options = ReportOptions::from(config);
    let mut watcher = ResultsWatcher::new(&config.pgn_path, config.matchup()?);
    let mut ticker = tokio::time::interval(Duration::from_millis(config.refresh_ms));
    let mut announced_wait = false;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!("Watching {:?} every {}ms", watcher.path(), config.refresh_ms);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for ctrl+c: {}", e);
                }
                tracing::info!("Shutdown signal received");
                break;
            }
        }

        let outcome = match watcher.refresh() {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to read results: {}", e);
                continue;
            }
        };

        match watcher.snapshot() {
            Some(snapshot) if outcome.changed() => {
                announced_wait = false;
                print_snapshot(&snapshot, &options, json);
            }
            Some(_) => {}
            None if !announced_wait => {
                announced_wait = true;
                println!("{}", report::waiting_message(watcher.path()));
            }
            None => {}
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => WatchConfig::load_from(path)?,
        None => WatchConfig::load()?,
    };

    match cli.command {
        Commands::Watch { report: args, interval } => {
            args.apply(&mut config);
            if let Some(interval) = interval {
                config.refresh_ms = interval;
            }
            config.validate()?;
            run_watch(&config, args.json).await
        }
        Commands::Summary { report: args } => {
            args.apply(&mut config);
            config.validate()?;
            run_summary(&config, args.json)
        }
    }
}
