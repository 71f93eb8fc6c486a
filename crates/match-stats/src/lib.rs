//! Match statistics for engine-vs-engine testing.
//!
//! This crate turns an ordered list of finished games between two contestants
//! into the numbers an SPRT session is judged by:
//! - [`tally`] counts wins for each contestant and draws
//! - [`estimate`] converts a tally into an Elo difference, its standard error
//!   and the likelihood of superiority
//! - [`series`] yields one estimate per game prefix for trend display
//! - [`RunningTally`] keeps the counters up to date one game at a time
//!
//! Every function here is pure. Callers pass the contestant names and a
//! snapshot of the games on each call.

mod estimate;
mod record;
mod running;
mod series;
mod tally;

pub use estimate::{estimate, EloEstimate};
pub use record::{GameRecord, Outcome};
pub use running::RunningTally;
pub use series::{series, Series, SeriesPoint};
pub use tally::{tally, MatchOutcomeTally};
