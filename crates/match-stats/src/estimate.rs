//! Elo difference and likelihood of superiority from a match tally.
//!
//! The estimate uses the logistic Elo model: a score `s` in `(0, 1)` maps to
//! `-400 * log10(1/s - 1)` Elo. The standard error comes from the normal
//! approximation of the score, and the likelihood of superiority (LOS) is
//! the probability under that approximation that the true difference is
//! positive.

use std::f64::consts::{LN_10, SQRT_2};

use crate::tally::MatchOutcomeTally;

/// Elo difference of contestant A over contestant B with its uncertainty.
///
/// `elo_diff` is `+inf` when A scored every point and `-inf` when A scored
/// none. Consumers that plot the value must substitute a display bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloEstimate {
    /// Estimated Elo difference (A minus B).
    pub elo_diff: f64,
    /// Standard error of `elo_diff`, in Elo. Never negative.
    pub std_error: f64,
    /// Likelihood of superiority of A, in percent.
    pub los: f64,
}

impl EloEstimate {
    /// The estimate for an empty match.
    pub const NO_INFORMATION: Self = Self {
        elo_diff: 0.0,
        std_error: 0.0,
        los: 50.0,
    };

    /// Returns true when `elo_diff` is a finite number.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.elo_diff.is_finite()
    }
}

impl Default for EloEstimate {
    fn default() -> Self {
        Self::NO_INFORMATION
    }
}

/// Estimates the Elo difference of A over B.
///
/// `total_games` is the number of games in the prefix the tally was taken
/// over, unknown results included. The score is divided by that total rather
/// than by the number of decided games, so unknown results pull the score
/// down. This keeps the numbers identical to the dashboards already in use.
///
/// Every input has a defined result:
/// - no games: [`EloEstimate::NO_INFORMATION`]
/// - score of 0: `-inf` Elo, LOS 0
/// - score of 1: `+inf` Elo, LOS 100
///
/// # Example
///
/// ```
/// use match_stats::{estimate, MatchOutcomeTally};
///
/// let result = estimate(&MatchOutcomeTally::new(6, 2, 2), 10);
/// assert!((result.elo_diff - 147.19).abs() < 0.1);
/// assert!(result.los > 50.0 && result.los < 100.0);
/// ```
#[must_use]
pub fn estimate(tally: &MatchOutcomeTally, total_games: usize) -> EloEstimate {
    if total_games == 0 {
        return EloEstimate::NO_INFORMATION;
    }

    let games = total_games as f64;
    let score = (tally.wins_a as f64 + 0.5 * tally.draws as f64) / games;

    if score <= 0.0 {
        return EloEstimate {
            elo_diff: f64::NEG_INFINITY,
            std_error: 0.0,
            los: 0.0,
        };
    }
    if score >= 1.0 {
        return EloEstimate {
            elo_diff: f64::INFINITY,
            std_error: 0.0,
            los: 100.0,
        };
    }

    let elo_diff = -400.0 * (1.0 / score - 1.0).log10();
    let std_error = (400.0 / LN_10) * (score * (1.0 - score) / games).sqrt();
    let los = if std_error > 0.0 {
        50.0 * (1.0 + libm::erf(elo_diff / (SQRT_2 * std_error)))
    } else {
        50.0
    };

    EloEstimate {
        elo_diff,
        std_error,
        los,
    }
}
