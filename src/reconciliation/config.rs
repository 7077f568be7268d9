//! Matching configuration: weights, tolerances and thresholds

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{ReconError, ReconResult};

/// Default weight applied to the textual similarity component
pub const DEFAULT_TEXT_WEIGHT: f64 = 0.7;
/// Default bonus awarded when amounts agree within tolerance
pub const DEFAULT_AMOUNT_BONUS: f64 = 90.0;
/// Default bonus awarded when dates agree within tolerance
pub const DEFAULT_DATE_BONUS: f64 = 40.0;
/// Default composite score a candidate pair must reach to be matched
pub const DEFAULT_MATCH_THRESHOLD: f64 = 85.0;
/// Default date tolerance in days (inclusive)
pub const DEFAULT_DATE_TOLERANCE_DAYS: i64 = 2;
/// Default cap on records per input side
pub const DEFAULT_MAX_BATCH_RECORDS: usize = 50_000;

/// Tunable parameters for the composite scorer and matcher
///
/// All knobs are externally settable (see [`MatchConfig::from_env`]) so the
/// host service can adjust matching behavior without code changes. Validated
/// once per run, before any matching begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Multiplier applied to the `[0, 100]` textual similarity
    pub text_weight: f64,
    /// Maximum amount deviation (exclusive) that still earns the amount bonus
    pub amount_tolerance: BigDecimal,
    /// Maximum date deviation in days (inclusive) that still earns the date bonus
    pub date_tolerance_days: i64,
    /// Score added when amounts agree within tolerance
    pub amount_bonus: f64,
    /// Score added when dates agree within tolerance
    pub date_bonus: f64,
    /// Minimum composite score for a pair to be considered matched
    pub match_threshold: f64,
    /// Maximum number of records accepted on either input side
    pub max_batch_records: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            text_weight: DEFAULT_TEXT_WEIGHT,
            amount_tolerance: BigDecimal::from(1),
            date_tolerance_days: DEFAULT_DATE_TOLERANCE_DAYS,
            amount_bonus: DEFAULT_AMOUNT_BONUS,
            date_bonus: DEFAULT_DATE_BONUS,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            max_batch_records: DEFAULT_MAX_BATCH_RECORDS,
        }
    }
}

impl MatchConfig {
    /// Highest composite score this configuration can produce
    ///
    /// Full textual similarity (100) weighted by `text_weight`, plus both
    /// bonuses. The match threshold must fall within `[0, max]`.
    pub fn max_possible_score(&self) -> f64 {
        self.text_weight * 100.0 + self.amount_bonus + self.date_bonus
    }

    /// Validate the configuration, failing fast before any matching begins
    pub fn validate(&self) -> ReconResult<()> {
        if !self.text_weight.is_finite() || self.text_weight < 0.0 {
            return Err(ReconError::Configuration(format!(
                "text_weight must be a non-negative number, got {}",
                self.text_weight
            )));
        }

        if self.amount_tolerance < BigDecimal::from(0) {
            return Err(ReconError::Configuration(format!(
                "amount_tolerance must be non-negative, got {}",
                self.amount_tolerance
            )));
        }

        if self.date_tolerance_days < 0 {
            return Err(ReconError::Configuration(format!(
                "date_tolerance_days must be non-negative, got {}",
                self.date_tolerance_days
            )));
        }

        if !self.amount_bonus.is_finite() || self.amount_bonus < 0.0 {
            return Err(ReconError::Configuration(format!(
                "amount_bonus must be a non-negative number, got {}",
                self.amount_bonus
            )));
        }

        if !self.date_bonus.is_finite() || self.date_bonus < 0.0 {
            return Err(ReconError::Configuration(format!(
                "date_bonus must be a non-negative number, got {}",
                self.date_bonus
            )));
        }

        let max = self.max_possible_score();
        if !self.match_threshold.is_finite()
            || self.match_threshold < 0.0
            || self.match_threshold > max
        {
            return Err(ReconError::Configuration(format!(
                "match_threshold must be within [0, {}], got {}",
                max, self.match_threshold
            )));
        }

        if self.max_batch_records == 0 {
            return Err(ReconError::Configuration(
                "max_batch_records must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a configuration from `RECON_*` environment variables
    ///
    /// Unset variables keep their defaults; set but unparseable values are a
    /// configuration error. Recognized variables:
    /// `RECON_TEXT_WEIGHT`, `RECON_AMOUNT_TOLERANCE`,
    /// `RECON_DATE_TOLERANCE_DAYS`, `RECON_AMOUNT_BONUS`, `RECON_DATE_BONUS`,
    /// `RECON_MATCH_THRESHOLD`, `RECON_MAX_BATCH_RECORDS`.
    pub fn from_env() -> ReconResult<Self> {
        let mut config = Self::default();

        if let Some(value) = read_env("RECON_TEXT_WEIGHT")? {
            config.text_weight = value;
        }
        if let Some(value) = read_env("RECON_AMOUNT_TOLERANCE")? {
            config.amount_tolerance = value;
        }
        if let Some(value) = read_env("RECON_DATE_TOLERANCE_DAYS")? {
            config.date_tolerance_days = value;
        }
        if let Some(value) = read_env("RECON_AMOUNT_BONUS")? {
            config.amount_bonus = value;
        }
        if let Some(value) = read_env("RECON_DATE_BONUS")? {
            config.date_bonus = value;
        }
        if let Some(value) = read_env("RECON_MATCH_THRESHOLD")? {
            config.match_threshold = value;
        }
        if let Some(value) = read_env("RECON_MAX_BATCH_RECORDS")? {
            config.max_batch_records = value;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Read and parse one environment variable, `None` when unset
fn read_env<T: std::str::FromStr>(name: &str) -> ReconResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ReconError::Configuration(format!("{} has unparseable value '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}
