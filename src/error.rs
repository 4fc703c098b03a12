//! Unified error types for the scheduling crate.
//!
//! Configuration problems are surfaced immediately, before any search starts
//! (spec §7 "configuration errors fail loudly before compute begins").
//! Runtime anomalies are not part of this enum — they degrade a single
//! individual's fitness or flag a schedule as infeasible instead of
//! aborting the run. See [`crate::objective::NumericError`] (non-finite raw
//! accumulator) and the `feasible` flag on [`crate::chromosome::Chromosome`]
//! (constraint violation).
use thiserror::Error;

/// Top level error returned by the `fit` entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The cooperative stop flag was observed before any generation
    /// completed, so there is no archive to return.
    #[error("run was cancelled before any generation completed")]
    Cancelled,
}

/// Problems with the tabular inputs or GA configuration handed to `fit`.
///
/// Each variant names the offending field so a host can report it without
/// this crate depending on any particular tabular/dataframe library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("product table is empty")]
    EmptyProductSet,

    #[error("missing column `{0}` in input table")]
    MissingColumn(String),

    #[error("demand/target periods are not contiguous: gap between period ending {prev} and period ending {next}")]
    NonContiguousPeriods { prev: String, next: String },

    #[error("negative quantity {value} for product `{product}` in period ending {period}")]
    NegativeQuantity {
        product: String,
        period: String,
        value: f64,
    },

    #[error("negative duration `{field}` = {value} for product `{product}`")]
    NegativeDuration {
        product: String,
        field: String,
        value: i64,
    },

    #[error("product `{product}`: min_batches ({min}) > max_batches ({max})")]
    InvalidBatchRange {
        product: String,
        min: u32,
        max: u32,
    },

    #[error("unknown objective name `{0}`")]
    UnknownObjective(String),

    #[error("unknown constraint name `{0}`")]
    UnknownConstraint(String),

    #[error("objective/constraint map must not be empty")]
    EmptyObjectives,

    #[error("changeover matrix references unknown product `{0}`")]
    UnknownProductInChangeover(String),

    #[error("changeover matrix has a non-zero diagonal entry for product `{0}`")]
    NonZeroChangeoverDiagonal(String),

    #[error("`{field}` must be > 0, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("num_usp_suites and num_dsp_suites must both be >= 1")]
    InvalidSuiteCount,

    #[error("`{field}` must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_field_name() {
        let err = ConfigError::UnknownObjective("total_kg_fizzbuzz".to_string());
        assert!(err.to_string().contains("total_kg_fizzbuzz"));
    }

    #[test]
    fn top_level_error_wraps_config_error() {
        let err: Error = ConfigError::EmptyProductSet.into();
        assert!(matches!(err, Error::Config(ConfigError::EmptyProductSet)));
    }
}
