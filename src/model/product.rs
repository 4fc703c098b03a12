//! Immutable per-product parameters, one struct per facility model (spec §3).
//!
//! Both structs derive `serde::Deserialize` so a host can decode them
//! straight out of a CSV/dataframe row without this crate growing a parsing
//! dependency of its own (SPEC_FULL §3).
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SimpleProduct {
    pub label: String,
    pub kg_per_batch: f64,
    pub inoculation_days: i64,
    pub seed_days: i64,
    pub production_days: i64,
    pub dsp_days: i64,
    pub shelf_life_days: i64,
    pub approval_days: i64,
    pub min_batches: u32,
    pub max_batches: u32,
    pub storage_cost_per_kg_day: f64,
    pub backlog_penalty_per_kg: f64,
    pub waste_cost_per_kg: f64,
    pub sale_price_per_kg: f64,
}

impl SimpleProduct {
    /// Total upstream processing time for one batch: inoculation, seed and
    /// production run back to back on the single line (spec §4.3 "USP
    /// finishes at t_usp"). Also the batch-to-batch cycle interval, since
    /// SIMPLE models a single line with no USP/DSP overlap between batches.
    pub fn usp_days(&self) -> i64 {
        self.inoculation_days + self.seed_days + self.production_days
    }
}

impl fmt::Display for SimpleProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MultiSuiteProduct {
    pub label: String,
    pub usp_days: i64,
    pub dsp_days: i64,
    pub kg_per_batch: f64,
    pub shelf_life_days: i64,
    pub storage_cost_per_kg_day: f64,
    pub backlog_penalty_per_kg: f64,
    pub waste_cost_per_kg: f64,
    pub sale_price_per_kg: f64,
    pub min_batches: u32,
    pub max_batches: u32,
}

impl fmt::Display for MultiSuiteProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
