//! Result Adapter types (spec §3 "Schedule", §6 "Output (Model)"): the
//! tabular views a host materialises a selected non-dominated individual
//! into. These types carry no behaviour beyond simple accessors — the hot
//! path (simulator, NSGA-II core) never imports them until a schedule is
//! actually selected for output.
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One contiguous production campaign of a single product.
#[derive(Clone, Debug, PartialEq)]
pub struct Campaign {
    pub product_id: usize,
    pub num_batches: u32,
    pub kg: f64,
    pub start_date: NaiveDate,
    pub first_harvest: NaiveDate,
    pub first_batch_stored: NaiveDate,
    pub last_batch_stored: NaiveDate,
    /// MULTI-SUITE only.
    pub usp_suite: Option<usize>,
    pub dsp_suite: Option<usize>,
    pub end_date: Option<NaiveDate>,
}

/// One production cycle of a fixed kg quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    pub product_id: usize,
    pub kg: f64,
    pub harvested_on: NaiveDate,
    pub stored_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub approved_on: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Inoculation,
    Seed,
    Production,
}

/// Per-batch decomposition into the three upstream phases (SIMPLE variant
/// only; spec §4.3 does not define a task breakdown for MULTI-SUITE).
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub batch_index: usize,
    pub kind: TaskKind,
    pub start: NaiveDate,
    pub finish: NaiveDate,
}

/// Per-product, per-period time series sampled at period boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductSeries {
    pub kg_inventory: Vec<f64>,
    pub kg_backlog: Vec<f64>,
    pub kg_supply: Vec<f64>,
    pub kg_waste: Vec<f64>,
}

/// A single dated schedule: the materialised output of simulating one
/// chromosome, plus the objective values a host displays alongside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    pub campaigns: Vec<Campaign>,
    pub batches: Vec<Batch>,
    pub tasks: Vec<Task>,
    pub series: Vec<ProductSeries>,
    pub objectives: BTreeMap<String, f64>,
    pub feasible: bool,
}

/// The Pareto front returned by `fit`: ordered lexicographically by the
/// first objective (spec §4.6).
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub schedules: Vec<Schedule>,
}
