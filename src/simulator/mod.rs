//! Schedule Simulator (spec §4.3): pure functions mapping a chromosome and
//! its immutable model to a dated schedule plus named raw objective
//! accumulators. No shared mutable state — safe to call concurrently from
//! any number of worker threads (spec §9 "simulator as pure function").
mod fifo;
pub mod multi_suite;
pub mod simple;

pub use multi_suite::simulate_multi_suite;
pub use simple::simulate_simple;

use crate::objective::RawMetrics;
use crate::schedule::{Campaign, Batch, ProductSeries, Task};

/// Everything a simulation run produces, before objectives/constraints are
/// applied by [`crate::objective::Evaluator`].
#[derive(Clone, Debug)]
pub struct SimOutput {
    pub campaigns: Vec<Campaign>,
    pub batches: Vec<Batch>,
    pub tasks: Vec<Task>,
    pub series: Vec<ProductSeries>,
    pub raw: RawMetrics,
}
