//! Biopharmaceutical capacity planning and scheduling: searches production
//! sequences for a single manufacturing site under two facility models
//! (SIMPLE: one production line; MULTI-SUITE: separate upstream/downstream
//! suite pools) using an NSGA-II-style multi-objective genetic algorithm
//! whose fitness function is a deterministic discrete-event simulation of
//! the production line.
//!
//! # Quick usage
//!
//! ```no_run
//! use biopharma_scheduling::{fit_simple, GaConfig};
//! use biopharma_scheduling::objective::{Direction, ObjectiveSpec};
//! use chrono::NaiveDate;
//!
//! let config = GaConfig::builder()
//!     .popsize(100)
//!     .num_gens(100)
//!     .num_runs(20)
//!     .random_state(7)
//!     .build()
//!     .unwrap();
//!
//! let objectives = vec![ObjectiveSpec {
//!     name: "total_kg_throughput".to_string(),
//!     direction: Direction::Maximise,
//! }];
//!
//! let model = fit_simple(
//!     NaiveDate::from_ymd_opt(2016, 12, 1).unwrap(),
//!     objectives,
//!     vec![],
//!     vec![],
//!     vec![],
//!     vec![],
//!     vec![],
//!     config,
//! );
//! ```
pub mod calendar;
pub mod chromosome;
pub mod error;
pub mod evolve;
pub mod fit;
pub mod ga_config;
pub mod gene;
pub mod model;
pub mod nsga2;
pub mod objective;
pub mod orchestrator;
pub mod population;
pub mod rng;
pub mod schedule;
pub mod simulator;
pub mod variation;

pub use chromosome::Chromosome;
pub use error::{ConfigError, Error};
pub use fit::{create_schedule_multi_suite, create_schedule_simple, fit_multi_suite, fit_simple};
pub use ga_config::{GaConfig, GaConfigBuilder};
pub use gene::{MultiSuite, MultiSuiteGene, Simple, SimpleGene, Variant};
pub use model::{
    build_multi_suite_model, build_simple_model, ChangeoverRow, MultiSuiteModel, MultiSuiteProduct,
    PeriodRow, SimpleModel, SimpleProduct,
};
pub use objective::{ConstraintSpec, Direction, Evaluator, ObjectiveSpec};
pub use schedule::{Batch, Campaign, Model, ProductSeries, Schedule, Task, TaskKind};
