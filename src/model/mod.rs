//! Product & Horizon Model (spec §4.1): immutable tables of product
//! parameters, demand/target series and changeover matrices, frozen for the
//! whole run and freely shared read-only across worker threads.
pub mod builder;
pub mod common;
pub mod multi_suite;
pub mod product;
pub mod simple;

pub use builder::{build_multi_suite_model, build_simple_model, ChangeoverRow, PeriodRow};
pub use multi_suite::MultiSuiteModel;
pub use product::{MultiSuiteProduct, SimpleProduct};
pub use simple::SimpleModel;
