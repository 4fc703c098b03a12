//! NSGA-II Core (spec §4.5): non-dominated sorting, crowding distance,
//! binary tournament selection and (μ+μ) elitist replacement. Generic over
//! nothing but [`crate::objective::Fitness`] — it never imports gene or
//! model types.
pub mod crowding;
pub mod replacement;
pub mod sort;
pub mod tournament;

pub use crowding::crowding_distance;
pub use replacement::select_next_generation;
pub use sort::{dominates, fast_non_dominated_sort};
pub use tournament::binary_tournament;
