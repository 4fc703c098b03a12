//! Variation Operators (spec §4.2): crossover and mutation, shared across
//! both chromosome variants via [`crate::gene::Variant`].
pub mod crossover;
pub mod mutate;

pub use crossover::one_point_crossover;
pub use mutate::{mutate, MutationRates};
