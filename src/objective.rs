//! Objective / Constraint Evaluator (spec §4.4): turns the simulator's raw,
//! named accumulators into the internally-minimised fitness vector that
//! selection consumes.
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Raw, named accumulators produced by a simulator run (e.g.
/// `total_kg_throughput`, `total_profit`). Keyed by name so the evaluator can
/// be configured without the simulator depending on an enum of objective
/// kinds.
pub type RawMetrics = BTreeMap<String, f64>;

/// Every metric name a simulator may populate. `ObjectiveSpec`/`ConstraintSpec`
/// names are validated against this set at configuration time (spec §7
/// "unknown objective/constraint name" fails loudly before compute).
pub const KNOWN_METRICS: &[&str] = &[
    "total_kg_throughput",
    "total_kg_inventory_deficit",
    "total_kg_backlog",
    "total_kg_waste",
    "total_kg_in_flight",
    "total_profit",
    "total_backlog_penalty",
];

fn check_known(name: &str) -> bool {
    KNOWN_METRICS.contains(&name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximise,
    Minimise,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Maximise => -1.0,
            Direction::Minimise => 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ObjectiveSpec {
    pub name: String,
    pub direction: Direction,
}

#[derive(Clone, Debug)]
pub struct ConstraintSpec {
    pub name: String,
    pub direction: Direction,
    pub bound: f64,
}

/// Fitness as consumed by NSGA-II: objectives are all-minimise, and
/// `violation` is the summed constraint overshoot (0 ⇒ feasible).
#[derive(Clone, Debug, PartialEq)]
pub struct Fitness {
    pub objectives: Vec<f64>,
    pub violation: f64,
}

impl Fitness {
    pub fn feasible(&self) -> bool {
        self.violation <= 0.0
    }
}

/// Raised when a raw accumulator is NaN/infinite (spec §7 `NumericError`).
/// Not part of [`crate::error::Error`]: the caller degrades the offending
/// individual to worst-possible fitness and continues, it never aborts a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericError;

#[derive(Clone, Debug)]
pub struct Evaluator {
    objectives: Vec<ObjectiveSpec>,
    constraints: Vec<ConstraintSpec>,
}

impl Evaluator {
    pub fn new(
        objectives: Vec<ObjectiveSpec>,
        constraints: Vec<ConstraintSpec>,
    ) -> Result<Self, ConfigError> {
        if objectives.is_empty() {
            return Err(ConfigError::EmptyObjectives);
        }
        for o in &objectives {
            if !check_known(&o.name) {
                return Err(ConfigError::UnknownObjective(o.name.clone()));
            }
        }
        for c in &constraints {
            if !check_known(&c.name) {
                return Err(ConfigError::UnknownConstraint(c.name.clone()));
            }
        }
        Ok(Self {
            objectives,
            constraints,
        })
    }

    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn objective_names(&self) -> impl Iterator<Item = &str> {
        self.objectives.iter().map(|o| o.name.as_str())
    }

    /// Converts raw simulator accumulators into an internal fitness vector.
    /// `Err(NumericError)` signals the caller should flag the individual
    /// infeasible with the worst possible fitness rather than abort the run.
    pub fn evaluate(&self, raw: &RawMetrics) -> Result<Fitness, NumericError> {
        let mut objectives = Vec::with_capacity(self.objectives.len());
        for o in &self.objectives {
            let value = raw.get(o.name.as_str()).copied().unwrap_or(0.0);
            if !value.is_finite() {
                return Err(NumericError);
            }
            objectives.push(value * o.direction.sign());
        }

        let mut violation = 0.0;
        for c in &self.constraints {
            let raw_value = raw.get(c.name.as_str()).copied().unwrap_or(0.0);
            if !raw_value.is_finite() {
                return Err(NumericError);
            }
            let directed = raw_value * c.direction.sign();
            violation += (directed - c.bound).max(0.0);
        }

        Ok(Fitness {
            objectives,
            violation,
        })
    }

    /// The fitness assigned to an individual whose simulation raised a
    /// `NumericError`: maximally infeasible, worst in every objective.
    pub fn worst_fitness(&self) -> Fitness {
        Fitness {
            objectives: vec![f64::MAX; self.objectives.len()],
            violation: f64::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, f64)]) -> RawMetrics {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn maximise_objective_is_negated_for_internal_minimisation() {
        let eval = Evaluator::new(
            vec![ObjectiveSpec {
                name: "total_kg_throughput".to_string(),
                direction: Direction::Maximise,
            }],
            vec![],
        )
        .unwrap();
        let fitness = eval.evaluate(&raw(&[("total_kg_throughput", 100.0)])).unwrap();
        assert_eq!(fitness.objectives, vec![-100.0]);
    }

    #[test]
    fn constraint_violation_accumulates_overshoot_only() {
        let eval = Evaluator::new(
            vec![ObjectiveSpec {
                name: "total_kg_throughput".to_string(),
                direction: Direction::Maximise,
            }],
            vec![ConstraintSpec {
                name: "total_kg_waste".to_string(),
                direction: Direction::Minimise,
                bound: 10.0,
            }],
        )
        .unwrap();
        let under = eval
            .evaluate(&raw(&[("total_kg_throughput", 1.0), ("total_kg_waste", 5.0)]))
            .unwrap();
        assert_eq!(under.violation, 0.0);
        assert!(under.feasible());

        let over = eval
            .evaluate(&raw(&[("total_kg_throughput", 1.0), ("total_kg_waste", 15.0)]))
            .unwrap();
        assert_eq!(over.violation, 5.0);
        assert!(!over.feasible());
    }

    #[test]
    fn non_finite_raw_value_is_a_numeric_error() {
        let eval = Evaluator::new(
            vec![ObjectiveSpec {
                name: "total_profit".to_string(),
                direction: Direction::Maximise,
            }],
            vec![],
        )
        .unwrap();
        let err = eval
            .evaluate(&raw(&[("total_profit", f64::NAN)]))
            .unwrap_err();
        assert_eq!(err, NumericError);
    }

    #[test]
    fn unknown_objective_name_is_rejected_at_construction() {
        let err = Evaluator::new(
            vec![ObjectiveSpec {
                name: "total_kg_fizzbuzz".to_string(),
                direction: Direction::Maximise,
            }],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownObjective(_)));
    }
}
