//! A generation's worth of individuals (grounded on the teacher's
//! `Population` wrapper): owns its chromosomes, reports simple aggregate
//! stats for logging.
use crate::chromosome::Chromosome;
use crate::gene::Variant;

#[derive(Clone, Debug)]
pub struct Population<V: Variant> {
    pub chromosomes: Vec<Chromosome<V>>,
}

impl<V: Variant> Population<V> {
    pub fn new(chromosomes: Vec<Chromosome<V>>) -> Self {
        Self { chromosomes }
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn num_feasible(&self) -> usize {
        self.chromosomes.iter().filter(|c| c.feasible).count()
    }

    /// Mean chromosome length, for generation-report logging.
    pub fn mean_length(&self) -> f64 {
        if self.chromosomes.is_empty() {
            return 0.0;
        }
        let total: usize = self.chromosomes.iter().map(|c| c.length()).sum();
        total as f64 / self.chromosomes.len() as f64
    }

    pub fn best_objective(&self, objective_index: usize) -> Option<f64> {
        self.chromosomes
            .iter()
            .filter_map(|c| c.fitness.as_ref())
            .map(|f| f.objectives[objective_index])
            .fold(None, |acc, v| match acc {
                None => Some(v),
                Some(best) if v < best => Some(v),
                Some(best) => Some(best),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Simple, SimpleGene};
    use crate::objective::Fitness;

    fn chromosome(reference_id: usize, feasible: bool) -> Chromosome<Simple> {
        let mut c = Chromosome::new(
            vec![SimpleGene {
                product_id: 0,
                num_batches: 1,
            }],
            reference_id,
        );
        c.feasible = feasible;
        c.fitness = Some(Fitness {
            objectives: vec![reference_id as f64],
            violation: 0.0,
        });
        c
    }

    #[test]
    fn num_feasible_counts_only_feasible_individuals() {
        let pop = Population::new(vec![
            chromosome(0, true),
            chromosome(1, false),
            chromosome(2, true),
        ]);
        assert_eq!(pop.num_feasible(), 2);
    }

    #[test]
    fn best_objective_picks_the_minimum() {
        let pop = Population::new(vec![chromosome(3, true), chromosome(1, true)]);
        assert_eq!(pop.best_objective(0), Some(1.0));
    }
}
