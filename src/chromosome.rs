//! The chromosome: a variable-length sequence of campaign genes plus the
//! bookkeeping the strategy loop needs to avoid re-simulating unchanged
//! individuals (spec §3 "Chromosome", grounded on the teacher's
//! `Vector<T: Allele>` chromosome: genes + fitness_score + age + reference_id).
use crate::gene::Variant;
use crate::objective::Fitness;

/// One candidate schedule: an ordered list of campaigns plus cached fitness.
///
/// `reference_id` is a monotonically increasing identity assigned at birth,
/// used to detect "this is the same individual across generations" for
/// reporting purposes; it plays no role in simulation or selection.
#[derive(Clone, Debug)]
pub struct Chromosome<V: Variant> {
    pub genes: Vec<V::Gene>,
    pub fitness: Option<Fitness>,
    pub feasible: bool,
    pub age: usize,
    pub reference_id: usize,
}

impl<V: Variant> Chromosome<V> {
    pub fn new(genes: Vec<V::Gene>, reference_id: usize) -> Self {
        Self {
            genes,
            fitness: None,
            feasible: true,
            age: 0,
            reference_id,
        }
    }

    pub fn length(&self) -> usize {
        self.genes.len()
    }

    pub fn gene_at(&self, index: usize) -> &V::Gene {
        &self.genes[index]
    }

    pub fn gene_at_mut(&mut self, index: usize) -> &mut V::Gene {
        &mut self.genes[index]
    }

    /// Invalidates the cached fitness; called whenever the genes change.
    pub fn reset_fitness(&mut self) {
        self.fitness = None;
        self.feasible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Simple, SimpleGene};

    #[test]
    fn reset_fitness_clears_cache() {
        let mut c: Chromosome<Simple> = Chromosome::new(
            vec![SimpleGene {
                product_id: 0,
                num_batches: 3,
            }],
            0,
        );
        c.fitness = Some(Fitness {
            objectives: vec![1.0],
            violation: 0.0,
        });
        c.reset_fitness();
        assert!(c.fitness.is_none());
        assert!(c.feasible);
    }
}
