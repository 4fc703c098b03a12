//! One-point crossover (spec §4.2): exchanges tails between two parents,
//! clipping the result at a hard length cap.
use rand::Rng;

use crate::chromosome::Chromosome;
use crate::gene::Variant;

/// Produces two offspring from `parent_a`/`parent_b` by swapping gene tails
/// past an independently chosen cut point in each parent. Offspring longer
/// than `l_max` are clipped. Parents shorter than 2 genes cannot be cut and
/// are returned unchanged (still fresh individuals, with their own
/// `reference_id`).
pub fn one_point_crossover<V: Variant, R: Rng>(
    parent_a: &Chromosome<V>,
    parent_b: &Chromosome<V>,
    l_max: usize,
    next_reference_id: &mut dyn FnMut() -> usize,
    rng: &mut R,
) -> (Chromosome<V>, Chromosome<V>) {
    if parent_a.length() < 2 || parent_b.length() < 2 {
        let mut a = parent_a.clone();
        let mut b = parent_b.clone();
        a.reference_id = next_reference_id();
        b.reference_id = next_reference_id();
        a.age = 0;
        b.age = 0;
        return (a, b);
    }

    let cut_a = rng.gen_range(1..parent_a.length());
    let cut_b = rng.gen_range(1..parent_b.length());

    let mut child_a_genes = parent_a.genes[..cut_a].to_vec();
    child_a_genes.extend_from_slice(&parent_b.genes[cut_b..]);
    child_a_genes.truncate(l_max.max(1));

    let mut child_b_genes = parent_b.genes[..cut_b].to_vec();
    child_b_genes.extend_from_slice(&parent_a.genes[cut_a..]);
    child_b_genes.truncate(l_max.max(1));

    (
        Chromosome::new(child_a_genes, next_reference_id()),
        Chromosome::new(child_b_genes, next_reference_id()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Simple, SimpleGene};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn gene(product_id: usize) -> SimpleGene {
        SimpleGene {
            product_id,
            num_batches: 1,
        }
    }

    #[test]
    fn offspring_are_clipped_to_l_max() {
        let a: Chromosome<Simple> = Chromosome::new(vec![gene(0); 5], 0);
        let b: Chromosome<Simple> = Chromosome::new(vec![gene(1); 5], 1);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counter = 2usize;
        let mut next = || {
            counter += 1;
            counter
        };
        let (child_a, child_b) = one_point_crossover(&a, &b, 3, &mut next, &mut rng);
        assert!(child_a.length() <= 3);
        assert!(child_b.length() <= 3);
    }

    #[test]
    fn short_parents_are_returned_unchanged() {
        let a: Chromosome<Simple> = Chromosome::new(vec![gene(0)], 0);
        let b: Chromosome<Simple> = Chromosome::new(vec![gene(1); 4], 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut counter = 1usize;
        let mut next = || {
            counter += 1;
            counter
        };
        let (child_a, child_b) = one_point_crossover(&a, &b, 10, &mut next, &mut rng);
        assert_eq!(child_a.genes, a.genes);
        assert_eq!(child_b.genes, b.genes);
    }
}
