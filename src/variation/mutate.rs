//! The five mutation operators (spec §4.2), applied independently to every
//! gene in the fixed order the spec lists them in.
use rand::Rng;

use crate::chromosome::Chromosome;
use crate::gene::Variant;

#[derive(Clone, Copy, Debug)]
pub struct MutationRates {
    pub p_product_mut: f64,
    pub p_usp_suite_mut: f64,
    pub p_plus_batch_mut: f64,
    pub p_minus_batch_mut: f64,
    pub p_gene_swap: f64,
}

/// Mutates `chromosome` in place. `model` supplies legal batch ranges and
/// (for MULTI-SUITE) suite counts for the reseed operators.
pub fn mutate<V: Variant, R: Rng>(
    chromosome: &mut Chromosome<V>,
    model: &V::Model,
    rates: MutationRates,
    rng: &mut R,
) {
    let mut i = 0;
    while i < chromosome.length() {
        let mut deleted = false;
        {
            let num_products = V::num_products(model);
            let gene = chromosome.gene_at_mut(i);

            if rng.gen_bool(rates.p_product_mut) {
                let new_product = rng.gen_range(0..num_products);
                V::set_product_id(gene, new_product);
                let (min, max) = V::legal_batch_range(model, new_product);
                V::set_num_batches(gene, rng.gen_range(min..=max));
            }

            V::mutate_extra(gene, model, rates.p_usp_suite_mut, rng);

            let product_id = V::product_id(gene);
            let (min, max) = V::legal_batch_range(model, product_id);
            let num_batches = V::num_batches(gene);

            if rng.gen_bool(rates.p_plus_batch_mut) && num_batches < max {
                V::set_num_batches(gene, num_batches + 1);
            }

            let num_batches = V::num_batches(gene);
            if rng.gen_bool(rates.p_minus_batch_mut) {
                if num_batches > min {
                    V::set_num_batches(gene, num_batches - 1);
                } else if chromosome.length() > 1 {
                    deleted = true;
                }
            }
        }

        if deleted {
            chromosome.genes.remove(i);
        } else {
            i += 1;
        }
    }

    let len = chromosome.length();
    for i in 0..len {
        if len < 2 {
            break;
        }
        if rng.gen_bool(rates.p_gene_swap) {
            let mut j = rng.gen_range(0..len - 1);
            if j >= i {
                j += 1;
            }
            chromosome.genes.swap(i, j);
        }
    }

    chromosome.reset_fitness();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Simple, SimpleGene};
    use crate::model::{build_simple_model, SimpleProduct};
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn model() -> crate::model::SimpleModel {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let product = SimpleProduct {
            label: "A".into(),
            kg_per_batch: 10.0,
            inoculation_days: 1,
            seed_days: 1,
            production_days: 1,
            dsp_days: 1,
            shelf_life_days: 90,
            approval_days: 0,
            min_batches: 2,
            max_batches: 4,
            storage_cost_per_kg_day: 0.0,
            backlog_penalty_per_kg: 0.0,
            waste_cost_per_kg: 0.0,
            sale_price_per_kg: 0.0,
        };
        build_simple_model(start, vec![product], vec![], vec![], vec![]).unwrap()
    }

    #[test]
    fn zero_probability_rates_leave_chromosome_untouched() {
        let model = model();
        let mut c: Chromosome<Simple> = Chromosome::new(
            vec![SimpleGene {
                product_id: 0,
                num_batches: 3,
            }],
            0,
        );
        let before = c.genes.clone();
        let rates = MutationRates {
            p_product_mut: 0.0,
            p_usp_suite_mut: 0.0,
            p_plus_batch_mut: 0.0,
            p_minus_batch_mut: 0.0,
            p_gene_swap: 0.0,
        };
        let mut rng = SmallRng::seed_from_u64(7);
        mutate::<Simple, _>(&mut c, &model, rates, &mut rng);
        assert_eq!(c.genes, before);
    }

    #[test]
    fn single_gene_is_never_deleted_below_minimum_length() {
        let model = model();
        let mut c: Chromosome<Simple> = Chromosome::new(
            vec![SimpleGene {
                product_id: 0,
                num_batches: 2,
            }],
            0,
        );
        let rates = MutationRates {
            p_product_mut: 0.0,
            p_usp_suite_mut: 0.0,
            p_plus_batch_mut: 0.0,
            p_minus_batch_mut: 1.0,
            p_gene_swap: 0.0,
        };
        let mut rng = SmallRng::seed_from_u64(3);
        mutate::<Simple, _>(&mut c, &model, rates, &mut rng);
        assert_eq!(c.length(), 1);
    }
}
