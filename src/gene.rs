//! Campaign genes, one shape per facility model (spec §3 "Gene").
use rand::Rng;

use crate::model::{MultiSuiteModel, SimpleModel};

/// A gene in the SIMPLE chromosome: one campaign of `num_batches` batches of
/// `product_id` on the single production line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimpleGene {
    pub product_id: usize,
    pub num_batches: u32,
}

/// A gene in the MULTI-SUITE chromosome: additionally pins the campaign to a
/// USP suite (DSP suite assignment is resolved greedily at simulation time,
/// per spec §4.3 and the Open Question resolved in DESIGN.md).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultiSuiteGene {
    pub product_id: usize,
    pub usp_suite_id: usize,
    pub num_batches: u32,
}

/// Shared interface over the two gene/model shapes, so the chromosome,
/// variation operators and NSGA-II core can stay generic over the facility
/// model (spec §9 "tagged variant with a shared interface").
pub trait Variant: Clone + Send + Sync + 'static {
    type Model: Send + Sync;
    type Gene: Clone + Copy + Send + Sync + std::fmt::Debug + PartialEq;

    fn num_products(model: &Self::Model) -> usize;
    fn legal_batch_range(model: &Self::Model, product_id: usize) -> (u32, u32);

    fn random_gene<R: Rng>(model: &Self::Model, rng: &mut R) -> Self::Gene;

    fn product_id(gene: &Self::Gene) -> usize;
    fn set_product_id(gene: &mut Self::Gene, product_id: usize);
    fn num_batches(gene: &Self::Gene) -> u32;
    fn set_num_batches(gene: &mut Self::Gene, num_batches: u32);

    /// Facility-specific mutation beyond product/num_batches (the USP suite
    /// reseed for MULTI-SUITE). No-op for SIMPLE.
    fn mutate_extra<R: Rng>(
        _gene: &mut Self::Gene,
        _model: &Self::Model,
        _p_extra_mut: f64,
        _rng: &mut R,
    ) {
    }
}

#[derive(Clone, Debug)]
pub struct Simple;

impl Variant for Simple {
    type Model = SimpleModel;
    type Gene = SimpleGene;

    fn num_products(model: &Self::Model) -> usize {
        model.num_products()
    }

    fn legal_batch_range(model: &Self::Model, product_id: usize) -> (u32, u32) {
        let p = model.product(product_id);
        (p.min_batches, p.max_batches)
    }

    fn random_gene<R: Rng>(model: &Self::Model, rng: &mut R) -> Self::Gene {
        let product_id = rng.gen_range(0..Self::num_products(model));
        let (min, max) = Self::legal_batch_range(model, product_id);
        SimpleGene {
            product_id,
            num_batches: rng.gen_range(min..=max),
        }
    }

    fn product_id(gene: &Self::Gene) -> usize {
        gene.product_id
    }
    fn set_product_id(gene: &mut Self::Gene, product_id: usize) {
        gene.product_id = product_id;
    }
    fn num_batches(gene: &Self::Gene) -> u32 {
        gene.num_batches
    }
    fn set_num_batches(gene: &mut Self::Gene, num_batches: u32) {
        gene.num_batches = num_batches;
    }
}

#[derive(Clone, Debug)]
pub struct MultiSuite;

impl Variant for MultiSuite {
    type Model = MultiSuiteModel;
    type Gene = MultiSuiteGene;

    fn num_products(model: &Self::Model) -> usize {
        model.num_products()
    }

    fn legal_batch_range(model: &Self::Model, product_id: usize) -> (u32, u32) {
        let p = model.product(product_id);
        (p.min_batches, p.max_batches)
    }

    fn random_gene<R: Rng>(model: &Self::Model, rng: &mut R) -> Self::Gene {
        let product_id = rng.gen_range(0..Self::num_products(model));
        let (min, max) = Self::legal_batch_range(model, product_id);
        MultiSuiteGene {
            product_id,
            usp_suite_id: rng.gen_range(0..model.num_usp_suites),
            num_batches: rng.gen_range(min..=max),
        }
    }

    fn product_id(gene: &Self::Gene) -> usize {
        gene.product_id
    }
    fn set_product_id(gene: &mut Self::Gene, product_id: usize) {
        gene.product_id = product_id;
    }
    fn num_batches(gene: &Self::Gene) -> u32 {
        gene.num_batches
    }
    fn set_num_batches(gene: &mut Self::Gene, num_batches: u32) {
        gene.num_batches = num_batches;
    }

    fn mutate_extra<R: Rng>(
        gene: &mut Self::Gene,
        model: &Self::Model,
        p_usp_suite_mut: f64,
        rng: &mut R,
    ) {
        if rng.gen_bool(p_usp_suite_mut) {
            gene.usp_suite_id = rng.gen_range(0..model.num_usp_suites);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn simple_model() -> SimpleModel {
        crate::model::build_simple_model(
            chrono::NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
            vec![crate::model::SimpleProduct {
                label: "A".into(),
                kg_per_batch: 10.0,
                inoculation_days: 1,
                seed_days: 1,
                production_days: 1,
                dsp_days: 1,
                shelf_life_days: 30,
                approval_days: 1,
                min_batches: 2,
                max_batches: 5,
                storage_cost_per_kg_day: 0.1,
                backlog_penalty_per_kg: 1.0,
                waste_cost_per_kg: 1.0,
                sale_price_per_kg: 10.0,
            }],
            vec![],
            vec![],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn random_gene_respects_legal_batch_range() {
        let model = simple_model();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let gene = Simple::random_gene(&model, &mut rng);
            assert!(gene.num_batches >= 2 && gene.num_batches <= 5);
        }
    }
}
