//! Run Orchestrator (spec §4.6): `num_runs` independent evolutions fanned
//! out over a dedicated thread pool, merged into a single Pareto archive.
use std::sync::atomic::AtomicBool;

use rayon::prelude::*;

use crate::chromosome::Chromosome;
use crate::evolve;
use crate::ga_config::GaConfig;
use crate::gene::Variant;
use crate::nsga2::fast_non_dominated_sort;
use crate::objective::Evaluator;
use crate::population::Population;
use crate::rng::rng_for_run;
use crate::simulator::SimOutput;

/// Runs `config.num_runs` independent evolutions in parallel, then reduces
/// the union of terminal populations to a single Pareto archive (front 0 of
/// one more non-dominated sort), sorted lexicographically by the first
/// objective (spec §4.6).
pub fn orchestrate<V, F>(
    model: &V::Model,
    evaluator: &Evaluator,
    config: &GaConfig,
    simulate: F,
    num_periods: usize,
    stop_flag: &AtomicBool,
) -> Vec<Chromosome<V>>
where
    V: Variant,
    V::Model: Sync,
    F: Fn(&Chromosome<V>, &V::Model) -> SimOutput + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count())
        .build()
        .expect("failed to build dedicated run-orchestrator thread pool");

    let populations: Vec<Population<V>> = pool.install(|| {
        (0..config.num_runs)
            .into_par_iter()
            .map(|run_index| {
                let mut rng = rng_for_run(config.random_state, run_index as u64);
                evolve::run::<V, _>(
                    model,
                    evaluator,
                    config,
                    &simulate,
                    num_periods,
                    &mut rng,
                    stop_flag,
                )
            })
            .collect()
    });

    let mut union: Vec<Chromosome<V>> = populations
        .into_iter()
        .flat_map(|p| p.chromosomes)
        .collect();

    if union.is_empty() {
        return union;
    }

    let fitnesses: Vec<_> = union
        .iter()
        .map(|c| c.fitness.clone().expect("evaluated by evolve::run"))
        .collect();
    let fronts = fast_non_dominated_sort(&fitnesses);
    let front_0 = fronts.into_iter().next().unwrap_or_default();

    let mut archive: Vec<Chromosome<V>> = front_0.into_iter().map(|i| union[i].clone()).collect();
    union.clear();

    archive.sort_by(|a, b| {
        let av = a.fitness.as_ref().map(|f| f.objectives[0]).unwrap_or(f64::MAX);
        let bv = b.fitness.as_ref().map(|f| f.objectives[0]).unwrap_or(f64::MAX);
        av.partial_cmp(&bv).unwrap()
    });

    archive
}
