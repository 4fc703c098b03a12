//! The per-run NSGA-II generation loop (spec §4.5/§4.6): one independent
//! evolution, entirely self-contained bar the worker-local RNG stream it is
//! handed by the orchestrator.
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use crate::chromosome::Chromosome;
use crate::ga_config::GaConfig;
use crate::gene::Variant;
use crate::nsga2::{binary_tournament, fast_non_dominated_sort, select_next_generation};
use crate::objective::{Evaluator, Fitness};
use crate::population::Population;
use crate::simulator::SimOutput;
use crate::variation::{mutate, one_point_crossover};

/// Evaluates one individual: simulate, then convert raw accumulators into
/// fitness, degrading to worst-possible fitness on a `NumericError` (spec §7
/// "runtime anomalies degrade gracefully... the search can route around
/// them").
fn evaluate_one<V: Variant>(
    chromosome: &mut Chromosome<V>,
    model: &V::Model,
    evaluator: &Evaluator,
    simulate: &impl Fn(&Chromosome<V>, &V::Model) -> SimOutput,
) {
    if chromosome.fitness.is_some() {
        return;
    }
    let out = simulate(chromosome, model);
    match evaluator.evaluate(&out.raw) {
        Ok(fitness) => {
            chromosome.feasible = fitness.feasible();
            chromosome.fitness = Some(fitness);
        }
        Err(_) => {
            log::warn!(
                "numeric error evaluating individual {}, degrading to worst fitness",
                chromosome.reference_id
            );
            let fitness = evaluator.worst_fitness();
            chromosome.feasible = false;
            chromosome.fitness = Some(fitness);
        }
    }
}

fn fitnesses_of<V: Variant>(population: &[Chromosome<V>]) -> Vec<Fitness> {
    population
        .iter()
        .map(|c| c.fitness.clone().expect("evaluated before selection"))
        .collect()
}

fn ranks_from_fronts(fronts: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut rank = vec![0usize; n];
    for (r, front) in fronts.iter().enumerate() {
        for &i in front {
            rank[i] = r;
        }
    }
    rank
}

fn crowding_from_fronts(fronts: &[Vec<usize>], fitnesses: &[Fitness], n: usize) -> Vec<f64> {
    let mut crowding = vec![0.0_f64; n];
    for front in fronts {
        let d = crate::nsga2::crowding_distance(front, fitnesses);
        for (i, &idx) in front.iter().enumerate() {
            crowding[idx] = d[i];
        }
    }
    crowding
}

/// Runs one full evolution: seeds a population, evaluates it, then iterates
/// `num_gens` generations of (tournament select → crossover → mutate →
/// evaluate → merge → truncate). Checked once per generation against
/// `stop_flag` (spec §5 "cooperative stop flag checked once per generation").
pub fn run<V: Variant, R: Rng>(
    model: &V::Model,
    evaluator: &Evaluator,
    config: &GaConfig,
    simulate: impl Fn(&Chromosome<V>, &V::Model) -> SimOutput,
    num_periods: usize,
    rng: &mut R,
    stop_flag: &AtomicBool,
) -> Population<V> {
    let l_max = config.effective_l_max(num_periods);
    let starting_length = config.effective_starting_length(l_max);

    let mut next_id = 0usize;
    let mut next_reference_id = move || {
        next_id += 1;
        next_id
    };

    let mut chromosomes: Vec<Chromosome<V>> = (0..config.popsize)
        .map(|_| {
            let genes = (0..starting_length)
                .map(|_| V::random_gene(model, rng))
                .collect();
            Chromosome::new(genes, next_reference_id())
        })
        .collect();

    for c in &mut chromosomes {
        evaluate_one(c, model, evaluator, &simulate);
    }

    if stop_flag.load(Ordering::Relaxed) {
        log::warn!("run cancelled before the initial population finished evaluating");
        return Population::new(chromosomes);
    }

    for generation in 0..config.num_gens {
        let fitnesses = fitnesses_of(&chromosomes);
        let fronts = fast_non_dominated_sort(&fitnesses);
        let rank = ranks_from_fronts(&fronts, chromosomes.len());
        let crowding = crowding_from_fronts(&fronts, &fitnesses, chromosomes.len());

        let mut offspring: Vec<Chromosome<V>> = Vec::with_capacity(config.popsize);
        while offspring.len() < config.popsize {
            let a = binary_tournament(&rank, &crowding, rng);
            let b = binary_tournament(&rank, &crowding, rng);

            let (mut child_a, mut child_b) = if rng.gen_bool(config.p_xo) {
                one_point_crossover(
                    &chromosomes[a],
                    &chromosomes[b],
                    l_max,
                    &mut next_reference_id,
                    rng,
                )
            } else {
                let mut ca = chromosomes[a].clone();
                let mut cb = chromosomes[b].clone();
                ca.reference_id = next_reference_id();
                cb.reference_id = next_reference_id();
                (ca, cb)
            };

            mutate::<V, R>(&mut child_a, model, config.mutation_rates, rng);
            mutate::<V, R>(&mut child_b, model, config.mutation_rates, rng);
            offspring.push(child_a);
            if offspring.len() < config.popsize {
                offspring.push(child_b);
            }
        }

        for c in &mut offspring {
            evaluate_one(c, model, evaluator, &simulate);
        }

        let mut combined = chromosomes;
        for c in &mut combined {
            c.age += 1;
        }
        combined.extend(offspring);

        let combined_fitnesses = fitnesses_of(&combined);
        let combined_fronts = fast_non_dominated_sort(&combined_fitnesses);
        let selected_indices = select_next_generation(&combined_fronts, &combined_fitnesses, config.popsize);

        chromosomes = selected_indices.into_iter().map(|i| combined[i].clone()).collect();

        let generation_pop = Population::new(chromosomes);
        log::debug!(
            "generation {generation}: feasible {}/{}, mean length {:.2}",
            generation_pop.num_feasible(),
            generation_pop.len(),
            generation_pop.mean_length()
        );
        chromosomes = generation_pop.chromosomes;

        if stop_flag.load(Ordering::Relaxed) {
            log::warn!("run cancelled at generation {generation}, returning partial archive");
            break;
        }
    }

    Population::new(chromosomes)
}
