//! External Fit API (spec §6): the only entry points a host calls. Tabular
//! inputs go in, a materialised [`Model`] (Pareto front) comes out.
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

use chrono::NaiveDate;

use crate::chromosome::Chromosome;
use crate::error::{ConfigError, Error};
use crate::ga_config::GaConfig;
use crate::gene::{MultiSuite, MultiSuiteGene, Simple, SimpleGene};
use crate::model::{
    build_multi_suite_model, build_simple_model, ChangeoverRow, MultiSuiteModel, MultiSuiteProduct,
    PeriodRow, SimpleModel, SimpleProduct,
};
use crate::objective::{ConstraintSpec, Evaluator, ObjectiveSpec};
use crate::orchestrator::orchestrate;
use crate::schedule::{Model, Schedule};
use crate::simulator::{simulate_multi_suite, simulate_simple, SimOutput};

fn schedule_from_output(out: SimOutput, evaluator: &Evaluator, feasible: bool) -> Schedule {
    let mut objectives = BTreeMap::new();
    for name in evaluator.objective_names() {
        objectives.insert(name.to_string(), out.raw.get(name).copied().unwrap_or(0.0));
    }
    Schedule {
        campaigns: out.campaigns,
        batches: out.batches,
        tasks: out.tasks,
        series: out.series,
        objectives,
        feasible,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn fit_simple(
    start_date: NaiveDate,
    objectives: Vec<ObjectiveSpec>,
    kg_demand: Vec<PeriodRow>,
    product_data: Vec<SimpleProduct>,
    changeover_days: Vec<ChangeoverRow>,
    kg_inventory_target: Vec<PeriodRow>,
    constraints: Vec<ConstraintSpec>,
    config: GaConfig,
) -> Result<Model, Error> {
    let model = build_simple_model(
        start_date,
        product_data,
        changeover_days,
        kg_demand,
        kg_inventory_target,
    )?;
    let evaluator = Evaluator::new(objectives, constraints)?;
    let num_periods = model.calendar.num_periods();

    let stop_flag = AtomicBool::new(false);
    let archive = orchestrate::<Simple, _>(
        &model,
        &evaluator,
        &config,
        simulate_simple,
        num_periods,
        &stop_flag,
    );

    if archive.is_empty() {
        return Err(Error::Cancelled);
    }

    let schedules = archive
        .into_iter()
        .map(|c| {
            let out = simulate_simple(&c, &model);
            schedule_from_output(out, &evaluator, c.feasible)
        })
        .collect();

    Ok(Model { schedules })
}

#[allow(clippy::too_many_arguments)]
pub fn fit_multi_suite(
    start_date: NaiveDate,
    objectives: Vec<ObjectiveSpec>,
    num_usp_suites: usize,
    num_dsp_suites: usize,
    batch_demand: Vec<PeriodRow>,
    product_data: Vec<MultiSuiteProduct>,
    usp_changeover_days: Vec<ChangeoverRow>,
    dsp_changeover_days: Vec<ChangeoverRow>,
    constraints: Vec<ConstraintSpec>,
    config: GaConfig,
) -> Result<Model, Error> {
    let model = build_multi_suite_model(
        start_date,
        num_usp_suites,
        num_dsp_suites,
        product_data,
        usp_changeover_days,
        dsp_changeover_days,
        batch_demand,
    )?;
    let evaluator = Evaluator::new(objectives, constraints)?;
    let num_periods = model.calendar.num_periods();

    let stop_flag = AtomicBool::new(false);
    let archive = orchestrate::<MultiSuite, _>(
        &model,
        &evaluator,
        &config,
        simulate_multi_suite,
        num_periods,
        &stop_flag,
    );

    if archive.is_empty() {
        return Err(Error::Cancelled);
    }

    let schedules = archive
        .into_iter()
        .map(|c| {
            let out = simulate_multi_suite(&c, &model);
            schedule_from_output(out, &evaluator, c.feasible)
        })
        .collect();

    Ok(Model { schedules })
}

/// Re-simulates a user-supplied gene sequence for validation (spec §6
/// "`create_schedule(known_chromosome)` returns a single Schedule"). Used by
/// the concrete end-to-end scenarios in spec §8.
pub fn create_schedule_simple(
    model: &SimpleModel,
    evaluator: &Evaluator,
    genes: Vec<SimpleGene>,
) -> Result<Schedule, ConfigError> {
    if genes.is_empty() {
        return Err(ConfigError::EmptyProductSet);
    }
    let chromosome: Chromosome<Simple> = Chromosome::new(genes, 0);
    let out = simulate_simple(&chromosome, model);
    let fitness = evaluator.evaluate(&out.raw).unwrap_or_else(|_| evaluator.worst_fitness());
    Ok(schedule_from_output(out, evaluator, fitness.feasible()))
}

pub fn create_schedule_multi_suite(
    model: &MultiSuiteModel,
    evaluator: &Evaluator,
    genes: Vec<MultiSuiteGene>,
) -> Result<Schedule, ConfigError> {
    if genes.is_empty() {
        return Err(ConfigError::EmptyProductSet);
    }
    let chromosome: Chromosome<MultiSuite> = Chromosome::new(genes, 0);
    let out = simulate_multi_suite(&chromosome, model);
    let fitness = evaluator.evaluate(&out.raw).unwrap_or_else(|_| evaluator.worst_fitness());
    Ok(schedule_from_output(out, evaluator, fitness.feasible()))
}
