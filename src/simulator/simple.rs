//! The SIMPLE facility forward sweep (spec §4.3, single production line).
use std::collections::BTreeMap;

use super::fifo::StockFifo;
use super::SimOutput;
use crate::chromosome::Chromosome;
use crate::gene::{Simple, Variant};
use crate::model::SimpleModel;
use crate::schedule::{Campaign, Batch, ProductSeries, Task, TaskKind};

/// Simulates one SIMPLE chromosome against its model. Pure function: takes
/// no state beyond its arguments, safe to call from any thread.
pub fn simulate_simple(chromosome: &Chromosome<Simple>, model: &SimpleModel) -> SimOutput {
    let num_products = model.num_products();
    let cal = &model.calendar;

    let mut campaigns: Vec<Campaign> = Vec::with_capacity(chromosome.length());
    let mut batches: Vec<Batch> = Vec::new();
    let mut tasks: Vec<Task> = Vec::new();

    let mut t: i64 = 0;
    let mut prev_product: Option<usize> = None;

    for gene in &chromosome.genes {
        let product_id = Simple::product_id(gene);
        let product = model.product(product_id);
        if let Some(prev) = prev_product {
            if prev != product_id {
                t += model.changeover_days.days(prev, product_id);
            }
        }
        let gene_start = t;
        let num_batches = Simple::num_batches(gene);

        let mut first_harvest: Option<i64> = None;
        let mut first_batch_stored: Option<i64> = None;
        let mut last_batch_stored = gene_start;

        for _ in 0..num_batches {
            let inoc_start = t;
            let inoc_end = inoc_start + product.inoculation_days;
            let seed_end = inoc_end + product.seed_days;
            let harvested_on = seed_end + product.production_days;
            let stored_on = harvested_on + product.dsp_days;
            let approved_on = stored_on + product.approval_days;
            let expires_on = stored_on + product.shelf_life_days;

            let batch_index = batches.len();
            tasks.push(Task {
                batch_index,
                kind: TaskKind::Inoculation,
                start: cal.date_at(inoc_start),
                finish: cal.date_at(inoc_end),
            });
            tasks.push(Task {
                batch_index,
                kind: TaskKind::Seed,
                start: cal.date_at(inoc_end),
                finish: cal.date_at(seed_end),
            });
            tasks.push(Task {
                batch_index,
                kind: TaskKind::Production,
                start: cal.date_at(seed_end),
                finish: cal.date_at(harvested_on),
            });

            batches.push(Batch {
                product_id,
                kg: product.kg_per_batch,
                harvested_on: cal.date_at(harvested_on),
                stored_on: cal.date_at(stored_on),
                expires_on: cal.date_at(expires_on),
                approved_on: cal.date_at(approved_on),
            });

            first_harvest.get_or_insert(harvested_on);
            first_batch_stored.get_or_insert(stored_on);
            last_batch_stored = stored_on;

            t += product.usp_days();
        }

        campaigns.push(Campaign {
            product_id,
            num_batches,
            kg: product.kg_per_batch * num_batches as f64,
            start_date: cal.date_at(gene_start),
            first_harvest: cal.date_at(first_harvest.unwrap_or(gene_start)),
            first_batch_stored: cal.date_at(first_batch_stored.unwrap_or(gene_start)),
            last_batch_stored: cal.date_at(last_batch_stored),
            usp_suite: None,
            dsp_suite: None,
            end_date: None,
        });

        prev_product = Some(product_id);
    }

    let mut per_product_batches: Vec<Vec<usize>> = vec![Vec::new(); num_products];
    for (i, b) in batches.iter().enumerate() {
        per_product_batches[b.product_id].push(i);
    }

    let num_periods = cal.num_periods();
    let mut fifos: Vec<StockFifo> = vec![StockFifo::default(); num_products];
    let mut backlog = vec![0.0_f64; num_products];
    let mut ptr = vec![0usize; num_products];
    let mut series: Vec<ProductSeries> = (0..num_products).map(|_| ProductSeries::default()).collect();

    let mut total_kg_waste = 0.0;
    let mut total_kg_backlog = 0.0;
    let mut total_kg_inventory_deficit = 0.0;
    let mut total_kg_throughput = 0.0;

    for period in 0..num_periods {
        let boundary = cal.period_end_offset(period).unwrap();
        for p in 0..num_products {
            while ptr[p] < per_product_batches[p].len() {
                let bi = per_product_batches[p][ptr[p]];
                let approved_offset = cal.offset_of(batches[bi].approved_on);
                if approved_offset > boundary {
                    break;
                }
                let expires_offset = cal.offset_of(batches[bi].expires_on);
                if expires_offset <= approved_offset {
                    total_kg_waste += batches[bi].kg;
                } else {
                    fifos[p].push(batches[bi].kg, expires_offset);
                }
                ptr[p] += 1;
            }

            let wasted = fifos[p].expire(boundary);
            total_kg_waste += wasted;

            let backlog_satisfied = fifos[p].consume(backlog[p]);
            backlog[p] -= backlog_satisfied;

            let demand = model.kg_demand.get(p, period);
            let demand_satisfied = fifos[p].consume(demand);
            let unmet = demand - demand_satisfied;
            backlog[p] += unmet;

            let supplied = backlog_satisfied + demand_satisfied;
            total_kg_throughput += supplied;
            total_kg_backlog += backlog[p];

            let on_hand = fifos[p].on_hand();
            let target = model.kg_inventory_target.get(p, period);
            total_kg_inventory_deficit += (target - on_hand).max(0.0);

            series[p].kg_inventory.push(on_hand);
            series[p].kg_backlog.push(backlog[p]);
            series[p].kg_supply.push(supplied);
            series[p].kg_waste.push(wasted);
        }
    }

    // Batches whose approval falls after the horizon never reach the
    // reconciliation loop at all; they are neither supplied, wasted, nor
    // held in ending inventory. Surface their kg so the mass-balance
    // identity (spec §8) stays exact across the campaign/batch boundary.
    let horizon_end = cal.horizon_end();
    let mut total_kg_in_flight = 0.0;
    for p in 0..num_products {
        for &bi in &per_product_batches[p][ptr[p]..] {
            debug_assert!(cal.offset_of(batches[bi].approved_on) > horizon_end);
            total_kg_in_flight += batches[bi].kg;
        }
    }

    let mut raw = BTreeMap::new();
    raw.insert("total_kg_throughput".to_string(), total_kg_throughput);
    raw.insert(
        "total_kg_inventory_deficit".to_string(),
        total_kg_inventory_deficit,
    );
    raw.insert("total_kg_backlog".to_string(), total_kg_backlog);
    raw.insert("total_kg_waste".to_string(), total_kg_waste);
    raw.insert("total_kg_in_flight".to_string(), total_kg_in_flight);

    SimOutput {
        campaigns,
        batches,
        tasks,
        series,
        raw,
    }
}
