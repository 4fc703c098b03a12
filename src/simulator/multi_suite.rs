//! The MULTI-SUITE facility simulator (spec §4.3): campaigns are pinned to a
//! USP suite by the chromosome, DSP suite assignment is resolved greedily.
use std::collections::BTreeMap;

use super::fifo::StockFifo;
use super::SimOutput;
use crate::chromosome::Chromosome;
use crate::gene::{MultiSuite, Variant};
use crate::model::MultiSuiteModel;
use crate::schedule::{Campaign, Batch, ProductSeries};

struct SuiteState {
    free_at: i64,
    last_product: Option<usize>,
}

/// Picks the DSP suite that becomes free earliest, ties broken by minimum
/// changeover from its last product to `product_id` (spec §4.3).
fn pick_dsp_suite(
    suites: &[SuiteState],
    changeover: &crate::model::common::ChangeoverMatrix,
    product_id: usize,
) -> usize {
    suites
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let co = match s.last_product {
                Some(last) => changeover.days(last, product_id),
                None => 0,
            };
            (i, s.free_at, co)
        })
        .min_by(|a, b| (a.1, a.2).cmp(&(b.1, b.2)))
        .map(|(i, _, _)| i)
        .unwrap_or(0)
}

/// Simulates one MULTI-SUITE chromosome against its model. Pure function.
pub fn simulate_multi_suite(
    chromosome: &Chromosome<MultiSuite>,
    model: &MultiSuiteModel,
) -> SimOutput {
    let num_products = model.num_products();
    let cal = &model.calendar;

    let mut usp_suites: Vec<SuiteState> = (0..model.num_usp_suites)
        .map(|_| SuiteState {
            free_at: 0,
            last_product: None,
        })
        .collect();
    let mut dsp_suites: Vec<SuiteState> = (0..model.num_dsp_suites)
        .map(|_| SuiteState {
            free_at: 0,
            last_product: None,
        })
        .collect();

    let mut campaigns: Vec<Campaign> = Vec::with_capacity(chromosome.length());
    let mut batches: Vec<Batch> = Vec::new();

    for gene in &chromosome.genes {
        let product_id = MultiSuite::product_id(gene);
        let product = model.product(product_id);
        let num_batches = MultiSuite::num_batches(gene);
        let usp_suite = gene.usp_suite_id.min(model.num_usp_suites.saturating_sub(1));

        let usp_state = &mut usp_suites[usp_suite];
        let usp_changeover = match usp_state.last_product {
            Some(last) if last != product_id => model.usp_changeover_days.days(last, product_id),
            _ => 0,
        };
        let usp_start = usp_state.free_at + usp_changeover;
        let usp_total = product.usp_days * num_batches as i64;
        usp_state.free_at = usp_start + usp_total;
        usp_state.last_product = Some(product_id);

        let harvest_start = usp_start + product.usp_days;

        let dsp_suite = pick_dsp_suite(&dsp_suites, &model.dsp_changeover_days, product_id);
        let dsp_state = &mut dsp_suites[dsp_suite];
        let dsp_changeover = match dsp_state.last_product {
            Some(last) if last != product_id => model.dsp_changeover_days.days(last, product_id),
            _ => 0,
        };
        let dsp_start = (dsp_state.free_at + dsp_changeover).max(harvest_start);
        let dsp_total = product.dsp_days * num_batches as i64;
        dsp_state.free_at = dsp_start + dsp_total;
        dsp_state.last_product = Some(product_id);

        let mut first_stored = None;
        let mut last_stored = dsp_start;
        for b in 0..num_batches as i64 {
            let stored_on = dsp_start + (b + 1) * product.dsp_days;
            // MULTI-SUITE products carry no approval delay (spec §3 omits it
            // from this variant's field list).
            let approved_on = stored_on;
            let expires_on = stored_on + product.shelf_life_days;
            first_stored.get_or_insert(stored_on);
            last_stored = stored_on;
            batches.push(Batch {
                product_id,
                kg: product.kg_per_batch,
                harvested_on: cal.date_at(harvest_start + b * product.usp_days),
                stored_on: cal.date_at(stored_on),
                expires_on: cal.date_at(expires_on),
                approved_on: cal.date_at(approved_on),
            });
        }

        campaigns.push(Campaign {
            product_id,
            num_batches,
            kg: product.kg_per_batch * num_batches as f64,
            start_date: cal.date_at(usp_start),
            first_harvest: cal.date_at(harvest_start),
            first_batch_stored: cal.date_at(first_stored.unwrap_or(dsp_start)),
            last_batch_stored: cal.date_at(last_stored),
            usp_suite: Some(usp_suite),
            dsp_suite: Some(dsp_suite),
            end_date: Some(cal.date_at(dsp_state.free_at)),
        });
    }

    let mut per_product_batches: Vec<Vec<usize>> = vec![Vec::new(); num_products];
    for (i, b) in batches.iter().enumerate() {
        per_product_batches[b.product_id].push(i);
    }
    // Different USP/DSP suites run in parallel, so batches are no longer
    // globally time-ordered across products the way the SIMPLE sweep is;
    // sort each product's own batches by approval time before reconciling.
    for list in per_product_batches.iter_mut() {
        list.sort_by_key(|&i| cal.offset_of(batches[i].approved_on));
    }

    let num_periods = cal.num_periods();
    let mut fifos: Vec<StockFifo> = vec![StockFifo::default(); num_products];
    let mut backlog = vec![0.0_f64; num_products];
    let mut ptr = vec![0usize; num_products];
    let mut series: Vec<ProductSeries> = (0..num_products).map(|_| ProductSeries::default()).collect();

    let mut total_kg_waste = 0.0;
    let mut total_kg_backlog_kg = 0.0;
    let mut total_kg_sold = vec![0.0_f64; num_products];
    let mut prev_boundary = 0_i64;
    let mut storage_cost = 0.0;
    let mut backlog_penalty_cost = 0.0;
    let mut waste_cost = 0.0;

    for period in 0..num_periods {
        let boundary = cal.period_end_offset(period).unwrap();
        let period_len = (boundary - prev_boundary).max(1) as f64;
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
                    waste_cost += batches[bi].kg * model.product(p).waste_cost_per_kg;
                } else {
                    fifos[p].push(batches[bi].kg, expires_offset);
                }
                ptr[p] += 1;
            }

            let wasted = fifos[p].expire(boundary);
            total_kg_waste += wasted;
            waste_cost += wasted * model.product(p).waste_cost_per_kg;

            let backlog_satisfied = fifos[p].consume(backlog[p]);
            backlog[p] -= backlog_satisfied;

            let demand_batches = model.batch_demand.get(p, period);
            let demand_kg = demand_batches * model.product(p).kg_per_batch;
            let demand_satisfied = fifos[p].consume(demand_kg);
            let unmet = demand_kg - demand_satisfied;
            backlog[p] += unmet;

            let supplied = backlog_satisfied + demand_satisfied;
            total_kg_sold[p] += supplied;
            total_kg_backlog_kg += backlog[p];
            backlog_penalty_cost += backlog[p] * model.product(p).backlog_penalty_per_kg;

            let on_hand = fifos[p].on_hand();
            storage_cost += on_hand * model.product(p).storage_cost_per_kg_day * period_len;

            let kg_per_batch = model.product(p).kg_per_batch;
            series[p].kg_inventory.push(on_hand / kg_per_batch);
            series[p].kg_backlog.push(backlog[p] / kg_per_batch);
            series[p].kg_supply.push(supplied / kg_per_batch);
            series[p].kg_waste.push(wasted / kg_per_batch);
        }
        prev_boundary = boundary;
    }

    let total_profit: f64 = (0..num_products)
        .map(|p| total_kg_sold[p] * model.product(p).sale_price_per_kg)
        .sum::<f64>()
        - storage_cost
        - backlog_penalty_cost
        - waste_cost;

    // Same in-flight accounting as the SIMPLE sweep: batches approved after
    // the horizon never reach reconciliation.
    let horizon_end = cal.horizon_end();
    let mut total_kg_in_flight = 0.0;
    for p in 0..num_products {
        for &bi in &per_product_batches[p][ptr[p]..] {
            debug_assert!(cal.offset_of(batches[bi].approved_on) > horizon_end);
            total_kg_in_flight += batches[bi].kg;
        }
    }

    let mut raw = BTreeMap::new();
    raw.insert("total_profit".to_string(), total_profit);
    raw.insert("total_backlog_penalty".to_string(), backlog_penalty_cost);
    raw.insert("total_kg_waste".to_string(), total_kg_waste);
    raw.insert("total_kg_backlog".to_string(), total_kg_backlog_kg);
    raw.insert("total_kg_in_flight".to_string(), total_kg_in_flight);

    SimOutput {
        campaigns,
        batches,
        tasks: Vec::new(),
        series,
        raw,
    }
}
