//! End-to-end invariants for the MULTI-SUITE facility simulator (spec §8).
use chrono::NaiveDate;

use biopharma_scheduling::objective::{ConstraintSpec, Direction, Evaluator, ObjectiveSpec};
use biopharma_scheduling::{
    build_multi_suite_model, create_schedule_multi_suite, MultiSuiteGene, MultiSuiteProduct,
    PeriodRow,
};

fn model() -> biopharma_scheduling::MultiSuiteModel {
    let start = NaiveDate::from_ymd_opt(2016, 11, 2).unwrap();
    let products = vec![
        MultiSuiteProduct {
            label: "P1".into(),
            usp_days: 10,
            dsp_days: 4,
            kg_per_batch: 50.0,
            shelf_life_days: 180,
            storage_cost_per_kg_day: 0.01,
            backlog_penalty_per_kg: 5.0,
            waste_cost_per_kg: 2.0,
            sale_price_per_kg: 8.0,
            min_batches: 1,
            max_batches: 8,
        },
        MultiSuiteProduct {
            label: "P2".into(),
            usp_days: 12,
            dsp_days: 5,
            kg_per_batch: 40.0,
            shelf_life_days: 150,
            storage_cost_per_kg_day: 0.01,
            backlog_penalty_per_kg: 5.0,
            waste_cost_per_kg: 2.0,
            sale_price_per_kg: 9.0,
            min_batches: 1,
            max_batches: 8,
        },
    ];

    let rows = vec![
        PeriodRow {
            period_end: NaiveDate::from_ymd_opt(2017, 2, 1).unwrap(),
            quantities: vec![3.0, 2.0],
        },
        PeriodRow {
            period_end: NaiveDate::from_ymd_opt(2017, 6, 1).unwrap(),
            quantities: vec![4.0, 3.0],
        },
    ];

    build_multi_suite_model(start, 2, 2, products, vec![], vec![], rows).unwrap()
}

fn evaluator() -> Evaluator {
    Evaluator::new(
        vec![ObjectiveSpec {
            name: "total_profit".to_string(),
            direction: Direction::Maximise,
        }],
        vec![ConstraintSpec {
            name: "total_backlog_penalty".to_string(),
            direction: Direction::Minimise,
            bound: 0.0,
        }],
    )
    .unwrap()
}

#[test]
fn no_two_campaigns_on_the_same_usp_suite_overlap() {
    let model = model();
    let eval = evaluator();
    let genes = vec![
        MultiSuiteGene { product_id: 0, usp_suite_id: 0, num_batches: 3 },
        MultiSuiteGene { product_id: 1, usp_suite_id: 0, num_batches: 2 },
        MultiSuiteGene { product_id: 0, usp_suite_id: 1, num_batches: 4 },
    ];
    let schedule = create_schedule_multi_suite(&model, &eval, genes).unwrap();

    for suite in 0..2 {
        let mut on_suite: Vec<_> = schedule
            .campaigns
            .iter()
            .filter(|c| c.usp_suite == Some(suite))
            .collect();
        on_suite.sort_by_key(|c| c.start_date);
        for pair in on_suite.windows(2) {
            let usp_duration = model.product(pair[0].product_id).usp_days * pair[0].num_batches as i64;
            let usp_end = pair[0].start_date + chrono::Duration::days(usp_duration);
            assert!(usp_end <= pair[1].start_date);
        }
    }
}

#[test]
fn every_campaign_gets_a_valid_dsp_suite_assignment() {
    let model = model();
    let eval = evaluator();
    let genes = vec![
        MultiSuiteGene { product_id: 0, usp_suite_id: 0, num_batches: 2 },
        MultiSuiteGene { product_id: 1, usp_suite_id: 1, num_batches: 2 },
    ];
    let schedule = create_schedule_multi_suite(&model, &eval, genes).unwrap();
    for campaign in &schedule.campaigns {
        let suite = campaign.dsp_suite.expect("multi-suite campaigns assign a dsp suite");
        assert!(suite < 2);
    }
}

#[test]
fn shelf_life_invariant_stored_on_before_expires_on() {
    let model = model();
    let eval = evaluator();
    let genes = vec![MultiSuiteGene {
        product_id: 0,
        usp_suite_id: 0,
        num_batches: 5,
    }];
    let schedule = create_schedule_multi_suite(&model, &eval, genes).unwrap();
    for batch in &schedule.batches {
        assert!(batch.stored_on <= batch.expires_on);
    }
}
