//! Validates raw tabular inputs and assembles the frozen per-run [`SimpleModel`]
//! / [`MultiSuiteModel`]. All [`ConfigError`] cases from spec §7 are raised
//! here, before any individual is ever simulated.
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::calendar::Calendar;
use crate::error::ConfigError;
use crate::model::common::{ChangeoverMatrix, PeriodSeries};
use crate::model::multi_suite::MultiSuiteModel;
use crate::model::product::{MultiSuiteProduct, SimpleProduct};
use crate::model::simple::SimpleModel;

/// One row of a demand or inventory-target table: a period boundary plus one
/// quantity per product, in the same order as the product list.
#[derive(Clone, Debug)]
pub struct PeriodRow {
    pub period_end: NaiveDate,
    pub quantities: Vec<f64>,
}

/// One row of a changeover table.
#[derive(Clone, Debug)]
pub struct ChangeoverRow {
    pub from_product: String,
    pub to_product: String,
    pub days: i64,
}

fn product_index(labels: &HashMap<&str, usize>, label: &str) -> Result<usize, ConfigError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| ConfigError::UnknownProductInChangeover(label.to_string()))
}

fn build_changeover(
    num_products: usize,
    labels: &HashMap<&str, usize>,
    rows: &[ChangeoverRow],
) -> Result<ChangeoverMatrix, ConfigError> {
    let mut matrix = ChangeoverMatrix::zeroed(num_products);
    for row in rows {
        let from = product_index(labels, &row.from_product)?;
        let to = product_index(labels, &row.to_product)?;
        if from == to && row.days != 0 {
            return Err(ConfigError::NonZeroChangeoverDiagonal(
                row.from_product.clone(),
            ));
        }
        if row.days < 0 {
            return Err(ConfigError::NegativeDuration {
                product: row.from_product.clone(),
                field: "changeover_days".to_string(),
                value: row.days,
            });
        }
        matrix.set(from, to, row.days);
    }
    Ok(matrix)
}

fn check_periods_contiguous(
    start_date: NaiveDate,
    rows: &[PeriodRow],
) -> Result<Vec<i64>, ConfigError> {
    let mut offsets = Vec::with_capacity(rows.len());
    let mut prev_end: Option<NaiveDate> = None;
    for row in rows {
        if let Some(prev) = prev_end {
            if row.period_end <= prev {
                return Err(ConfigError::NonContiguousPeriods {
                    prev: prev.to_string(),
                    next: row.period_end.to_string(),
                });
            }
        }
        offsets.push((row.period_end - start_date).num_days());
        prev_end = Some(row.period_end);
    }
    Ok(offsets)
}

fn check_non_negative(
    rows: &[PeriodRow],
    labels: &[String],
) -> Result<(), ConfigError> {
    for row in rows {
        for (idx, &value) in row.quantities.iter().enumerate() {
            if value < 0.0 {
                return Err(ConfigError::NegativeQuantity {
                    product: labels[idx].clone(),
                    period: row.period_end.to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}

fn period_series_from_rows(
    num_products: usize,
    rows: &[PeriodRow],
) -> PeriodSeries {
    let num_periods = rows.len();
    let mut values = vec![0.0; num_products * num_periods];
    for (period, row) in rows.iter().enumerate() {
        for (product, &q) in row.quantities.iter().enumerate() {
            values[product * num_periods + period] = q;
        }
    }
    PeriodSeries::from_rows(num_products, num_periods, values)
}

fn check_batch_range(label: &str, min_batches: u32, max_batches: u32) -> Result<(), ConfigError> {
    if min_batches > max_batches {
        return Err(ConfigError::InvalidBatchRange {
            product: label.to_string(),
            min: min_batches,
            max: max_batches,
        });
    }
    Ok(())
}

pub fn build_simple_model(
    start_date: NaiveDate,
    products: Vec<SimpleProduct>,
    changeover_days: Vec<ChangeoverRow>,
    kg_demand: Vec<PeriodRow>,
    kg_inventory_target: Vec<PeriodRow>,
) -> Result<SimpleModel, ConfigError> {
    if products.is_empty() {
        return Err(ConfigError::EmptyProductSet);
    }
    let labels: Vec<String> = products.iter().map(|p| p.label.clone()).collect();
    let label_index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    for p in &products {
        check_batch_range(&p.label, p.min_batches, p.max_batches)?;
        for (field, value) in [
            ("inoculation_days", p.inoculation_days),
            ("seed_days", p.seed_days),
            ("production_days", p.production_days),
            ("dsp_days", p.dsp_days),
            ("shelf_life_days", p.shelf_life_days),
            ("approval_days", p.approval_days),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeDuration {
                    product: p.label.clone(),
                    field: field.to_string(),
                    value,
                });
            }
        }
    }

    let demand_offsets = check_periods_contiguous(start_date, &kg_demand)?;
    let target_offsets = check_periods_contiguous(start_date, &kg_inventory_target)?;
    check_non_negative(&kg_demand, &labels)?;
    check_non_negative(&kg_inventory_target, &labels)?;

    let changeover = build_changeover(products.len(), &label_index, &changeover_days)?;
    let kg_demand_series = period_series_from_rows(products.len(), &kg_demand);
    let kg_target_series = period_series_from_rows(products.len(), &kg_inventory_target);

    // The calendar is driven by the demand table's periods; the inventory
    // target table is required to share the same period boundaries.
    if !target_offsets.is_empty() && target_offsets != demand_offsets {
        return Err(ConfigError::NonContiguousPeriods {
            prev: "kg_inventory_target periods".to_string(),
            next: "do not match kg_demand periods".to_string(),
        });
    }

    let calendar = Calendar::new(start_date, demand_offsets);

    Ok(SimpleModel {
        calendar,
        products,
        changeover_days: changeover,
        kg_demand: kg_demand_series,
        kg_inventory_target: kg_target_series,
    })
}

#[allow(clippy::too_many_arguments)]
pub fn build_multi_suite_model(
    start_date: NaiveDate,
    num_usp_suites: usize,
    num_dsp_suites: usize,
    products: Vec<MultiSuiteProduct>,
    usp_changeover_days: Vec<ChangeoverRow>,
    dsp_changeover_days: Vec<ChangeoverRow>,
    batch_demand: Vec<PeriodRow>,
) -> Result<MultiSuiteModel, ConfigError> {
    if products.is_empty() {
        return Err(ConfigError::EmptyProductSet);
    }
    if num_usp_suites == 0 || num_dsp_suites == 0 {
        return Err(ConfigError::InvalidSuiteCount);
    }
    let labels: Vec<String> = products.iter().map(|p| p.label.clone()).collect();
    let label_index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    for p in &products {
        check_batch_range(&p.label, p.min_batches, p.max_batches)?;
        for (field, value) in [
            ("usp_days", p.usp_days),
            ("dsp_days", p.dsp_days),
            ("shelf_life_days", p.shelf_life_days),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeDuration {
                    product: p.label.clone(),
                    field: field.to_string(),
                    value,
                });
            }
        }
    }

    let demand_offsets = check_periods_contiguous(start_date, &batch_demand)?;
    check_non_negative(&batch_demand, &labels)?;

    let usp_changeover = build_changeover(products.len(), &label_index, &usp_changeover_days)?;
    let dsp_changeover = build_changeover(products.len(), &label_index, &dsp_changeover_days)?;
    let demand_series = period_series_from_rows(products.len(), &batch_demand);

    let calendar = Calendar::new(start_date, demand_offsets);

    Ok(MultiSuiteModel {
        calendar,
        products,
        usp_changeover_days: usp_changeover,
        dsp_changeover_days: dsp_changeover,
        batch_demand: demand_series,
        num_usp_suites,
        num_dsp_suites,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(label: &str) -> SimpleProduct {
        SimpleProduct {
            label: label.to_string(),
            kg_per_batch: 10.0,
            inoculation_days: 2,
            seed_days: 3,
            production_days: 5,
            dsp_days: 4,
            shelf_life_days: 60,
            approval_days: 5,
            min_batches: 1,
            max_batches: 10,
            storage_cost_per_kg_day: 0.1,
            backlog_penalty_per_kg: 5.0,
            waste_cost_per_kg: 2.0,
            sale_price_per_kg: 20.0,
        }
    }

    #[test]
    fn rejects_empty_product_set() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let err = build_simple_model(start, vec![], vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, ConfigError::EmptyProductSet);
    }

    #[test]
    fn rejects_non_contiguous_periods() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let rows = vec![
            PeriodRow {
                period_end: NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
                quantities: vec![1.0],
            },
            PeriodRow {
                period_end: NaiveDate::from_ymd_opt(2016, 1, 15).unwrap(),
                quantities: vec![1.0],
            },
        ];
        let err =
            build_simple_model(start, vec![product("A")], vec![], rows, vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::NonContiguousPeriods { .. }));
    }

    #[test]
    fn rejects_negative_quantity() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let rows = vec![PeriodRow {
            period_end: NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
            quantities: vec![-5.0],
        }];
        let err =
            build_simple_model(start, vec![product("A")], vec![], rows, vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::NegativeQuantity { .. }));
    }

    #[test]
    fn rejects_min_batches_over_max() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let mut p = product("A");
        p.min_batches = 5;
        p.max_batches = 2;
        let err = build_simple_model(start, vec![p], vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBatchRange { .. }));
    }

    #[test]
    fn builds_valid_model() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        let rows = vec![PeriodRow {
            period_end: NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
            quantities: vec![10.0],
        }];
        let model =
            build_simple_model(start, vec![product("A")], vec![], rows.clone(), rows).unwrap();
        assert_eq!(model.products.len(), 1);
        assert_eq!(model.calendar.num_periods(), 1);
    }
}
