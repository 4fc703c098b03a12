//! The SIMPLE facility model: one production line, one gene per campaign.
use crate::calendar::Calendar;
use crate::model::common::{ChangeoverMatrix, PeriodSeries};
use crate::model::product::SimpleProduct;

/// Immutable per-run model for the SIMPLE facility (spec §3/§4.1).
#[derive(Clone, Debug)]
pub struct SimpleModel {
    pub calendar: Calendar,
    pub products: Vec<SimpleProduct>,
    pub changeover_days: ChangeoverMatrix,
    pub kg_demand: PeriodSeries,
    pub kg_inventory_target: PeriodSeries,
}

impl SimpleModel {
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    pub fn product(&self, id: usize) -> &SimpleProduct {
        &self.products[id]
    }
}
