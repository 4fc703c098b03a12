//! The MULTI-SUITE facility model: separate upstream/downstream suite pools.
use crate::calendar::Calendar;
use crate::model::common::{ChangeoverMatrix, PeriodSeries};
use crate::model::product::MultiSuiteProduct;

/// Immutable per-run model for the MULTI-SUITE facility (spec §3/§4.1).
#[derive(Clone, Debug)]
pub struct MultiSuiteModel {
    pub calendar: Calendar,
    pub products: Vec<MultiSuiteProduct>,
    pub usp_changeover_days: ChangeoverMatrix,
    pub dsp_changeover_days: ChangeoverMatrix,
    pub batch_demand: PeriodSeries,
    pub num_usp_suites: usize,
    pub num_dsp_suites: usize,
}

impl MultiSuiteModel {
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    pub fn product(&self, id: usize) -> &MultiSuiteProduct {
        &self.products[id]
    }
}
