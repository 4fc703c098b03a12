//! Shared tabular building blocks for both facility models: the changeover
//! matrix and the per-product, per-period demand/target series (spec §3).

/// Square `(from_product_index, to_product_index) -> days` changeover
/// lookup. O(1) by construction (a dense row-major matrix), per spec §4.1.
/// The diagonal is always 0 (no changeover within a campaign).
#[derive(Clone, Debug)]
pub struct ChangeoverMatrix {
    num_products: usize,
    days: Vec<i64>,
}

impl ChangeoverMatrix {
    pub fn from_rows(num_products: usize, days: Vec<i64>) -> Self {
        assert_eq!(days.len(), num_products * num_products);
        Self { num_products, days }
    }

    pub fn zeroed(num_products: usize) -> Self {
        Self {
            num_products,
            days: vec![0; num_products * num_products],
        }
    }

    pub fn days(&self, from_product: usize, to_product: usize) -> i64 {
        if from_product == to_product {
            return 0;
        }
        self.days[from_product * self.num_products + to_product]
    }

    pub fn set(&mut self, from_product: usize, to_product: usize, value: i64) {
        self.days[from_product * self.num_products + to_product] = value;
    }
}

/// Per-product, per-period quantities (a demand table or an inventory
/// target table). Out-of-horizon lookups return 0, per spec §4.1.
#[derive(Clone, Debug)]
pub struct PeriodSeries {
    num_products: usize,
    num_periods: usize,
    values: Vec<f64>,
}

impl PeriodSeries {
    pub fn from_rows(num_products: usize, num_periods: usize, values: Vec<f64>) -> Self {
        assert_eq!(values.len(), num_products * num_periods);
        Self {
            num_products,
            num_periods,
            values,
        }
    }

    pub fn zeroed(num_products: usize, num_periods: usize) -> Self {
        Self {
            num_products,
            num_periods,
            values: vec![0.0; num_products * num_periods],
        }
    }

    pub fn get(&self, product: usize, period: usize) -> f64 {
        if period >= self.num_periods {
            return 0.0;
        }
        self.values[product * self.num_periods + period]
    }

    pub fn num_periods(&self) -> usize {
        self.num_periods
    }
}
