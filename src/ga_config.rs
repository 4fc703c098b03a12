//! GA configuration (spec §6 "Configuration options"), validated once at
//! `.build()` so malformed parameters fail loudly before any run starts
//! (spec §7).
use crate::error::ConfigError;
use crate::variation::MutationRates;

#[derive(Clone, Debug)]
pub struct GaConfig {
    pub num_runs: usize,
    pub popsize: usize,
    pub num_gens: usize,
    pub starting_length: usize,
    pub p_xo: f64,
    pub mutation_rates: MutationRates,
    pub random_state: u64,
    /// -1 ⇒ `std::thread::available_parallelism()`.
    pub num_threads: i64,
    /// Hard cap on offspring length after crossover. `None` ⇒ derived at
    /// evolve time as 4× the model's number of demand periods (spec §4.2).
    pub l_max_override: Option<usize>,
}

impl GaConfig {
    pub fn builder() -> GaConfigBuilder {
        GaConfigBuilder::default()
    }

    pub fn effective_l_max(&self, num_periods: usize) -> usize {
        self.l_max_override.unwrap_or_else(|| (num_periods * 4).max(1))
    }

    /// Clamps `starting_length` into `1..=l_max` (spec §9 Open Question:
    /// out-of-range `starting_length` is clamped rather than rejected).
    pub fn effective_starting_length(&self, l_max: usize) -> usize {
        self.starting_length.clamp(1, l_max)
    }

    pub fn worker_count(&self) -> usize {
        if self.num_threads < 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.num_threads.max(1) as usize
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GaConfigBuilder {
    num_runs: Option<usize>,
    popsize: Option<usize>,
    num_gens: Option<usize>,
    starting_length: Option<usize>,
    p_xo: Option<f64>,
    p_product_mut: Option<f64>,
    p_usp_suite_mut: Option<f64>,
    p_plus_batch_mut: Option<f64>,
    p_minus_batch_mut: Option<f64>,
    p_gene_swap: Option<f64>,
    random_state: Option<u64>,
    num_threads: Option<i64>,
    l_max_override: Option<usize>,
}

macro_rules! with_field {
    ($name:ident, $ty:ty) => {
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

impl GaConfigBuilder {
    with_field!(num_runs, usize);
    with_field!(popsize, usize);
    with_field!(num_gens, usize);
    with_field!(starting_length, usize);
    with_field!(p_xo, f64);
    with_field!(p_product_mut, f64);
    with_field!(p_usp_suite_mut, f64);
    with_field!(p_plus_batch_mut, f64);
    with_field!(p_minus_batch_mut, f64);
    with_field!(p_gene_swap, f64);
    with_field!(random_state, u64);
    with_field!(num_threads, i64);

    pub fn l_max(mut self, value: usize) -> Self {
        self.l_max_override = Some(value);
        self
    }

    pub fn build(self) -> Result<GaConfig, ConfigError> {
        let num_runs = self.num_runs.unwrap_or(1);
        let popsize = self.popsize.unwrap_or(100);
        let num_gens = self.num_gens.unwrap_or(100);
        let starting_length = self.starting_length.unwrap_or(10);

        for (field, value) in [
            ("num_runs", num_runs as i64),
            ("popsize", popsize as i64),
            ("num_gens", num_gens as i64),
            ("starting_length", starting_length as i64),
        ] {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let probabilities = [
            ("p_xo", self.p_xo.unwrap_or(0.7)),
            ("p_product_mut", self.p_product_mut.unwrap_or(0.05)),
            ("p_usp_suite_mut", self.p_usp_suite_mut.unwrap_or(0.05)),
            ("p_plus_batch_mut", self.p_plus_batch_mut.unwrap_or(0.05)),
            ("p_minus_batch_mut", self.p_minus_batch_mut.unwrap_or(0.05)),
            ("p_gene_swap", self.p_gene_swap.unwrap_or(0.02)),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }

        Ok(GaConfig {
            num_runs,
            popsize,
            num_gens,
            starting_length,
            p_xo: probabilities[0].1,
            mutation_rates: MutationRates {
                p_product_mut: probabilities[1].1,
                p_usp_suite_mut: probabilities[2].1,
                p_plus_batch_mut: probabilities[3].1,
                p_minus_batch_mut: probabilities[4].1,
                p_gene_swap: probabilities[5].1,
            },
            random_state: self.random_state.unwrap_or(0),
            num_threads: self.num_threads.unwrap_or(-1),
            l_max_override: self.l_max_override,
        })
    }
}
