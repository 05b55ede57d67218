use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The closed set of solver parameters (§3). A typed record rather than a
/// generic key-value map, so unrecognized keys are rejected at
/// deserialization time instead of silently ignored.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Parameters {
    pub truck_capacity: f64,
    pub fleet_size: usize,
    pub max_solve_time: f64,
    pub column_generation_solve_ratio: f64,
    pub master_problem_mip_gap: f64,
    pub pricing_problem_mip_gap: f64,
    pub pricing_problem_time_limit: f64,
    pub min_column_generation_progress: f64,
    pub max_count_no_improvements: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            truck_capacity: 40_000.0,
            fleet_size: 3_000,
            max_solve_time: 60.0,
            column_generation_solve_ratio: 0.9,
            master_problem_mip_gap: 0.01,
            pricing_problem_mip_gap: 0.1,
            pricing_problem_time_limit: 1.0,
            min_column_generation_progress: 0.001,
            max_count_no_improvements: 10,
        }
    }
}

impl Parameters {
    pub fn load_yaml_file(filepath: &str) -> Result<Self> {
        let file = File::open(filepath)?;
        let reader = BufReader::new(file);
        let parameters = serde_yaml::from_reader(reader)?;
        Ok(parameters)
    }

    /// Remaining wall-clock budget reserved for column generation, after
    /// construction has already consumed `init_time` seconds.
    pub fn column_generation_budget(&self, init_time: f64) -> f64 {
        self.column_generation_solve_ratio * (self.max_solve_time - init_time)
    }

    /// Remaining wall-clock budget for the final set-covering IP.
    pub fn final_ip_budget(&self, init_time: f64) -> f64 {
        (1.0 - self.column_generation_solve_ratio) * (self.max_solve_time - init_time)
    }
}
