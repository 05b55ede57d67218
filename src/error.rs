//! Error types for the column generation solver.
//!
//! One variant per error kind named in the design: most are fatal and
//! surfaced straight to the caller, `PricingDegenerate` is recovered
//! locally by the column generation loop.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvrptwError {
    #[error("schema invalid: {0}")]
    SchemaInvalid(String),

    #[error("instance infeasible: {0}")]
    InstanceInfeasible(String),

    #[error("construction impossible: could not place customer {customer}")]
    ConstructionImpossible { customer: usize },

    #[error("master problem infeasible despite a covering pool")]
    MasterInfeasible,

    #[error("pricing route recovery could not reconstruct a tour from node {0}")]
    PricingDegenerate(usize),

    #[error("final set-covering IP returned no feasible solution")]
    NoFeasibleCover,

    #[error("solver returned an abnormal status: {0}")]
    SolverAbnormal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CvrptwError>;
