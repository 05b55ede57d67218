//! Column generation loop (§4.6): the orchestrator tying construction,
//! the master LP/IP, and pricing together.

use std::time::{Duration, Instant};

use crate::construct::construct_initial_routes;
use crate::error::{CvrptwError, Result};
use crate::instance::Instance;
use crate::master;
use crate::pricing::solve_pricing;
use crate::solution::Solution;
use crate::solver_api::SolverApi;

/// Runs construction, then column generation, then the final set-covering
/// IP, returning the chosen routes as a `Solution`. `S` is the concrete
/// solver engine used for every LP/MIP solved along the way.
pub fn solve<S: SolverApi + Default>(instance: &Instance) -> Result<Solution> {
    let start = Instant::now();
    let params = instance.parameters;

    let mut pool = construct_initial_routes(instance)?;
    log::info!(
        "initial construction complete: {} routes covering {} customers",
        pool.len(),
        instance.customers().count()
    );

    let init_time = start.elapsed().as_secs_f64();
    let cg_budget = params.column_generation_budget(init_time).max(0.0);
    let ip_budget = params.final_ip_budget(init_time).max(0.0);
    let cg_deadline = Duration::from_secs_f64(init_time + cg_budget);

    let mut no_improve: u32 = 0;
    let mut prev_obj = f64::INFINITY;
    let mut iteration: u32 = 0;

    loop {
        let lp = master::solve_lp::<S>(instance, &pool)?;
        let obj = lp.objective;

        let progressed = obj < (1.0 - params.min_column_generation_progress) * prev_obj;
        if progressed {
            no_improve = 0;
            prev_obj = obj;
        } else {
            no_improve += 1;
        }

        iteration += 1;
        log::info!(
            "cg iteration {}: master_obj={:.4} no_improve={} pool_size={}",
            iteration,
            obj,
            no_improve,
            pool.len()
        );

        if no_improve >= params.max_count_no_improvements {
            log::info!("cg exit: stagnation after {} non-improving iterations", no_improve);
            break;
        }

        let pricing = match solve_pricing::<S>(
            instance,
            &lp.duals,
            params.pricing_problem_time_limit,
            params.pricing_problem_mip_gap,
        ) {
            Ok(result) => result,
            Err(CvrptwError::PricingDegenerate(node)) => {
                log::warn!(
                    "cg exit: pricing route recovery degenerate at node {}, aborting iteration",
                    node
                );
                break;
            }
            Err(err) => return Err(err),
        };

        match pricing.route {
            Some(route) => {
                log::debug!("cg iteration {}: new column with reduced cost {:.4}", iteration, pricing.reduced_cost);
                pool.insert(route);
            }
            None => {
                log::info!("cg exit: no negative reduced-cost column found");
                break;
            }
        }

        if start.elapsed() >= cg_deadline {
            log::info!("cg exit: column generation time budget exhausted");
            break;
        }
    }

    let ip = master::solve_ip::<S>(instance, &pool, ip_budget, params.master_problem_mip_gap)?;
    log::info!(
        "final ip solved: cost={:.4} routes={}",
        ip.objective,
        ip.selected.len()
    );

    Ok(Solution::build(instance, &pool, &ip.selected, ip.objective))
}
