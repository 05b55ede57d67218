use anyhow::Context;

use cvrptw_cg::cg;
use cvrptw_cg::cli::Args;
use cvrptw_cg::config::Parameters;
use cvrptw_cg::instance::fixtures::toy_instance;
use cvrptw_cg::instance::solomon::load_solomon_file;
use cvrptw_cg::solver_highs::HighsSolver;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_module_path(false)
        .init();

    let args = Args::parse();

    let mut parameters = match &args.parameters_path {
        Some(path) => Parameters::load_yaml_file(path)
            .with_context(|| format!("failed to load parameters file: {}", path))?,
        None => Parameters::default(),
    };
    if let Some(time_limit) = args.time_limit {
        parameters.max_solve_time = time_limit;
    }

    let instance = match &args.instance_path {
        Some(path) => {
            log::info!("loading instance: {}", path);
            load_solomon_file(path, parameters).with_context(|| format!("failed to load instance: {}", path))?
        }
        None => {
            log::info!("no instance path given, solving the built-in toy instance");
            let mut instance = toy_instance();
            // Keep the toy fixture's own fleet size/capacity; honor every
            // other CLI/YAML-overridden parameter (e.g. --time-limit).
            instance.parameters = Parameters {
                fleet_size: instance.parameters.fleet_size,
                truck_capacity: instance.parameters.truck_capacity,
                ..parameters
            };
            instance
        }
    };
    log::info!("instance loaded: {} nodes, {} customers", instance.n(), instance.customers().count());

    let solution = cg::solve::<HighsSolver>(&instance).context("solve failed")?;

    let json = serde_json::to_string_pretty(&solution).context("failed to serialize solution")?;
    match args.solution_path {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("failed to write solution file: {}", path))?;
            log::info!("solution written to {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
