use clap::{App, Arg};

/// The resulting command line arguments.
pub struct Args {
    /// Path to a Solomon-format instance file; `None` falls back to the
    /// crate's built-in toy instance (`instance::fixtures::toy_instance`).
    pub instance_path: Option<String>,
    pub parameters_path: Option<String>,
    pub solution_path: Option<String>,
    pub time_limit: Option<f64>,
}

impl Args {
    /// Sets up the clap app and parses the command line arguments.
    pub fn parse() -> Self {
        let matches = App::new("cvrptw-cg")
            .version("0.1")
            .about("Column generation solver for the capacitated vehicle routing problem with time windows")
            .arg(
                Arg::with_name("instance_path")
                    .required(false)
                    .help("Path to a Solomon-format problem instance; omit to solve the built-in toy instance"),
            )
            .arg(
                Arg::with_name("parameters")
                    .short("p")
                    .long("parameters")
                    .takes_value(true)
                    .help("Path to a YAML file overriding the default solver parameters"),
            )
            .arg(
                Arg::with_name("solution_path")
                    .short("o")
                    .long("output")
                    .takes_value(true)
                    .help("Path to write the JSON solution; stdout if omitted"),
            )
            .arg(
                Arg::with_name("time_limit")
                    .short("t")
                    .long("time-limit")
                    .takes_value(true)
                    .help("Override max_solve_time, in seconds"),
            )
            .get_matches();

        let instance_path = matches.value_of("instance_path").map(String::from);

        let parameters_path = matches.value_of("parameters").map(String::from);
        let solution_path = matches.value_of("solution_path").map(String::from);
        let time_limit = matches
            .value_of("time_limit")
            .map(|value| value.parse::<f64>().expect("invalid --time-limit"));

        Self {
            instance_path,
            parameters_path,
            solution_path,
            time_limit,
        }
    }
}
