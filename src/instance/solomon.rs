//! Loader for the classic Solomon VRPTW text format (`VEHICLE` /
//! `CAPACITY` header, then a `CUSTOMER` table). Node 0 is always the
//! depot. Travel time and cost both come from Euclidean distance, rounded
//! to 2 decimals as the cited ground-truth loader does, since the format
//! carries no separate cost field. Each row's `close` window is prolonged
//! by its own `service_time`, matching the source format's assumption
//! that `due_date` marks the latest *arrival*, not the latest moment
//! service may finish.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Parameters;
use crate::error::{CvrptwError, Result};
use crate::instance::model::{ArcData, Instance, Node, NodeType, Order};

struct Row {
    idx: usize,
    x: f64,
    y: f64,
    demand: f64,
    ready: f64,
    due: f64,
    service: f64,
}

/// Parses a Solomon-format file into an `Instance`, overriding
/// `truck_capacity` and `fleet_size` from the file's `VEHICLE` section
/// unless `parameters` already carries non-default values for them.
pub fn load_solomon_file(filepath: &str, mut parameters: Parameters) -> Result<Instance> {
    let path = Path::new(filepath);
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let lines: Vec<Vec<String>> = reader
        .lines()
        .filter_map(|line| line.ok())
        .map(|line| {
            line.split_whitespace()
                .map(|token| token.to_owned())
                .collect::<Vec<String>>()
        })
        .filter(|tokens| !tokens.is_empty())
        .collect();

    let vehicle_header = lines
        .iter()
        .position(|tokens| tokens.first().map(|t| t.as_str()) == Some("VEHICLE"))
        .ok_or_else(|| CvrptwError::SchemaInvalid("missing VEHICLE section".to_owned()))?;

    let vehicle_values = lines
        .get(vehicle_header + 2)
        .ok_or_else(|| CvrptwError::SchemaInvalid("truncated VEHICLE section".to_owned()))?;
    let fleet_size: usize = vehicle_values
        .first()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| CvrptwError::SchemaInvalid("cannot parse NUMBER OF VEHICLES".to_owned()))?;
    let truck_capacity: f64 = vehicle_values
        .get(1)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| CvrptwError::SchemaInvalid("cannot parse CAPACITY".to_owned()))?;

    parameters.fleet_size = fleet_size;
    parameters.truck_capacity = truck_capacity;

    let customer_header = lines
        .iter()
        .position(|tokens| tokens.first().map(|t| t.as_str()) == Some("CUSTOMER"))
        .ok_or_else(|| CvrptwError::SchemaInvalid("missing CUSTOMER section".to_owned()))?;

    // Skip the "CUSTOMER" line and the column-name line that follows it.
    let data_start = customer_header + 2;
    let mut rows = Vec::new();
    for tokens in &lines[data_start..] {
        if tokens.len() < 7 {
            continue;
        }
        let parse = |i: usize| -> Result<f64> {
            tokens[i]
                .parse()
                .map_err(|_| CvrptwError::SchemaInvalid(format!("cannot parse field {}", tokens[i])))
        };
        rows.push(Row {
            idx: tokens[0]
                .parse()
                .map_err(|_| CvrptwError::SchemaInvalid(format!("cannot parse customer id {}", tokens[0])))?,
            x: parse(1)?,
            y: parse(2)?,
            demand: parse(3)?,
            ready: parse(4)?,
            due: parse(5)?,
            service: parse(6)?,
        });
    }

    if rows.is_empty() {
        return Err(CvrptwError::SchemaInvalid("no customer rows found".to_owned()));
    }

    let mut nodes = Vec::with_capacity(rows.len());
    let mut orders = Vec::new();
    for row in &rows {
        let node_type = if row.idx == 0 {
            NodeType::Depot
        } else {
            NodeType::Customer
        };
        nodes.push(Node {
            idx: row.idx,
            node_type,
            lat: row.x,
            long: row.y,
            open: row.ready,
            close: row.due + row.service,
            service_time: row.service,
        });
        if row.idx != 0 {
            orders.push(Order {
                node_idx: row.idx,
                weight: row.demand,
            });
        }
    }

    let mut arcs = Vec::with_capacity(rows.len() * rows.len());
    for a in &rows {
        for b in &rows {
            if a.idx == b.idx {
                continue;
            }
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            // Truncated to 2 decimals, matching the cited ground-truth
            // loader's `np.round(dists, 2)`.
            let distance = ((dx * dx + dy * dy).sqrt() * 100.0).round() / 100.0;
            arcs.push((
                (a.idx, b.idx),
                ArcData {
                    travel_time: distance,
                    cost: distance,
                },
            ));
        }
    }

    Instance::new(nodes, arcs, orders, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
TEST

VEHICLE
NUMBER     CAPACITY
  2         200

CUSTOMER
CUST NO.  XCOORD.   YCOORD.   DEMAND   READY TIME  DUE DATE   SERVICE TIME

    0      40         50          0          0        100          0
    1      45         68         10         20         30         10
    2      45         70         30         10         40         10
";

    fn write_fixture() -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("cvrptw_cg_solomon_fixture_{:?}.txt", std::thread::current().id()));
        std::fs::write(&path, FIXTURE).expect("failed to write fixture file");
        path
    }

    #[test]
    fn parses_vehicle_header_into_parameters() {
        let path = write_fixture();
        let instance = load_solomon_file(path.to_str().unwrap(), Parameters::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(instance.parameters.fleet_size, 2);
        assert_eq!(instance.parameters.truck_capacity, 200.0);
    }

    #[test]
    fn parses_customer_rows_with_depot_first() {
        let path = write_fixture();
        let instance = load_solomon_file(path.to_str().unwrap(), Parameters::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(instance.n(), 3);
        assert!(instance.node(0).is_depot());
        assert_eq!(instance.customers().count(), 2);
        assert_eq!(instance.weight(1), 10.0);
        assert_eq!(instance.weight(2), 30.0);
    }

    #[test]
    fn close_window_is_prolonged_by_service_time() {
        // Customer 1's row is `ready=20 due=30 service=10`: the stored
        // `close` must be `due + service = 40`, not the raw `due = 30`,
        // per the source format's assumption that `due_date` bounds
        // arrival, not service completion.
        let path = write_fixture();
        let instance = load_solomon_file(path.to_str().unwrap(), Parameters::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(instance.node(1).open, 20.0);
        assert_eq!(instance.node(1).close, 40.0);
        assert_eq!(instance.node(2).open, 10.0);
        assert_eq!(instance.node(2).close, 50.0);
    }

    #[test]
    fn arc_costs_are_euclidean_distance_rounded_to_2_decimals() {
        let path = write_fixture();
        let instance = load_solomon_file(path.to_str().unwrap(), Parameters::default()).unwrap();
        std::fs::remove_file(&path).ok();

        let dx = 45.0_f64 - 40.0;
        let dy = 68.0_f64 - 50.0;
        let expected = ((dx * dx + dy * dy).sqrt() * 100.0).round() / 100.0;
        let arc = instance.arc(0, 1);
        assert!((arc.travel_time - expected).abs() < 1e-9);
        assert!((arc.cost - expected).abs() < 1e-9);
    }

    #[test]
    fn lat_long_match_x_y_coordinates_not_swapped() {
        let path = write_fixture();
        let instance = load_solomon_file(path.to_str().unwrap(), Parameters::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(instance.node(1).lat, 45.0);
        assert_eq!(instance.node(1).long, 68.0);
    }
}
