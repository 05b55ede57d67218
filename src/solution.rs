//! External output record (§6): a cost/route-count summary plus, for each
//! selected route, the depot-to-depot stop sequence with arrival times.

use serde::Serialize;

use crate::instance::{Instance, NodeIdx};
use crate::route::{RouteId, RoutePool};

#[derive(Clone, Debug, Serialize)]
pub struct Stop {
    pub node_idx: NodeIdx,
    pub arrival: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct SolutionRoute {
    pub stops: Vec<Stop>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub cost: f64,
    pub routes: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct Solution {
    pub summary: Summary,
    pub routes: Vec<SolutionRoute>,
}

impl Solution {
    pub fn build(instance: &Instance, pool: &RoutePool, selected: &[RouteId], cost: f64) -> Self {
        let depot = instance.depot_idx();
        let routes = selected
            .iter()
            .map(|&id| {
                let route = pool.get(id);
                let mut stops = Vec::with_capacity(route.customers.len() + 2);
                stops.push(Stop {
                    node_idx: depot,
                    arrival: route.arrivals[0],
                });
                for (i, &customer) in route.customers.iter().enumerate() {
                    stops.push(Stop {
                        node_idx: customer,
                        arrival: route.arrivals[i + 1],
                    });
                }
                stops.push(Stop {
                    node_idx: depot,
                    arrival: *route.arrivals.last().unwrap(),
                });
                SolutionRoute { stops }
            })
            .collect();

        Solution {
            summary: Summary {
                cost,
                routes: selected.len(),
            },
            routes,
        }
    }
}
