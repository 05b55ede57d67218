//! Pure predicates over an ordered customer sequence. Side-effect free and
//! referentially transparent: no logging, no instance mutation.

use crate::instance::{Instance, NodeIdx};
use crate::utils::FloatCompare;

/// Walks the sequence from the depot and back, accumulating arrival times
/// with the same recurrence used to reconstruct arrival times for output.
/// Returns `None` if any stop (including the return-to-depot arc) would
/// finish after its close time.
pub fn arrival_times(instance: &Instance, sequence: &[NodeIdx]) -> Option<Vec<f64>> {
    let depot = instance.depot_idx();
    let mut finish = 0.0_f64;
    let mut last = depot;
    let mut arrivals = Vec::with_capacity(sequence.len() + 2);
    arrivals.push(0.0);

    for &customer in sequence {
        let travel = instance.arc(last, customer).travel_time;
        let node = instance.node(customer);
        let service_start = (finish + travel).max(node.open);
        finish = service_start + node.service_time;
        if finish.approx_gt(node.close) {
            return None;
        }
        arrivals.push(service_start);
        last = customer;
    }

    let travel_home = instance.arc(last, depot).travel_time;
    let depot_node = instance.node(depot);
    finish += travel_home;
    if finish.approx_gt(depot_node.close) {
        return None;
    }
    arrivals.push(finish);

    Some(arrivals)
}

pub fn time_feasible(instance: &Instance, sequence: &[NodeIdx]) -> bool {
    arrival_times(instance, sequence).is_some()
}

pub fn capacity_feasible(instance: &Instance, sequence: &[NodeIdx]) -> bool {
    let total: f64 = sequence.iter().map(|&c| instance.weight(c)).sum();
    total.approx_lte(instance.parameters.truck_capacity)
}

pub fn feasible(instance: &Instance, sequence: &[NodeIdx]) -> bool {
    capacity_feasible(instance, sequence) && time_feasible(instance, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::fixtures::toy_instance;

    #[test]
    fn toy_singleton_routes_are_feasible() {
        let instance = toy_instance();
        assert!(feasible(&instance, &[1]));
        assert!(feasible(&instance, &[2]));
    }

    #[test]
    fn toy_preferred_order_is_feasible() {
        let instance = toy_instance();
        assert!(feasible(&instance, &[2, 1]));
    }

    #[test]
    fn disjoint_tight_windows_are_infeasible_together() {
        use crate::config::Parameters;
        use crate::instance::{ArcData, Instance, Node, NodeType, Order};

        // depot open all day; customer 1 window [0,5]; customer 2 window
        // [6,8] but travel(1,2) = 10 makes both unreachable in one route.
        let nodes = vec![
            Node {
                idx: 0,
                node_type: NodeType::Depot,
                lat: 0.0,
                long: 0.0,
                open: 0.0,
                close: 100.0,
                service_time: 0.0,
            },
            Node {
                idx: 1,
                node_type: NodeType::Customer,
                lat: 0.0,
                long: 0.0,
                open: 0.0,
                close: 5.0,
                service_time: 0.0,
            },
            Node {
                idx: 2,
                node_type: NodeType::Customer,
                lat: 0.0,
                long: 0.0,
                open: 6.0,
                close: 8.0,
                service_time: 0.0,
            },
        ];
        let cheap = ArcData {
            travel_time: 1.0,
            cost: 1.0,
        };
        let far = ArcData {
            travel_time: 10.0,
            cost: 10.0,
        };
        let arcs = vec![
            ((0, 1), cheap),
            ((1, 0), cheap),
            ((0, 2), cheap),
            ((2, 0), cheap),
            ((1, 2), far),
            ((2, 1), far),
        ];
        let orders = vec![
            Order {
                node_idx: 1,
                weight: 1.0,
            },
            Order {
                node_idx: 2,
                weight: 1.0,
            },
        ];
        let instance = Instance::new(nodes, arcs, orders, Parameters::default()).unwrap();
        assert!(!feasible(&instance, &[1, 2]));
        assert!(!feasible(&instance, &[2, 1]));
        assert!(feasible(&instance, &[1]));
        assert!(feasible(&instance, &[2]));
    }
}
