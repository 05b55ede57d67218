//! The toy instance used throughout the test suite: a depot and two
//! customers with disjoint-ish windows and asymmetric arc costs. Mirrors
//! the sample data set historically shipped alongside this solver.

use crate::config::Parameters;
use crate::instance::model::{ArcData, Instance, Node, NodeType, Order};

pub fn toy_instance() -> Instance {
    let nodes = vec![
        Node {
            idx: 0,
            node_type: NodeType::Depot,
            lat: 39.91,
            long: -76.5,
            open: 0.0,
            close: 24.0,
            service_time: 0.0,
        },
        Node {
            idx: 1,
            node_type: NodeType::Customer,
            lat: 39.91,
            long: -74.61,
            open: 13.0,
            close: 21.0,
            service_time: 0.0,
        },
        Node {
            idx: 2,
            node_type: NodeType::Customer,
            lat: 39.78,
            long: -75.27,
            open: 7.0,
            close: 15.0,
            service_time: 0.0,
        },
    ];

    let arcs = vec![
        (
            (0, 1),
            ArcData {
                travel_time: 2.363_916_373_981_065_4,
                cost: 618.195_818_699_053_2,
            },
        ),
        (
            (1, 0),
            ArcData {
                travel_time: 2.363_916_373_981_065_4,
                cost: 118.195_818_699_053_28,
            },
        ),
        (
            (0, 2),
            ArcData {
                travel_time: 1.554_418_216_453_099_5,
                cost: 577.720_910_822_655,
            },
        ),
        (
            (2, 0),
            ArcData {
                travel_time: 1.554_418_216_453_099_5,
                cost: 77.720_910_822_654_97,
            },
        ),
        (
            (1, 2),
            ArcData {
                travel_time: 0.853_048_419_193_608,
                cost: 42.652_420_959_680_4,
            },
        ),
        (
            (2, 1),
            ArcData {
                travel_time: 0.853_048_419_193_608,
                cost: 42.652_420_959_680_4,
            },
        ),
    ];

    let orders = vec![
        Order {
            node_idx: 1,
            weight: 13084.0,
        },
        Order {
            node_idx: 2,
            weight: 8078.0,
        },
    ];

    let mut parameters = Parameters::default();
    parameters.fleet_size = 2;

    Instance::new(nodes, arcs, orders, parameters).expect("toy instance is internally consistent")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::feasible;

    #[test]
    fn toy_instance_builds_and_covers_both_customers() {
        let instance = toy_instance();
        assert_eq!(instance.n(), 3);
        assert_eq!(instance.customers().count(), 2);
    }

    #[test]
    fn toy_instance_single_truck_tour_is_feasible() {
        let instance = toy_instance();
        assert!(feasible(&instance, &[2, 1]));
    }
}
