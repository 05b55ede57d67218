//! Boundary scenarios from the solver's test matrix: one instance each for
//! the trivial, capacity-separated, time-window-separated, toy, infeasible,
//! and stagnation cases.

use cvrptw_cg::cg;
use cvrptw_cg::config::Parameters;
use cvrptw_cg::error::CvrptwError;
use cvrptw_cg::instance::fixtures::toy_instance;
use cvrptw_cg::instance::{ArcData, Instance, Node, NodeType, Order};
use cvrptw_cg::solver_highs::HighsSolver;

fn depot(close: f64) -> Node {
    Node {
        idx: 0,
        node_type: NodeType::Depot,
        lat: 0.0,
        long: 0.0,
        open: 0.0,
        close,
        service_time: 0.0,
    }
}

fn customer(idx: usize, open: f64, close: f64) -> Node {
    Node {
        idx,
        node_type: NodeType::Customer,
        lat: 0.0,
        long: 0.0,
        open,
        close,
        service_time: 0.0,
    }
}

fn arc(travel_time: f64, cost: f64) -> ArcData {
    ArcData { travel_time, cost }
}

#[test]
fn scenario_a_trivial_single_customer() {
    let nodes = vec![depot(100.0), customer(1, 0.0, 100.0)];
    let arcs = vec![((0, 1), arc(5.0, 10.0)), ((1, 0), arc(5.0, 10.0))];
    let orders = vec![Order {
        node_idx: 1,
        weight: 100.0,
    }];
    let instance = Instance::new(nodes, arcs, orders, Parameters::default()).unwrap();

    let solution = cg::solve::<HighsSolver>(&instance).unwrap();
    assert_eq!(solution.summary.routes, 1);
    assert!((solution.summary.cost - 20.0).abs() < 1e-4);
    assert_eq!(solution.routes[0].stops.first().unwrap().node_idx, 0);
    assert_eq!(solution.routes[0].stops.last().unwrap().node_idx, 0);
}

#[test]
fn scenario_b_capacity_separation_forces_two_routes() {
    let mut parameters = Parameters::default();
    parameters.truck_capacity = 100.0;

    let nodes = vec![depot(100.0), customer(1, 0.0, 100.0), customer(2, 0.0, 100.0)];
    let arcs = vec![
        ((0, 1), arc(5.0, 10.0)),
        ((1, 0), arc(5.0, 10.0)),
        ((0, 2), arc(5.0, 10.0)),
        ((2, 0), arc(5.0, 10.0)),
        ((1, 2), arc(1.0, 2.0)),
        ((2, 1), arc(1.0, 2.0)),
    ];
    let orders = vec![
        Order {
            node_idx: 1,
            weight: 60.0,
        },
        Order {
            node_idx: 2,
            weight: 60.0,
        },
    ];
    let instance = Instance::new(nodes, arcs, orders, parameters).unwrap();

    let solution = cg::solve::<HighsSolver>(&instance).unwrap();
    assert_eq!(solution.summary.routes, 2);
    assert!(solution.summary.cost >= 40.0 - 1e-6);
}

#[test]
fn scenario_c_time_window_separation_forces_two_routes() {
    let nodes = vec![depot(100.0), customer(1, 0.0, 5.0), customer(2, 6.0, 8.0)];
    let arcs = vec![
        ((0, 1), arc(1.0, 1.0)),
        ((1, 0), arc(1.0, 1.0)),
        ((0, 2), arc(1.0, 1.0)),
        ((2, 0), arc(1.0, 1.0)),
        ((1, 2), arc(10.0, 10.0)),
        ((2, 1), arc(10.0, 10.0)),
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

    let solution = cg::solve::<HighsSolver>(&instance).unwrap();
    assert_eq!(solution.summary.routes, 2);
}

#[test]
fn scenario_d_toy_instance_single_truck_tour() {
    let instance = toy_instance();
    let solution = cg::solve::<HighsSolver>(&instance).unwrap();

    assert_eq!(solution.summary.routes, 1);
    assert!((solution.summary.cost - 738.569_150).abs() < 1e-3);

    let stops: Vec<usize> = solution.routes[0].stops.iter().map(|s| s.node_idx).collect();
    assert_eq!(stops.first().copied(), Some(0));
    assert_eq!(stops.last().copied(), Some(0));
    assert!(stops.contains(&1));
    assert!(stops.contains(&2));
}

#[test]
fn scenario_e_unreachable_customer_is_instance_infeasible() {
    let nodes = vec![depot(10.0), customer(1, 0.0, 10.0)];
    // travel(depot, 1) = 50 alone blows past close = 10.
    let arcs = vec![((0, 1), arc(50.0, 50.0)), ((1, 0), arc(50.0, 50.0))];
    let orders = vec![Order {
        node_idx: 1,
        weight: 1.0,
    }];

    let result = Instance::new(nodes, arcs, orders, Parameters::default());
    assert!(matches!(result, Err(CvrptwError::InstanceInfeasible(_))));
}

#[test]
fn scenario_f_no_improving_column_exits_cg_promptly() {
    // A single customer: after construction the pool already holds the
    // only sensible route, so pricing can never find a negative
    // reduced-cost column and CG must stagnate out immediately.
    let nodes = vec![depot(100.0), customer(1, 0.0, 100.0)];
    let arcs = vec![((0, 1), arc(5.0, 10.0)), ((1, 0), arc(5.0, 10.0))];
    let orders = vec![Order {
        node_idx: 1,
        weight: 1.0,
    }];
    let instance = Instance::new(nodes, arcs, orders, Parameters::default()).unwrap();

    let solution = cg::solve::<HighsSolver>(&instance).unwrap();
    assert_eq!(solution.summary.routes, 1);
    assert!((solution.summary.cost - 20.0).abs() < 1e-4);
}
