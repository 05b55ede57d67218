use std::collections::HashMap;

use crate::config::Parameters;
use crate::error::{CvrptwError, Result};
use crate::utils::{FloatCompare, Matrix};

pub type NodeIdx = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Depot,
    Customer,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub idx: NodeIdx,
    pub node_type: NodeType,
    pub lat: f64,
    pub long: f64,
    pub open: f64,
    pub close: f64,
    pub service_time: f64,
}

impl Node {
    pub fn is_depot(&self) -> bool {
        self.node_type == NodeType::Depot
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ArcData {
    pub travel_time: f64,
    pub cost: f64,
}

impl ArcData {
    /// Sentinel used for node pairs with no arc in the input graph.
    /// Equivalent to a prohibitively expensive arc per the data model.
    pub const MISSING: ArcData = ArcData {
        travel_time: f64::INFINITY,
        cost: f64::INFINITY,
    };
}

#[derive(Clone, Debug)]
pub struct Order {
    pub node_idx: NodeIdx,
    pub weight: f64,
}

/// Immutable, validated graph + orders + parameters. Constructed once and
/// read-only for the lifetime of a solve.
#[derive(Debug)]
pub struct Instance {
    nodes: Vec<Node>,
    arcs: Matrix<ArcData>,
    orders: HashMap<NodeIdx, Order>,
    depot_idx: NodeIdx,
    pub parameters: Parameters,
}

impl Instance {
    /// Builds and validates an `Instance` from raw node/arc/order data.
    ///
    /// Performs the "advanced data checks" the original source runs after
    /// schema validation: exactly one depot, every order weight within
    /// capacity, and node/order counts differing by exactly one.
    pub fn new(
        nodes: Vec<Node>,
        arcs: Vec<((NodeIdx, NodeIdx), ArcData)>,
        orders: Vec<Order>,
        parameters: Parameters,
    ) -> Result<Self> {
        let n = nodes.len();
        for node in &nodes {
            if node.idx >= n {
                return Err(CvrptwError::SchemaInvalid(format!(
                    "node index {} out of range for {} nodes",
                    node.idx, n
                )));
            }
            if node.open + node.service_time > node.close {
                return Err(CvrptwError::SchemaInvalid(format!(
                    "node {} has open + service_time > close",
                    node.idx
                )));
            }
        }

        let depots: Vec<NodeIdx> = nodes
            .iter()
            .filter(|node| node.is_depot())
            .map(|node| node.idx)
            .collect();
        if depots.len() != 1 {
            return Err(CvrptwError::SchemaInvalid(format!(
                "expected exactly one depot, found {}",
                depots.len()
            )));
        }
        let depot_idx = depots[0];

        if n - orders.len() != 1 {
            return Err(CvrptwError::SchemaInvalid(format!(
                "expected |nodes| - |orders| == 1, got {} nodes and {} orders",
                n,
                orders.len()
            )));
        }

        let truck_capacity = parameters.truck_capacity;
        for order in &orders {
            if order.weight > truck_capacity {
                return Err(CvrptwError::SchemaInvalid(format!(
                    "order for node {} weighs {} > truck_capacity {}",
                    order.node_idx, order.weight, truck_capacity
                )));
            }
        }

        let mut sorted_nodes = nodes;
        sorted_nodes.sort_by_key(|node| node.idx);

        let mut arc_matrix = Matrix::filled(ArcData::MISSING, n, n);
        for ((i, j), data) in arcs {
            arc_matrix.set(i, j, data);
        }

        let orders_by_idx = orders
            .into_iter()
            .map(|order| (order.node_idx, order))
            .collect();

        let instance = Self {
            nodes: sorted_nodes,
            arcs: arc_matrix,
            orders: orders_by_idx,
            depot_idx,
            parameters,
        };

        instance.check_reachability()?;
        Ok(instance)
    }

    /// `InstanceInfeasible` boundary check: every customer must be reachable
    /// from the depot within its own time window even as a singleton route.
    fn check_reachability(&self) -> Result<()> {
        for (&idx, _) in self.orders.iter() {
            let node = self.node(idx);
            let arc = self.arc(self.depot_idx, idx);
            let earliest_finish = arc.travel_time.max(node.open) + node.service_time;
            if earliest_finish.approx_gt(node.close) {
                return Err(CvrptwError::InstanceInfeasible(format!(
                    "node {} cannot be served within its window even alone",
                    idx
                )));
            }
        }
        Ok(())
    }

    pub fn n(&self) -> usize {
        self.nodes.len()
    }

    pub fn depot_idx(&self) -> NodeIdx {
        self.depot_idx
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn customers(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.nodes
            .iter()
            .filter(|node| !node.is_depot())
            .map(|node| node.idx)
    }

    pub fn arc(&self, i: NodeIdx, j: NodeIdx) -> ArcData {
        self.arcs.get(i, j)
    }

    pub fn order(&self, idx: NodeIdx) -> &Order {
        &self.orders[&idx]
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn weight(&self, idx: NodeIdx) -> f64 {
        self.orders.get(&idx).map(|order| order.weight).unwrap_or(0.0)
    }

    /// Big-M from §4.5: one plus the worst-case slack any arc could force a
    /// service-start time to absorb while still respecting time windows.
    pub fn big_m(&self) -> f64 {
        let mut m = 0.0_f64;
        for i in 0..self.n() {
            for j in 0..self.n() {
                if i == j {
                    continue;
                }
                let arc = self.arcs.get(i, j);
                if !arc.travel_time.is_finite() {
                    continue;
                }
                let node_i = &self.nodes[i];
                let value = node_i.close + arc.travel_time + node_i.service_time - node_i.open;
                if value > m {
                    m = value;
                }
            }
        }
        m + 1.0
    }
}
