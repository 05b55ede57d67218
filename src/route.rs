use std::fmt;

use crate::instance::{Instance, NodeIdx};

pub type RouteId = usize;

/// An ordered `(depot, c1, .., ck, depot)` sequence. Immutable once built;
/// `cost` is the sum of arc costs along the sequence and `arrivals` holds
/// the service-start time at every stop, including both depot visits.
#[derive(Clone, Debug)]
pub struct Route {
    /// Customer stops only, depot implicit at both ends.
    pub customers: Vec<NodeIdx>,
    pub cost: f64,
    pub arrivals: Vec<f64>,
}

impl Route {
    pub fn new(customers: Vec<NodeIdx>, cost: f64, arrivals: Vec<f64>) -> Self {
        Self {
            customers,
            cost,
            arrivals,
        }
    }

    /// Full stop sequence including the depot at both ends.
    pub fn stops(&self, instance: &Instance) -> Vec<NodeIdx> {
        let depot = instance.depot_idx();
        let mut stops = Vec::with_capacity(self.customers.len() + 2);
        stops.push(depot);
        stops.extend_from_slice(&self.customers);
        stops.push(depot);
        stops
    }

    pub fn total_weight(&self, instance: &Instance) -> f64 {
        self.customers.iter().map(|&c| instance.weight(c)).sum()
    }

    pub fn contains(&self, customer: NodeIdx) -> bool {
        self.customers.contains(&customer)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "depot")?;
        for c in &self.customers {
            write!(f, " -> {}", c)?;
        }
        write!(f, " -> depot (cost {:.2})", self.cost)
    }
}

/// Monotonically growing `route_id -> Route` mapping. Ids are dense and
/// assigned on insertion; routes are never removed.
#[derive(Clone, Debug, Default)]
pub struct RoutePool {
    routes: Vec<Route>,
}

impl RoutePool {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn insert(&mut self, route: Route) -> RouteId {
        let id = self.routes.len();
        self.routes.push(route);
        id
    }

    pub fn get(&self, id: RouteId) -> &Route {
        &self.routes[id]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouteId, &Route)> {
        self.routes.iter().enumerate()
    }

    /// True iff every customer in the instance appears in at least one
    /// pooled route (invariant 2 in §8).
    pub fn covers_all_customers(&self, instance: &Instance) -> bool {
        instance
            .customers()
            .all(|c| self.routes.iter().any(|route| route.contains(c)))
    }
}
