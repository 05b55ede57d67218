//! Initial route constructor (§4.3): seed selection, greedy insertion,
//! then a single merge pass. Produces a `RoutePool` covering every
//! customer or fails with `ConstructionImpossible`.

use crate::compat::TwMatrix;
use crate::error::{CvrptwError, Result};
use crate::feasibility::{arrival_times, feasible};
use crate::instance::{Instance, NodeIdx};
use crate::route::{Route, RoutePool};

pub fn construct_initial_routes(instance: &Instance) -> Result<RoutePool> {
    let tw = TwMatrix::build(instance);
    let big = 100.0 * tw.max_finite();

    let mut customers: Vec<NodeIdx> = instance.customers().collect();
    customers.sort_by(|&a, &b| seed_value(instance, &tw, big, a).partial_cmp(&seed_value(instance, &tw, big, b)).unwrap());

    let fleet_size = instance.parameters.fleet_size;
    let (seeds, queue) = if customers.len() <= fleet_size {
        (customers.clone(), Vec::new())
    } else {
        (customers[..fleet_size].to_vec(), customers[fleet_size..].to_vec())
    };

    let mut routes: Vec<Vec<NodeIdx>> = seeds.into_iter().map(|c| vec![c]).collect();

    for customer in queue {
        match best_insertion(instance, &tw, &routes, customer) {
            Some((route_idx, position)) => {
                routes[route_idx].insert(position, customer);
            }
            None => return Err(CvrptwError::ConstructionImpossible { customer }),
        }
    }

    let merged = merge_pass(instance, &tw, routes);

    let mut pool = RoutePool::new();
    for sequence in merged {
        let cost = route_cost(instance, &sequence);
        let arrivals = arrival_times(instance, &sequence)
            .expect("constructor only ever produces feasible sequences");
        pool.insert(Route::new(sequence, cost, arrivals));
    }
    Ok(pool)
}

/// `seed_value(i) = Σ_{j≠i} (2·TW'[i,j] + TW'[j,i])`, with `-∞` replaced
/// by `-big` before summation.
fn seed_value(instance: &Instance, tw: &TwMatrix, big: f64, i: NodeIdx) -> f64 {
    let mut total = 0.0;
    for j in 0..instance.n() {
        if i == j {
            continue;
        }
        total += 2.0 * tw.finite_or(i, j, big) + tw.finite_or(j, i, big);
    }
    total
}

fn route_cost(instance: &Instance, customers: &[NodeIdx]) -> f64 {
    let depot = instance.depot_idx();
    let mut cost = 0.0;
    let mut last = depot;
    for &c in customers {
        cost += instance.arc(last, c).cost;
        last = c;
    }
    cost += instance.arc(last, depot).cost;
    cost
}

fn adjacent_tw_finite(tw: &TwMatrix, stops: &[NodeIdx]) -> bool {
    stops.windows(2).all(|pair| tw.is_finite(pair[0], pair[1]))
}

/// Evaluates every insertion position across every route, returning the
/// admissible `(route_idx, position)` of minimum cost; ties broken by
/// lowest route index (routes are scanned in index order).
fn best_insertion(
    instance: &Instance,
    tw: &TwMatrix,
    routes: &[Vec<NodeIdx>],
    customer: NodeIdx,
) -> Option<(usize, usize)> {
    let depot = instance.depot_idx();
    let capacity = instance.parameters.truck_capacity;
    let demand = instance.weight(customer);
    let service = instance.node(customer).service_time;

    let mut best: Option<(usize, usize, f64)> = None;

    for (route_idx, route) in routes.iter().enumerate() {
        let weight: f64 = route.iter().map(|&c| instance.weight(c)).sum();
        if weight + demand > capacity {
            continue;
        }

        for position in 0..=route.len() {
            let cost = if position == 0 {
                let first = route[0];
                instance.arc(depot, customer).cost + service + instance.arc(customer, first).cost
                    - instance.arc(depot, first).cost
            } else if position == route.len() {
                let last = route[route.len() - 1];
                instance.arc(last, customer).cost + service
            } else {
                let prev = route[position - 1];
                let next = route[position];
                instance.arc(prev, customer).cost + instance.arc(customer, next).cost
                    - instance.arc(prev, next).cost
                    + service
            };

            let mut prospective = route.clone();
            prospective.insert(position, customer);

            let mut stops = Vec::with_capacity(prospective.len() + 2);
            stops.push(depot);
            stops.extend_from_slice(&prospective);
            stops.push(depot);

            if !adjacent_tw_finite(tw, &stops) {
                continue;
            }
            if !feasible(instance, &prospective) {
                continue;
            }

            let better = match &best {
                None => true,
                Some((_, _, best_cost)) => cost < *best_cost,
            };
            if better {
                best = Some((route_idx, position, cost));
            }
        }
    }

    best.map(|(route_idx, position, _)| (route_idx, position))
}

/// One greedy pass over all unordered route pairs: tries `A ++ B` then,
/// if that's inadmissible, `B ++ A`; a route participates in at most one
/// merge per pass.
fn merge_pass(instance: &Instance, tw: &TwMatrix, routes: Vec<Vec<NodeIdx>>) -> Vec<Vec<NodeIdx>> {
    let n = routes.len();
    let mut used = vec![false; n];
    let mut result = Vec::new();

    for a in 0..n {
        if used[a] {
            continue;
        }
        let mut merged_with = None;
        for b in 0..n {
            if a == b || used[b] {
                continue;
            }
            let last_a = *routes[a].last().unwrap();
            let first_b = routes[b][0];
            if tw.is_finite(last_a, first_b) {
                let mut combined = routes[a].clone();
                combined.extend_from_slice(&routes[b]);
                if feasible(instance, &combined) {
                    merged_with = Some((b, combined));
                    break;
                }
            }

            let last_b = *routes[b].last().unwrap();
            let first_a = routes[a][0];
            if tw.is_finite(last_b, first_a) {
                let mut combined = routes[b].clone();
                combined.extend_from_slice(&routes[a]);
                if feasible(instance, &combined) {
                    merged_with = Some((b, combined));
                    break;
                }
            }
        }

        match merged_with {
            Some((b, combined)) => {
                used[a] = true;
                used[b] = true;
                result.push(combined);
            }
            None => {
                used[a] = true;
                result.push(routes[a].clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::fixtures::toy_instance;

    #[test]
    fn toy_instance_construction_covers_both_customers() {
        let instance = toy_instance();
        let pool = construct_initial_routes(&instance).unwrap();
        assert!(pool.covers_all_customers(&instance));
    }

    #[test]
    fn every_constructed_route_is_feasible() {
        let instance = toy_instance();
        let pool = construct_initial_routes(&instance).unwrap();
        for (_, route) in pool.iter() {
            assert!(feasible(&instance, &route.customers));
        }
    }
}
