//! Road graph
//!
//! Roads are stored once per unordered city pair, keyed by city index.
//! Adjacency and budget lookups in either direction read the same edge, so
//! the symmetric views can never disagree.

use crate::errors::{NetworkError, Result};
use crate::network::city::ROAD_SEPARATOR;

/// Past this magnitude an f64 has no cent resolution left to round to
const CENT_PRECISION_LIMIT: f64 = 1e13;

/// Round to the two decimals budgets are persisted with
pub fn round_to_cents(amount: f64) -> f64 {
    if amount.fract() == 0.0 || amount.abs() >= CENT_PRECISION_LIMIT {
        return amount;
    }
    (amount * 100.0).round() / 100.0
}

/// An undirected road between two cities, in the endpoint order it was created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub budget: f64,
}

impl Edge {
    fn joins(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite `index`, if `index` is on this edge
    fn opposite(&self, index: usize) -> Option<usize> {
        if self.from == index {
            Some(self.to)
        } else if self.to == index {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Name-bearing road record used for display and persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub city1: String,
    pub city2: String,
    pub budget: f64,
}

impl Road {
    /// `"city1 - city2"`
    pub fn label(&self) -> String {
        format!("{}{}{}", self.city1, ROAD_SEPARATOR, self.city2)
    }
}

/// Edge set in creation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadGraph {
    edges: Vec<Edge>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a road with budget 0
    pub fn connect(&mut self, a: usize, b: usize) -> Result<()> {
        if a == b {
            return Err(NetworkError::SelfLoop { index: a });
        }
        if self.is_connected(a, b) {
            return Err(NetworkError::AlreadyConnected { a, b });
        }
        self.edges.push(Edge {
            from: a,
            to: b,
            budget: 0.0,
        });
        Ok(())
    }

    /// Store `amount`, rounded to cents, as the budget of the road between `a` and `b`
    pub fn set_budget(&mut self, a: usize, b: usize, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(NetworkError::InvalidBudget(amount));
        }
        let edge = self
            .edges
            .iter_mut()
            .find(|e| e.joins(a, b))
            .ok_or(NetworkError::NotConnected { a, b })?;
        edge.budget = round_to_cents(amount);
        Ok(())
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    /// Budget of the road between `a` and `b`, `None` when there is no road
    pub fn budget(&self, a: usize, b: usize) -> Option<f64> {
        self.edges.iter().find(|e| e.joins(a, b)).map(|e| e.budget)
    }

    /// `(neighbor index, budget)` pairs in ascending neighbor index
    pub fn neighbors(&self, index: usize) -> Vec<(usize, f64)> {
        let mut out: Vec<(usize, f64)> = self
            .edges
            .iter()
            .filter_map(|e| e.opposite(index).map(|other| (other, e.budget)))
            .collect();
        out.sort_by_key(|(other, _)| *other);
        out
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
