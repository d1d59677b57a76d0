//! Network aggregate
//!
//! Owns the city directory and the road graph and keeps them consistent:
//! roads only ever reference registered cities, and every name shown for a
//! road is read from the directory at the time it is asked for.

pub mod city;
pub mod road;

pub use city::{validate_city_name, City, CityDirectory, MAX_CITY_INDEX, ROAD_SEPARATOR};
pub use road::{round_to_cents, Edge, Road, RoadGraph};

use crate::errors::{NetworkError, Result};

/// Default limit on the total number of registered cities
pub const DEFAULT_MAX_CITIES: usize = 20;

/// Cities, roads and the capacity limit they live under
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    cities: CityDirectory,
    roads: RoadGraph,
    max_cities: usize,
}

impl Network {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CITIES)
    }

    pub fn with_capacity(max_cities: usize) -> Self {
        Self {
            cities: CityDirectory::new(),
            roads: RoadGraph::new(),
            max_cities,
        }
    }

    pub fn cities(&self) -> &CityDirectory {
        &self.cities
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.roads
    }

    pub fn capacity(&self) -> usize {
        self.max_cities
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_cities.saturating_sub(self.cities.len())
    }

    fn ensure_capacity(&self) -> Result<()> {
        if self.remaining_capacity() == 0 {
            return Err(NetworkError::CapacityExceeded {
                current: self.cities.len(),
                max: self.max_cities,
            });
        }
        Ok(())
    }

    /// Register a new city under the next sequential index
    pub fn add_city(&mut self, name: &str) -> Result<City> {
        self.ensure_capacity()?;
        self.cities.add(name)
    }

    /// Register a city whose index was assigned in an earlier run
    pub fn insert_city(&mut self, city: City) -> Result<()> {
        self.ensure_capacity()?;
        self.cities.insert(city)
    }

    /// Resolve an index or name token to a registered index
    pub fn resolve(&self, token: &str) -> Result<usize> {
        self.cities
            .resolve(token)
            .ok_or_else(|| NetworkError::CityNotFound(token.trim().to_string()))
    }

    fn require(&self, index: usize) -> Result<&City> {
        self.cities
            .get(index)
            .ok_or_else(|| NetworkError::CityNotFound(index.to_string()))
    }

    /// Build a road between two registered cities, returning its record
    pub fn connect(&mut self, a: usize, b: usize) -> Result<Road> {
        let city1 = self.require(a)?.name.clone();
        let city2 = self.require(b)?.name.clone();
        self.roads.connect(a, b)?;
        Ok(Road {
            city1,
            city2,
            budget: 0.0,
        })
    }

    pub fn set_budget(&mut self, a: usize, b: usize, amount: f64) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        self.roads.set_budget(a, b, amount)
    }

    /// Rename a city. Roads are index-keyed, so every road record produced
    /// afterwards carries the new name. Returns the previous name.
    pub fn rename_city(&mut self, index: usize, new_name: &str) -> Result<String> {
        self.cities.rename(index, new_name)
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.roads.is_connected(a, b)
    }

    /// `(neighbor name, budget)` for every city adjacent to `index`, ascending by index
    pub fn neighbors(&self, index: usize) -> Vec<(String, f64)> {
        self.roads
            .neighbors(index)
            .into_iter()
            .filter_map(|(other, budget)| {
                self.cities
                    .name_of(other)
                    .map(|name| (name.to_string(), budget))
            })
            .collect()
    }

    /// Road records in creation order, named with current city names
    pub fn roads(&self) -> Vec<Road> {
        self.roads
            .edges()
            .iter()
            .filter_map(|edge| {
                let city1 = self.cities.name_of(edge.from)?;
                let city2 = self.cities.name_of(edge.to)?;
                Some(Road {
                    city1: city1.to_string(),
                    city2: city2.to_string(),
                    budget: edge.budget,
                })
            })
            .collect()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// Connection matrix over the cities in listing order
    pub fn adjacency_matrix(&self) -> Vec<Vec<bool>> {
        let list = self.cities.list();
        list.iter()
            .map(|row| {
                list.iter()
                    .map(|col| self.roads.is_connected(row.index, col.index))
                    .collect()
            })
            .collect()
    }

    /// Budget matrix over the cities in listing order; `None` where no road exists
    pub fn budget_matrix(&self) -> Vec<Vec<Option<f64>>> {
        let list = self.cities.list();
        list.iter()
            .map(|row| {
                list.iter()
                    .map(|col| self.roads.budget(row.index, col.index))
                    .collect()
            })
            .collect()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
