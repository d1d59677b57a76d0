//! City directory
//!
//! Cities keep the index they were created with for the lifetime of the
//! directory. Names are unique case-insensitively and never contain digits,
//! which is what lets an all-digit token always mean an index.

use crate::errors::{NetworkError, Result};

/// Largest index a city may carry; always fits the 10-wide index column
pub const MAX_CITY_INDEX: usize = 999_999_999;

/// Joins the two city names of a road label
pub const ROAD_SEPARATOR: &str = " - ";

/// A named location with a stable index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub index: usize,
    pub name: String,
}

impl City {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Ordered list of cities, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityDirectory {
    cities: Vec<City>,
}

impl CityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next added city will receive
    pub fn next_index(&self) -> Result<usize> {
        let Some(max) = self.cities.iter().map(|c| c.index).max() else {
            return Ok(1);
        };
        max.checked_add(1)
            .filter(|next| *next <= MAX_CITY_INDEX)
            .ok_or_else(|| NetworkError::InvalidIndex {
                index: max,
                reason: "no higher city index is available".to_string(),
            })
    }

    /// Validate `name`, assign the next index and append
    pub fn add(&mut self, name: &str) -> Result<City> {
        let name = validate_city_name(name, self)?;
        let city = City::new(self.next_index()?, name);
        self.cities.push(city.clone());
        Ok(city)
    }

    /// Append a city with an index chosen elsewhere (persisted tables)
    pub fn insert(&mut self, city: City) -> Result<()> {
        let invalid = |reason: String| NetworkError::InvalidIndex {
            index: city.index,
            reason,
        };
        if city.index == 0 {
            return Err(invalid("city index must be positive".to_string()));
        }
        if city.index > MAX_CITY_INDEX {
            return Err(invalid(format!("city index must not exceed {}", MAX_CITY_INDEX)));
        }
        if self.get(city.index).is_some() {
            return Err(NetworkError::DuplicateIndex(city.index));
        }
        let name = validate_city_name(&city.name, self)?;
        self.cities.push(City::new(city.index, name));
        Ok(())
    }

    /// Resolve a textual index or a case-insensitive name to an index.
    ///
    /// All-digit tokens are only ever matched against indices.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            let index: usize = token.parse().ok()?;
            return self.get(index).map(|c| c.index);
        }

        let wanted = token.to_lowercase();
        self.cities
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .map(|c| c.index)
    }

    /// Replace the name of `index`, returning the previous name
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<String> {
        let new_name = validate_city_name(new_name, self)?;
        let city = self
            .cities
            .iter_mut()
            .find(|c| c.index == index)
            .ok_or_else(|| NetworkError::CityNotFound(index.to_string()))?;
        Ok(std::mem::replace(&mut city.name, new_name))
    }

    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.iter().find(|c| c.index == index)
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.get(index).map(|c| c.name.as_str())
    }

    /// Case-insensitive name lookup
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.cities.iter().any(|c| c.name.to_lowercase() == wanted)
    }

    pub fn list(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Check a raw city name against the naming rules and the existing directory.
///
/// Returns the trimmed, case-preserved name.
pub fn validate_city_name(raw: &str, directory: &CityDirectory) -> Result<String> {
    let name = raw.trim();
    let reject = |reason: String| NetworkError::InvalidCityName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(reject("City name cannot be empty.".to_string()));
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(reject("City name cannot contain numbers.".to_string()));
    }
    if name.chars().any(char::is_control) {
        return Err(reject("City name cannot contain control characters.".to_string()));
    }
    // Padded so that "A -" and "- B" are caught too: either would make a
    // road label split in more than one place.
    if format!(" {} ", name).contains(ROAD_SEPARATOR) {
        return Err(reject(format!(
            "City name cannot contain the road separator '{}'.",
            ROAD_SEPARATOR
        )));
    }
    if directory.contains_name(name) {
        return Err(reject(format!("City '{}' already exists.", name)));
    }

    Ok(name.to_string())
}
