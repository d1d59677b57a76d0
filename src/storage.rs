//! Flat-file persistence for the network
//!
//! Two fixed-width text tables: one row per city (index, name) and one row
//! per road (sequence number, "city1 - city2", budget). Roads are written by
//! name and re-attached to city indices when read back.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::NetworkError;
use crate::network::{City, Network, ROAD_SEPARATOR};

/// Paths of the two tables plus the capacity a loaded network gets
#[derive(Debug, Clone)]
pub struct NetworkStore {
    cities_path: PathBuf,
    roads_path: PathBuf,
    max_cities: usize,
}

/// Outcome of `NetworkStore::load`
#[derive(Debug, Default)]
pub struct LoadReport {
    pub cities_loaded: usize,
    pub roads_loaded: usize,
    pub cities_file_found: bool,
    pub roads_file_found: bool,
    /// Rows that were skipped
    pub warnings: Vec<NetworkError>,
    /// Files that exist but could not be read
    pub failures: Vec<String>,
}

/// Outcome of `NetworkStore::save`; each table is written independently
#[derive(Debug)]
pub struct SaveReport {
    pub cities: Result<usize>,
    pub roads: Result<usize>,
}

impl SaveReport {
    pub fn is_ok(&self) -> bool {
        self.cities.is_ok() && self.roads.is_ok()
    }
}

impl NetworkStore {
    pub fn new(cities_path: impl Into<PathBuf>, roads_path: impl Into<PathBuf>, max_cities: usize) -> Self {
        Self {
            cities_path: cities_path.into(),
            roads_path: roads_path.into(),
            max_cities,
        }
    }

    pub fn cities_path(&self) -> &Path {
        &self.cities_path
    }

    pub fn roads_path(&self) -> &Path {
        &self.roads_path
    }

    /// Write both tables, overwriting previous content
    pub fn save(&self, network: &Network) -> SaveReport {
        SaveReport {
            cities: write_table(&self.cities_path, &format_cities(network))
                .map(|_| network.cities().len()),
            roads: write_table(&self.roads_path, &format_roads(network)).map(|_| network.road_count()),
        }
    }

    /// Rebuild a network from whichever tables exist
    pub fn load(&self) -> (Network, LoadReport) {
        let mut network = Network::with_capacity(self.max_cities);
        let mut report = LoadReport::default();

        match read_table(&self.cities_path) {
            Ok(Some(text)) => {
                report.cities_file_found = true;
                let label = file_label(&self.cities_path);
                report.cities_loaded = parse_cities(&text, &label, &mut network, &mut report.warnings);
            }
            Ok(None) => {}
            Err(e) => report.failures.push(format!("{:#}", e)),
        }

        match read_table(&self.roads_path) {
            Ok(Some(text)) => {
                report.roads_file_found = true;
                let label = file_label(&self.roads_path);
                report.roads_loaded = parse_roads(&text, &label, &mut network, &mut report.warnings);
            }
            Ok(None) => {}
            Err(e) => report.failures.push(format!("{:#}", e)),
        }

        (network, report)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_table(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// `Ok(None)` when the file does not exist
fn read_table(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// City table text
pub fn format_cities(network: &Network) -> String {
    let mut out = format!("{:>10}{:>20}\n", "Index", "City_name");
    for city in network.cities().list() {
        out.push_str(&format!("{:>10}{:>20}\n", city.index, city.name));
    }
    out
}

/// Road table text
pub fn format_roads(network: &Network) -> String {
    let mut out = format!("{:>5}{:>25}{:>20}\n", "ID", "Road", "Budget");
    for (i, road) in network.roads().iter().enumerate() {
        out.push_str(&format!("{:>5}{:>25}{:>20.2}\n", i + 1, road.label(), road.budget));
    }
    out
}

/// Data rows start with a number; anything else on the first line is the header
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(number, line)| {
            let first = line.trim_start().chars().next();
            match first {
                None => false,
                Some(c) => *number != 1 || c.is_ascii_digit(),
            }
        })
}

/// Split the leading run of ASCII digits off `text`
fn leading_number(text: &str) -> Option<(usize, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

fn parse_error(file: &str, line: usize, reason: impl Into<String>) -> NetworkError {
    NetworkError::ParseError {
        file: file.to_string(),
        line,
        reason: reason.into(),
    }
}

fn parse_city_line(line: &str) -> std::result::Result<City, String> {
    let (index, rest) =
        leading_number(line.trim_start()).ok_or_else(|| "missing city index".to_string())?;
    let name = rest.trim();
    if name.is_empty() {
        return Err("missing city name".to_string());
    }
    Ok(City::new(index, name))
}

/// Add every city row to `network`, returning how many were accepted
pub fn parse_cities(text: &str, file: &str, network: &mut Network, warnings: &mut Vec<NetworkError>) -> usize {
    let mut loaded = 0;
    for (number, line) in data_lines(text) {
        let accepted = parse_city_line(line)
            .and_then(|city| network.insert_city(city).map_err(|e| e.to_string()));
        match accepted {
            Ok(()) => loaded += 1,
            Err(reason) => warnings.push(parse_error(file, number, reason)),
        }
    }
    loaded
}

/// Split a road row into `(road text, budget)`.
///
/// The budget is the trailing run of digits and dots, starting at its first
/// digit, so it is found even when the columns run together.
fn split_road_line(line: &str) -> std::result::Result<(&str, f64), String> {
    let (_, rest) =
        leading_number(line.trim_start()).ok_or_else(|| "missing road number".to_string())?;
    let rest = rest.trim_end();

    let run_start = rest
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let start = rest[run_start..]
        .find(|c: char| c.is_ascii_digit())
        .map(|i| run_start + i)
        .ok_or_else(|| "missing budget".to_string())?;

    let budget: f64 = rest[start..]
        .parse()
        .ok()
        .filter(|b: &f64| b.is_finite())
        .ok_or_else(|| format!("invalid budget '{}'", &rest[start..]))?;
    Ok((rest[..start].trim(), budget))
}

/// Split a road label into its two registered endpoints.
///
/// City names cannot contain the separator, so a label written by `save`
/// splits in exactly one place.
fn resolve_endpoints(network: &Network, road: &str) -> std::result::Result<(usize, usize), String> {
    let (first, second) = road
        .split_once(ROAD_SEPARATOR)
        .ok_or_else(|| format!("road '{}' has no '{}' separator", road, ROAD_SEPARATOR))?;
    match (network.cities().resolve(first), network.cities().resolve(second)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(format!("road '{}' references an unknown city", road)),
    }
}

/// Add every road row to `network`, returning how many were accepted
pub fn parse_roads(text: &str, file: &str, network: &mut Network, warnings: &mut Vec<NetworkError>) -> usize {
    let mut loaded = 0;
    for (number, line) in data_lines(text) {
        let accepted = split_road_line(line).and_then(|(road, budget)| {
            let (a, b) = resolve_endpoints(network, road)?;
            network.connect(a, b).map_err(|e| e.to_string())?;
            network.set_budget(a, b, budget).map_err(|e| e.to_string())
        });
        match accepted {
            Ok(()) => loaded += 1,
            Err(reason) => warnings.push(parse_error(file, number, reason)),
        }
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Network {
        let mut network = Network::new();
        network.add_city("Kigali").unwrap();
        network.add_city("Huye").unwrap();
        network.add_city("Musanze").unwrap();
        network.connect(1, 2).unwrap();
        network.connect(3, 1).unwrap();
        network.set_budget(1, 2, 5.5).unwrap();
        network
    }

    fn store(dir: &TempDir) -> NetworkStore {
        NetworkStore::new(dir.path().join("cities.txt"), dir.path().join("roads.txt"), 20)
    }

    #[test]
    fn test_format_cities() {
        let text = format_cities(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:>10}{:>20}", "Index", "City_name"));
        assert_eq!(lines[1], format!("{:>10}{:>20}", 1, "Kigali"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_format_roads() {
        let text = format_roads(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:>5}{:>25}{:>20}", "ID", "Road", "Budget"));
        assert_eq!(lines[1], format!("{:>5}{:>25}{:>20}", 1, "Kigali - Huye", "5.50"));
        assert_eq!(lines[2], format!("{:>5}{:>25}{:>20}", 2, "Musanze - Kigali", "0.00"));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let network = sample();

        let saved = store.save(&network);
        assert!(saved.is_ok());
        assert_eq!(saved.cities.unwrap(), 3);
        assert_eq!(saved.roads.unwrap(), 2);

        let (loaded, report) = store.load();
        assert!(report.warnings.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(loaded.cities().list(), network.cities().list());
        assert_eq!(loaded.roads(), network.roads());
        assert_eq!(loaded.adjacency_matrix(), network.adjacency_matrix());
        assert_eq!(loaded.budget_matrix(), network.budget_matrix());
    }

    #[test]
    fn test_missing_files_start_empty() {
        let temp = TempDir::new().unwrap();
        let (network, report) = store(&temp).load();
        assert!(network.cities().is_empty());
        assert_eq!(network.road_count(), 0);
        assert!(!report.cities_file_found);
        assert!(!report.roads_file_found);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_long_names_run_into_index_column() {
        let mut network = Network::new();
        network.add_city("Nyamasheke Lakeside District").unwrap();
        network.add_city("Rusizi Border Crossing").unwrap();
        network.connect(1, 2).unwrap();
        network.set_budget(1, 2, 12345678901234567.0).unwrap();

        let mut restored = Network::new();
        let mut warnings = Vec::new();
        parse_cities(&format_cities(&network), "cities.txt", &mut restored, &mut warnings);
        parse_roads(&format_roads(&network), "roads.txt", &mut restored, &mut warnings);

        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(restored.cities().list(), network.cities().list());
        assert_eq!(restored.roads(), network.roads());
    }

    #[test]
    fn test_separator_in_city_row_is_skipped() {
        let cities = "1 Gisenyi - Rubavu\n2 Kibuye\n3 Gisenyi\n4 Rubavu\n";
        let roads = "1 Gisenyi - Rubavu - Kibuye 1.00\n2 Gisenyi - Rubavu 2.00\n";

        let mut network = Network::new();
        let mut warnings = Vec::new();
        assert_eq!(parse_cities(cities, "cities.txt", &mut network, &mut warnings), 3);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().starts_with("cities.txt:1: Invalid city name"));

        warnings.clear();
        assert_eq!(parse_roads(roads, "roads.txt", &mut network, &mut warnings), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(network.graph().budget(3, 4), Some(2.0));
    }

    #[test]
    fn test_oversized_index_is_skipped() {
        let cities = "     Index           City_name\n\
                      18446744073709551615              Kigali\n\
                      \x20        0                Huye\n\
                      \x20        4             Musanze\n";

        let mut network = Network::new();
        let mut warnings = Vec::new();
        assert_eq!(parse_cities(cities, "cities.txt", &mut network, &mut warnings), 1);
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[1].to_string(),
            "cities.txt:3: Invalid city index 0: city index must be positive"
        );

        let city = network.add_city("Kigali").unwrap();
        assert_eq!(city.index, 5);
    }

    #[test]
    fn test_budget_in_memory_matches_reload() {
        let mut network = sample();
        network.set_budget(3, 1, 7.126).unwrap();

        let mut restored = Network::new();
        let mut warnings = Vec::new();
        parse_cities(&format_cities(&network), "cities.txt", &mut restored, &mut warnings);
        parse_roads(&format_roads(&network), "roads.txt", &mut restored, &mut warnings);

        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(network.graph().budget(1, 3), Some(7.13));
        assert_eq!(restored.budget_matrix(), network.budget_matrix());
    }

    #[test]
    fn test_bad_rows_are_skipped_with_warnings() {
        let cities = "     Index           City_name\n\
                      \x20        1              Kigali\n\
                      \x20        1                Huye\n\
                      \x20        2            Butare9\n\
                      \x20        3\n\
                      \n\
                      \x20        4              Nyanza\n";
        let roads = "   ID                     Road              Budget\n\
                     \x20   1           Kigali - Nyanza                3.00\n\
                     \x20   2           Kigali - Nowhere               1.00\n\
                     \x20   3           Nyanza - Kigali                2.00\n\
                     \x20   4           Kigali - Kigali                2.00\n\
                     \x20   5           Kigali Nyanza                  2.00\n\
                     \x20   6           Kigali - Nyanza\n";

        let mut network = Network::new();
        let mut warnings = Vec::new();
        assert_eq!(parse_cities(cities, "cities.txt", &mut network, &mut warnings), 2);
        assert_eq!(warnings.len(), 3);

        warnings.clear();
        assert_eq!(parse_roads(roads, "roads.txt", &mut network, &mut warnings), 1);
        assert_eq!(warnings.len(), 5);
        assert_eq!(network.graph().budget(1, 4), Some(3.0));

        match &warnings[0] {
            NetworkError::ParseError { file, line, .. } => {
                assert_eq!(file, "roads.txt");
                assert_eq!(*line, 3);
            }
            other => panic!("unexpected warning {:?}", other),
        }
    }

    #[test]
    fn test_headerless_file_keeps_first_row() {
        let mut network = Network::new();
        let mut warnings = Vec::new();
        let loaded = parse_cities("1 Kigali\n2 Huye\n", "cities.txt", &mut network, &mut warnings);
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");
        let store = NetworkStore::new(dir.join("cities.txt"), dir.join("roads.txt"), 20);
        assert!(store.save(&sample()).is_ok());
        assert!(dir.join("roads.txt").exists());
    }

    #[test]
    fn test_save_failure_is_reported_per_file() {
        let temp = TempDir::new().unwrap();
        let blocked = temp.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let store = NetworkStore::new(
            temp.path().join("cities.txt"),
            blocked.join("roads.txt"),
            20,
        );
        let report = store.save(&sample());
        assert!(report.cities.is_ok());
        assert!(report.roads.is_err());
        assert!(!report.is_ok());
    }

    #[test]
    fn test_load_respects_capacity() {
        let temp = TempDir::new().unwrap();
        store(&temp).save(&sample());

        let small = NetworkStore::new(temp.path().join("cities.txt"), temp.path().join("roads.txt"), 2);
        let (network, report) = small.load();
        assert_eq!(network.cities().len(), 2);
        assert_eq!(report.cities_loaded, 2);
        // Musanze was dropped, so its road goes too
        assert_eq!(report.roads_loaded, 1);
        assert_eq!(report.warnings.len(), 2);
    }
}
