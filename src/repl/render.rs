//! Fixed-width text rendering of the network
//!
//! Every function returns the finished block (trailing newline included) so
//! the output can be printed or asserted on as-is.

use std::fmt::Write;

use crate::network::Network;

const NAME_COLUMN: usize = 12;

/// Index / name table
pub fn city_table(network: &Network) -> String {
    let mut out = format!("{:>10}{:>20}\n", "Index", "City Name");
    out.push_str(&"-".repeat(30));
    out.push('\n');
    for city in network.cities().list() {
        let _ = writeln!(out, "{:>10}{:>20}", city.index, city.name);
    }
    out
}

/// Numbered road table with budgets
pub fn road_table(network: &Network, currency: &str) -> String {
    let mut out = format!(
        "{:>5}{:>25}{:>20}\n",
        "ID",
        "Road",
        format!("Budget ({})", currency)
    );
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for (i, road) in network.roads().iter().enumerate() {
        let _ = writeln!(out, "{:>5}{:>25}{:>20.2}", i + 1, road.label(), road.budget);
    }
    out
}

/// 1/0 connection matrix
pub fn connection_matrix(network: &Network) -> String {
    let cities = network.cities().list();
    let mut out = String::from("1 = Road exists, 0 = No road\n\n");

    let _ = write!(out, "{:>width$}", " ", width = NAME_COLUMN);
    for city in cities {
        let _ = write!(out, "{:>5}", city.index);
    }
    out.push('\n');

    for (city, row) in cities.iter().zip(network.adjacency_matrix()) {
        let _ = write!(out, "{:>width$}", city.name, width = NAME_COLUMN);
        for connected in row {
            let _ = write!(out, "{:>5}", u8::from(connected));
        }
        out.push('\n');
    }
    out
}

/// Budget per connected pair, `-` where there is no road
pub fn budget_matrix(network: &Network, currency: &str) -> String {
    let cities = network.cities().list();
    let mut out = format!(
        "Shows budget amounts between connected cities (in {})\n\n",
        currency
    );

    let _ = write!(out, "{:>width$}", " ", width = NAME_COLUMN);
    for city in cities {
        let _ = write!(out, "{:>12}", city.index);
    }
    out.push('\n');

    for (city, row) in cities.iter().zip(network.budget_matrix()) {
        let _ = write!(out, "{:>width$}", city.name, width = NAME_COLUMN);
        for cell in row {
            match cell {
                Some(budget) => {
                    let _ = write!(out, "{:>12.2}", budget);
                }
                None => {
                    let _ = write!(out, "{:>12}", "-");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Index, name and neighbor list of one city
pub fn city_details(network: &Network, index: usize, currency: &str) -> String {
    let name = network.cities().name_of(index).unwrap_or("Unknown");
    let neighbors = network.neighbors(index);

    let connections = if neighbors.is_empty() {
        "No connected cities".to_string()
    } else {
        neighbors
            .iter()
            .map(|(name, budget)| format!("{} ({:.2} {})", name, budget, currency))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Index: {}\nName: {}\nConnected to: {}\n",
        index, name, connections
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Network {
        let mut network = Network::new();
        network.add_city("Kigali").unwrap();
        network.add_city("Huye").unwrap();
        network.add_city("Musanze").unwrap();
        network.connect(1, 2).unwrap();
        network.set_budget(1, 2, 5.5).unwrap();
        network
    }

    #[test]
    fn test_city_table_rows() {
        let table = city_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "     Index           City Name");
        assert_eq!(lines[1], "-".repeat(30));
        assert_eq!(lines[2], "         1              Kigali");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_road_table_rows() {
        let table = road_table(&sample(), "billion RWF");
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].ends_with("Budget (billion RWF)"));
        assert_eq!(lines[2], format!("{:>5}{:>25}{:>20}", 1, "Kigali - Huye", "5.50"));
    }

    #[test]
    fn test_connection_matrix_symmetric() {
        let matrix = connection_matrix(&sample());
        let lines: Vec<&str> = matrix.lines().collect();
        assert_eq!(lines[2], format!("{:>12}{:>5}{:>5}{:>5}", " ", 1, 2, 3));
        assert_eq!(lines[3], format!("{:>12}{:>5}{:>5}{:>5}", "Kigali", 0, 1, 0));
        assert_eq!(lines[4], format!("{:>12}{:>5}{:>5}{:>5}", "Huye", 1, 0, 0));
        assert_eq!(lines[5], format!("{:>12}{:>5}{:>5}{:>5}", "Musanze", 0, 0, 0));
    }

    #[test]
    fn test_budget_matrix_cells() {
        let matrix = budget_matrix(&sample(), "billion RWF");
        let lines: Vec<&str> = matrix.lines().collect();
        assert_eq!(
            lines[3],
            format!("{:>12}{:>12}{:>12}{:>12}", "Kigali", "-", "5.50", "-")
        );
    }

    #[test]
    fn test_city_details() {
        let network = sample();
        assert_eq!(
            city_details(&network, 2, "billion RWF"),
            "Index: 2\nName: Huye\nConnected to: Kigali (5.50 billion RWF)\n"
        );
        assert!(city_details(&network, 3, "billion RWF").contains("No connected cities"));
    }
}
