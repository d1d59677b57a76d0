//! Menu commands
//!
//! One handler per menu entry. Handlers validate everything (token
//! resolution, road existence, capacity) before touching the network, so a
//! rejected command leaves it exactly as it was.

use crate::errors::{NetworkError, Result};
use crate::network::{round_to_cents, Network};
use crate::repl::display::DisplayManager;
use crate::repl::input::{LineSource, Prompter};
use crate::repl::render;
use crate::storage::NetworkStore;

/// Menu entry labels, numbered from 1
pub const MENU_LABELS: [&str; 9] = [
    "Add New City(ies)",
    "Add Roads Between Cities",
    "Assign Road Budgets",
    "Edit City",
    "Search for City",
    "Display Cities",
    "Display Roads",
    "Display All Data",
    "Save and Exit",
];

/// Menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCities,
    AddRoad,
    AssignBudget,
    EditCity,
    SearchCity,
    DisplayCities,
    DisplayRoads,
    DisplayAll,
    SaveAndExit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::AddCities,
        MenuChoice::AddRoad,
        MenuChoice::AssignBudget,
        MenuChoice::EditCity,
        MenuChoice::SearchCity,
        MenuChoice::DisplayCities,
        MenuChoice::DisplayRoads,
        MenuChoice::DisplayAll,
        MenuChoice::SaveAndExit,
    ];

    /// Menu number (1-based) to action
    pub fn from_number(number: i64) -> Option<Self> {
        let slot = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(slot).copied()
    }

    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        MENU_LABELS[self as usize]
    }
}

/// Executes menu actions against a network
pub struct CommandHandler {
    display: DisplayManager,
    currency: String,
    max_batch: usize,
}

impl CommandHandler {
    pub fn new(display: DisplayManager, currency: impl Into<String>, max_batch: usize) -> Self {
        Self {
            display,
            currency: currency.into(),
            max_batch,
        }
    }

    /// Run one menu action.
    ///
    /// Returns true if the menu should continue, false once Save and Exit has
    /// written both files. Errors are limited to the operator's input ending.
    pub fn execute<S: LineSource>(
        &self,
        choice: MenuChoice,
        network: &mut Network,
        prompter: &mut Prompter<S>,
        store: &NetworkStore,
    ) -> Result<bool> {
        match choice {
            MenuChoice::AddCities => self.add_cities(network, prompter)?,
            MenuChoice::AddRoad => self.add_road(network, prompter)?,
            MenuChoice::AssignBudget => self.assign_budget(network, prompter)?,
            MenuChoice::EditCity => self.edit_city(network, prompter)?,
            MenuChoice::SearchCity => self.search_city(network, prompter)?,
            MenuChoice::DisplayCities => self.display_cities(network),
            MenuChoice::DisplayRoads => self.display_roads(network),
            MenuChoice::DisplayAll => {
                self.display_cities(network);
                self.display_roads(network);
                self.display_budget_matrix(network);
            }
            MenuChoice::SaveAndExit => return Ok(!self.save(network, store)),
        }
        Ok(true)
    }

    fn add_cities<S: LineSource>(&self, network: &mut Network, prompter: &mut Prompter<S>) -> Result<()> {
        self.display.show_section("Add New Cities");
        if !network.cities().is_empty() {
            self.display.show_line("Current cities:");
            self.display_cities(network);
        }

        let remaining = network.remaining_capacity();
        if remaining == 0 {
            self.display.show_error(
                &NetworkError::CapacityExceeded {
                    current: network.cities().len(),
                    max: network.capacity(),
                }
                .to_string(),
            );
            return Ok(());
        }

        let max = self.max_batch.min(remaining);
        let count = prompter.read_int(
            &format!("How many new cities to add? (1-{}): ", max),
            1,
            max as i64,
        )?;

        for _ in 0..count {
            let index = match network.cities().next_index() {
                Ok(index) => index,
                Err(e) => {
                    self.display.show_error(&e.to_string());
                    break;
                }
            };
            let name = prompter.read_city_name(
                &format!("Enter name for city #{}: ", index),
                network.cities(),
            )?;
            match network.add_city(&name) {
                Ok(city) => self.display.show_success(&format!(
                    "City '{}' added with index {}.",
                    city.name, city.index
                )),
                Err(e) => {
                    self.display.show_error(&e.to_string());
                    break;
                }
            }
        }
        Ok(())
    }

    /// Read two city tokens; `None` (after reporting) when either is unknown
    fn read_pair<S: LineSource>(
        &self,
        network: &Network,
        prompter: &mut Prompter<S>,
        first: &str,
        second: &str,
    ) -> Result<Option<(usize, usize)>> {
        let token1 = prompter.read_token(first)?;
        let token2 = prompter.read_token(second)?;

        match (network.resolve(&token1), network.resolve(&token2)) {
            (Ok(a), Ok(b)) => Ok(Some((a, b))),
            (a, b) => {
                for err in [a.err(), b.err()].into_iter().flatten() {
                    self.display.show_debug(&err.to_string());
                }
                self.display.show_error("One or both cities not found.");
                Ok(None)
            }
        }
    }

    fn add_road<S: LineSource>(&self, network: &mut Network, prompter: &mut Prompter<S>) -> Result<()> {
        self.display.show_section("Add Road Between Cities");
        if network.cities().len() < 2 {
            self.display.show_line("Need at least 2 cities to add a road.");
            return Ok(());
        }

        self.display_cities(network);

        let Some((a, b)) = self.read_pair(
            network,
            prompter,
            "Enter first city name or index: ",
            "Enter second city name or index: ",
        )?
        else {
            return Ok(());
        };

        match network.connect(a, b) {
            Ok(road) => self.display.show_success(&format!(
                "Road added between {} and {}.",
                road.city1, road.city2
            )),
            Err(NetworkError::SelfLoop { .. }) => self
                .display
                .show_error("Cannot create road between the same city."),
            Err(NetworkError::AlreadyConnected { .. }) => self
                .display
                .show_error("Road already exists between these cities."),
            Err(e) => self.display.show_error(&e.to_string()),
        }
        Ok(())
    }

    fn assign_budget<S: LineSource>(&self, network: &mut Network, prompter: &mut Prompter<S>) -> Result<()> {
        self.display.show_section("Assign Road Budget");
        if network.road_count() == 0 {
            self.display.show_line("No roads exist to assign budgets.");
            return Ok(());
        }

        self.display_roads(network);

        let Some((a, b)) = self.read_pair(
            network,
            prompter,
            "Enter first connected city: ",
            "Enter second connected city: ",
        )?
        else {
            return Ok(());
        };

        if !network.is_connected(a, b) {
            self.display.show_error("No road exists between these cities.");
            return Ok(());
        }

        let amount = prompter.read_float(&format!("Enter budget amount ({}): ", self.currency), 0.0)?;

        match network.set_budget(a, b, amount) {
            Ok(()) => self.display.show_success(&format!(
                "Budget of {:.2} {} assigned successfully.",
                round_to_cents(amount),
                self.currency
            )),
            Err(e) => self.display.show_error(&e.to_string()),
        }
        Ok(())
    }

    fn edit_city<S: LineSource>(&self, network: &mut Network, prompter: &mut Prompter<S>) -> Result<()> {
        self.display.show_section("Edit City");
        if network.cities().is_empty() {
            self.display.show_line("No cities to edit.");
            return Ok(());
        }

        self.display_cities(network);

        let token = prompter.read_token("Enter city name or index to edit: ")?;
        let Ok(index) = network.resolve(&token) else {
            self.display.show_error("City not found.");
            return Ok(());
        };

        let current = network.cities().name_of(index).unwrap_or_default().to_string();
        let new_name = prompter.read_city_name(
            &format!("Enter new name (current: {}): ", current),
            network.cities(),
        )?;

        match network.rename_city(index, &new_name) {
            Ok(old) => {
                self.display
                    .show_debug(&format!("city {} renamed '{}' -> '{}'", index, old, new_name));
                self.display.show_success("City updated successfully.");
            }
            Err(e) => self.display.show_error(&e.to_string()),
        }
        Ok(())
    }

    fn search_city<S: LineSource>(&self, network: &Network, prompter: &mut Prompter<S>) -> Result<()> {
        self.display.show_section("Search City");
        if network.cities().is_empty() {
            self.display.show_line("No cities to search.");
            return Ok(());
        }

        let token = prompter.read_token("Enter city name or index to search: ")?;
        let Ok(index) = network.resolve(&token) else {
            self.display.show_error("City not found.");
            return Ok(());
        };

        self.display.show_line("\nCity Details:");
        self.display
            .show_block(&render::city_details(network, index, &self.currency));
        Ok(())
    }

    fn display_cities(&self, network: &Network) {
        if network.cities().is_empty() {
            self.display.show_line("No cities to display.");
            return;
        }
        self.display.show_section("List of Cities");
        self.display.show_block(&render::city_table(network));
    }

    fn display_roads(&self, network: &Network) {
        if network.road_count() == 0 {
            self.display.show_line("No roads to display.");
            return;
        }
        self.display.show_section("Road Connections");
        self.display
            .show_block(&render::road_table(network, &self.currency));
        self.display.show_section("Connection Matrix");
        self.display.show_block(&render::connection_matrix(network));
    }

    fn display_budget_matrix(&self, network: &Network) {
        if network.cities().is_empty() {
            self.display
                .show_line("No cities available to display budget matrix.");
            return;
        }
        self.display.show_section("Budget Adjacency Matrix");
        self.display
            .show_block(&render::budget_matrix(network, &self.currency));
    }

    /// Write both files; true when both were written
    fn save(&self, network: &Network, store: &NetworkStore) -> bool {
        let report = store.save(network);

        match &report.cities {
            Ok(count) => {
                self.display.show_line(&format!(
                    "Cities saved to {}",
                    store.cities_path().display()
                ));
                self.display.show_debug(&format!("{} city rows written", count));
            }
            Err(e) => self
                .display
                .show_error(&format!("Error saving cities to file: {:#}", e)),
        }

        match &report.roads {
            Ok(count) => {
                self.display.show_line(&format!(
                    "Roads saved to {}",
                    store.roads_path().display()
                ));
                self.display.show_debug(&format!("{} road rows written", count));
            }
            Err(e) => self
                .display
                .show_error(&format!("Error saving roads to file: {:#}", e)),
        }

        if report.is_ok() {
            self.display.show_success("Data saved. Exiting program.");
        } else {
            self.display
                .show_warning("Data was not fully saved; returning to the menu.");
        }
        report.is_ok()
    }
}
