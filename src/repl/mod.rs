//! Interactive menu session
//!
//! Shows the numbered menu, reads a choice and dispatches it, until Save and
//! Exit runs or operator input ends.

pub mod commands;
pub mod display;
pub mod input;
pub mod render;

use crate::errors::Result;
use crate::network::Network;
use crate::storage::NetworkStore;

pub use crate::repl::commands::{CommandHandler, MenuChoice};
pub use crate::repl::display::DisplayManager;
pub use crate::repl::input::{InputHandler, LineSource, Prompter, ScriptedInput};

/// Settings a session needs beyond its collaborators
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub currency: String,
    pub max_batch: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            currency: "billion RWF".to_string(),
            max_batch: 20,
        }
    }
}

/// Menu session coordinator
///
/// Owns the network for the lifetime of the session; nothing outside the
/// session mutates it.
pub struct MenuSession<S> {
    network: Network,
    prompter: Prompter<S>,
    command_handler: CommandHandler,
    display: DisplayManager,
    store: NetworkStore,
    commands_run: usize,
}

impl<S: LineSource> MenuSession<S> {
    pub fn new(
        network: Network,
        source: S,
        store: NetworkStore,
        display: DisplayManager,
        config: MenuConfig,
    ) -> Self {
        Self {
            network,
            prompter: Prompter::new(source, display.clone()),
            command_handler: CommandHandler::new(display.clone(), config.currency, config.max_batch),
            display,
            store,
            commands_run: 0,
        }
    }

    /// Run the menu loop until Save and Exit has written both files.
    ///
    /// A failed save returns to the menu. Returns `InputClosed` if input ends
    /// first; nothing is saved in that case.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display.show_menu();
            let number = self.prompter.read_int("Enter your choice (1-9): ", 1, 9)?;
            let Some(choice) = MenuChoice::from_number(number) else {
                continue;
            };

            if !self.dispatch(choice)? {
                return Ok(());
            }
        }
    }

    /// Execute one menu action; false once the session is over
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<bool> {
        self.display
            .show_debug(&format!("menu {} ({})", choice.number(), choice.label()));
        self.commands_run += 1;
        self.command_handler
            .execute(choice, &mut self.network, &mut self.prompter, &self.store)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn source(&self) -> &S {
        self.prompter.source()
    }

    pub fn commands_run(&self) -> usize {
        self.commands_run
    }

    /// Give back the network (e.g. after the loop ends)
    pub fn into_network(self) -> Network {
        self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Verbosity;
    use crate::errors::NetworkError;
    use tempfile::TempDir;

    fn session(temp: &TempDir, lines: &[&str]) -> MenuSession<ScriptedInput> {
        MenuSession::new(
            Network::new(),
            ScriptedInput::new(lines.iter().copied()),
            NetworkStore::new(temp.path().join("cities.txt"), temp.path().join("roads.txt"), 20),
            DisplayManager::new(Verbosity::Quiet),
            MenuConfig::default(),
        )
    }

    #[test]
    fn test_run_until_save_and_exit() {
        let temp = TempDir::new().unwrap();
        let mut s = session(&temp, &["0", "x", "1", "1", "Kigali", "6", "9"]);

        s.run().unwrap();
        assert_eq!(s.commands_run(), 3);
        assert_eq!(s.source().remaining(), 0);
        assert!(temp.path().join("cities.txt").exists());
    }

    #[test]
    fn test_run_input_closed_does_not_save() {
        let temp = TempDir::new().unwrap();
        let mut s = session(&temp, &["1", "1", "Kigali"]);

        assert_eq!(s.run(), Err(NetworkError::InputClosed));
        assert_eq!(s.network().cities().len(), 1);
        assert!(!temp.path().join("cities.txt").exists());
    }

    #[test]
    fn test_dispatch_display_continues() {
        let temp = TempDir::new().unwrap();
        let mut s = session(&temp, &[]);
        assert!(s.dispatch(MenuChoice::DisplayAll).unwrap());
        assert!(s.into_network().cities().is_empty());
    }
}
