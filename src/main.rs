//! infranet - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use infranet::{
    cli::{Args, Config},
    repl::{DisplayManager, InputHandler, MenuConfig, MenuSession},
    storage::{LoadReport, NetworkStore},
    NetworkError,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.clone();
    }

    let verbosity = args.verbosity(config.verbosity()?);
    DisplayManager::set_color(config.display.color_output && !args.no_color);
    let display = DisplayManager::new(verbosity);

    match args.config.as_deref().map(|p| p.to_path_buf()).or_else(Config::default_path) {
        Some(path) if path.exists() => display.show_debug(&format!("config: {}", path.display())),
        _ => display.show_debug("config: built-in defaults"),
    }
    display.show_debug(&format!("verbosity: {}", verbosity.as_str()));

    let store = NetworkStore::new(
        config.cities_path(),
        config.roads_path(),
        config.network.max_cities,
    );
    let (network, report) = store.load();
    show_load_report(&display, &store, &report);

    let input = InputHandler::new()?;
    let mut session = MenuSession::new(
        network,
        input,
        store,
        display,
        MenuConfig {
            currency: config.display.currency.clone(),
            max_batch: config.network.max_batch,
        },
    );

    match session.run() {
        Ok(()) => Ok(()),
        Err(NetworkError::InputClosed) => {
            Err(anyhow::anyhow!("Input closed before Save and Exit; changes were not saved"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Summarize startup loading
fn show_load_report(display: &DisplayManager, store: &NetworkStore, report: &LoadReport) {
    for failure in &report.failures {
        display.show_error(failure);
    }
    for warning in &report.warnings {
        display.show_warning(&format!("skipped {}", warning));
    }

    if report.cities_file_found {
        display.show_info(&format!(
            "Loaded {} cities from {}",
            report.cities_loaded,
            store.cities_path().display()
        ));
    } else {
        display.show_debug(&format!("{} not found, starting with no cities", store.cities_path().display()));
    }

    if report.roads_file_found {
        display.show_info(&format!(
            "Loaded {} roads from {}",
            report.roads_loaded,
            store.roads_path().display()
        ));
    } else {
        display.show_debug(&format!("{} not found, starting with no roads", store.roads_path().display()));
    }
}
