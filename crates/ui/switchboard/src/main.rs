mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod state;
mod theme;
mod tui;

use crate::app::App;
use crate::cli::{Cli, Cmd};
use crate::config::Config;

use clap::Parser;
use color_eyre::Result;
use dialer::ReferenceData;
use tracing::info;

#[tokio::main]
pub async fn main() -> Result<()> {
    errors::init()?;
    logging::init()?;

    let args = Cli::parse();
    let config = Config::new(&args)?;
    let provider = config.reference_provider();
    let reference = provider.load()?;
    info!(source = %provider.describe(), countries = reference.countries.len(), "reference data ready");

    match &args.cmd {
        Some(Cmd::Countries { filter }) => print_countries(&reference, filter.as_deref()),
        None => {
            let mut app = App::new(config, reference)?;
            app.run().await?;
        }
    }
    Ok(())
}

fn print_countries(reference: &ReferenceData, filter: Option<&str>) {
    let mut last = None;
    for (group, country) in reference.countries.filter(filter.unwrap_or_default()) {
        if last != Some(group) {
            println!("{group}");
            last = Some(group);
        }
        println!("  {}  ({} digits)", country.label(), country.digit_count);
    }
}
