//! Thin runner: resolves one quote from the command line and prints the
//! result envelope as JSON.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use usd_quotes::infrastructure::logging::init_logging;
use usd_quotes::{AppConfig, QuoteService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    let mut args = std::env::args().skip(1);
    let country = args
        .next()
        .context("Usage: usd-quotes <country-code> [dd/mm/yyyy]")?;
    let date = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%d/%m/%Y")
            .with_context(|| format!("Invalid date '{raw}', expected dd/mm/yyyy"))?,
        None => Local::now().date_naive(),
    };

    let service = QuoteService::from_config(&config)?;
    let result = service.get_usd_quote(&country, date).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
