mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use bond_cache::config::Config;
use bond_cache::utils::format_quote_date;
use bond_cache::{transport, BondCache};

use cli::{Cli, Commands, DEMO_BATCHES, DEMO_DATE};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path).context("Failed to load configuration")?,
        None => Config::builtin(),
    };

    let transport =
        transport::from_config(&config.transport).context("Failed to build transport")?;
    let cache = BondCache::new(transport);

    match cli.command {
        Commands::Demo => run_demo(&cache).await?,
        Commands::Get { ref date, ref isins } => {
            let bonds = cache
                .get_bonds_data(date, isins.as_slice())
                .await
                .context("Failed to get bond data")?;
            println!("{}", serde_json::to_string_pretty(&bonds)?);
        }
    }

    Ok(())
}

async fn run_demo(cache: &BondCache) -> Result<()> {
    for batch in DEMO_BATCHES {
        show_request(cache, DEMO_DATE, &batch).await?;
    }
    Ok(())
}

async fn show_request(cache: &BondCache, date: &str, isins: &[&str]) -> Result<()> {
    println!();
    println!(
        "    Date {} with isins: {}",
        format_quote_date(date),
        isins.join(", ")
    );
    match cache.cached_isins(date) {
        Some(cached) => println!("    Cache already holds: {}", cached.join(", ")),
        None => println!("    Cache holds nothing for this date"),
    }

    let bonds = cache
        .get_bonds_data(date, isins)
        .await
        .with_context(|| format!("Failed to get bond data for {}", date))?;

    println!(
        "    Received {} bond(s); cache now holds for {}:",
        bonds.len(),
        date
    );
    println!();
    println!(
        "        {}",
        cache.cached_isins(date).unwrap_or_default().join(", ")
    );
    Ok(())
}
