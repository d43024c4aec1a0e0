use clap::{Args, Subcommand};
use hv_core::{Error, Result, StoreOutcome};

use crate::manager::HarvestManager;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: Option<ScraperCommands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ScraperCommands {
    /// Discover, fetch and store every article (default)
    Run,
    /// List the category pages that will be crawled
    List,
    /// Only run the listing stage and print what was found
    Discover,
    /// Fetch a single article and print it as JSON
    Fetch {
        url: String,
        /// Also persist the article
        #[arg(long)]
        store: bool,
    },
}

pub async fn handle_command(args: ScraperArgs, manager: &HarvestManager) -> Result<()> {
    match args.command.unwrap_or(ScraperCommands::Run) {
        ScraperCommands::Run => {
            let report = manager.run().await;
            println!(
                "{} discovered, {} fetched, {} stored, {} already present, {} failed",
                report.discovered, report.fetched, report.inserted, report.skipped, report.failed
            );
        }
        ScraperCommands::List => {
            let profile = manager.profile();
            println!("{} {}:", profile.emoji, profile.name);
            for url in &profile.category_urls {
                println!("  {}", url);
            }
        }
        ScraperCommands::Discover => {
            for entry in manager.discover().await {
                println!("{}", serde_json::to_string(&entry)?);
            }
        }
        ScraperCommands::Fetch { url, store } => {
            let record = manager
                .fetch(&url)
                .await
                .ok_or_else(|| Error::Browser(format!("No article could be fetched from {}", url)))?;
            println!("{}", serde_json::to_string_pretty(&record)?);

            if store {
                match manager.store(&record).await? {
                    StoreOutcome::Inserted => println!("💾 Stored {}", record.url),
                    StoreOutcome::AlreadyPresent => println!("⏭️ Already stored {}", record.url),
                }
            }
        }
    }

    Ok(())
}
