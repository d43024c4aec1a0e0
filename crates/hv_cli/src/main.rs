use clap::Parser;
use hv_core::Result;
use hv_scrapers::scrapers::le360;
use hv_scrapers::settings::{DEFAULT_LISTING_TIMEOUT, DEFAULT_MAX_ITEMS_PER_PAGE, DEFAULT_SETTLE};
use hv_scrapers::{
    handle_command, BrowserConfig, BrowserLauncher, HarvestManager, HarvestSettings, ScraperArgs,
    ScraperCommands, SettleStrategy,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Harvest Le360 articles into a document store", long_about = None)]
struct Cli {
    /// memory://, sqlite:<path> or a mongodb:// connection string
    #[arg(long, env = "HARVEST_STORE_URL", default_value = "mongodb://localhost:27017/articles360DB")]
    store_url: String,

    /// MongoDB collection holding the articles
    #[arg(long, env = "HARVEST_COLLECTION", default_value = hv_storage::DEFAULT_COLLECTION)]
    collection: String,

    #[arg(long, env = "CHROMEDRIVER_URL", default_value = hv_scrapers::browser::DEFAULT_CHROMEDRIVER_URL)]
    chromedriver_url: String,

    #[arg(long, env = "GECKODRIVER_URL", default_value = hv_scrapers::browser::DEFAULT_GECKODRIVER_URL)]
    geckodriver_url: String,

    /// How long to wait for a category page's article list (e.g. 10s)
    #[arg(long)]
    listing_timeout: Option<HumanDuration>,

    /// Delay granted to an article page before it is parsed (e.g. 15s)
    #[arg(long)]
    settle: Option<HumanDuration>,

    /// Stop settling as soon as the headline renders
    #[arg(long)]
    wait_for_content: bool,

    /// Articles kept per category page
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS_PER_PAGE)]
    max_items: usize,

    #[command(subcommand)]
    command: Option<ScraperCommands>,
}

impl Cli {
    fn settings(&self) -> HarvestSettings {
        let settle = self.settle.as_ref().map(|d| d.0).unwrap_or(DEFAULT_SETTLE);
        HarvestSettings {
            listing_timeout: self
                .listing_timeout
                .as_ref()
                .map(|d| d.0)
                .unwrap_or(DEFAULT_LISTING_TIMEOUT),
            max_items_per_page: self.max_items,
            settle: if self.wait_for_content {
                SettleStrategy::UntilMarker { timeout: settle }
            } else {
                SettleStrategy::Fixed(settle)
            },
        }
    }

    fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            chromedriver_url: self.chromedriver_url.clone(),
            geckodriver_url: self.geckodriver_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    hv_scrapers::init_logging();
    let cli = Cli::parse();

    info!("💾 Connecting to storage...");
    let storage = hv_storage::create_storage(&cli.store_url, &cli.collection).await?;

    let launcher = Arc::new(BrowserLauncher::headless(&cli.browser_config()));
    let manager = HarvestManager::new(launcher, storage, le360::profile(), cli.settings());

    let args = ScraperArgs {
        command: cli.command,
    };
    handle_command(args, &manager).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("10s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(10));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("15".parse::<HumanDuration>().unwrap().0, Duration::from_secs(15));
        assert!("abc".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["harvest"]);
        let settings = cli.settings();

        assert_eq!(cli.command, None);
        assert_eq!(settings.listing_timeout, Duration::from_secs(10));
        assert_eq!(settings.max_items_per_page, 20);
        assert_eq!(settings.settle, SettleStrategy::Fixed(Duration::from_secs(15)));
    }

    #[test]
    fn test_fetch_subcommand() {
        let cli = Cli::parse_from([
            "harvest",
            "--store-url",
            "memory://",
            "--wait-for-content",
            "--settle",
            "20s",
            "fetch",
            "https://fr.le360.ma/sport/x",
            "--store",
        ]);

        assert_eq!(cli.store_url, "memory://");
        assert_eq!(cli.settings().settle, SettleStrategy::UntilMarker { timeout: Duration::from_secs(20) });
        assert_eq!(
            cli.command,
            Some(ScraperCommands::Fetch {
                url: "https://fr.le360.ma/sport/x".to_string(),
                store: true,
            })
        );
    }
}
