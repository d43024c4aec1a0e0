pub mod browser;
pub mod cli;
pub mod detail;
pub mod listing;
mod logging;
pub mod manager;
pub mod scrapers;
pub mod settings;

pub use browser::{BrowserConfig, BrowserLauncher, BrowserSession, Engine, SessionProvider};
pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use logging::init_logging;
pub use manager::{HarvestManager, HarvestReport};
pub use settings::{HarvestSettings, SettleStrategy};

pub mod prelude {
    pub use super::browser::{BrowserSession, SessionProvider};
    pub use hv_core::{ArticleRecord, ArticleStorage, Error, ListingEntry, Result};
}
