use std::time::Duration;

pub const DEFAULT_LISTING_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_ITEMS_PER_PAGE: usize = 20;

/// How the detail scraper lets client-side rendering finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStrategy {
    /// Always sleep for the full duration.
    Fixed(Duration),
    /// Wait for the article marker, giving up after `timeout` and parsing
    /// whatever has rendered by then.
    UntilMarker { timeout: Duration },
}

#[derive(Debug, Clone, Copy)]
pub struct HarvestSettings {
    pub listing_timeout: Duration,
    pub max_items_per_page: usize,
    pub settle: SettleStrategy,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            listing_timeout: DEFAULT_LISTING_TIMEOUT,
            max_items_per_page: DEFAULT_MAX_ITEMS_PER_PAGE,
            settle: SettleStrategy::Fixed(DEFAULT_SETTLE),
        }
    }
}
