use hv_core::{ArticleRecord, ArticleStorage, ListingEntry, Result, StoreOutcome};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::browser::BrowserLauncher;
use crate::detail::DetailScraper;
use crate::listing::ListingScraper;
use crate::scrapers::SiteProfile;
use crate::settings::HarvestSettings;

/// Counters for one pass over the category list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub discovered: usize,
    pub fetched: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives discover → fetch → store, strictly one article at a time.
pub struct HarvestManager {
    storage: Arc<dyn ArticleStorage>,
    profile: SiteProfile,
    listing: ListingScraper,
    detail: DetailScraper,
}

impl HarvestManager {
    pub fn new(
        launcher: Arc<BrowserLauncher>,
        storage: Arc<dyn ArticleStorage>,
        profile: SiteProfile,
        settings: HarvestSettings,
    ) -> Self {
        Self {
            storage,
            listing: ListingScraper::new(launcher.clone(), profile.clone(), settings),
            detail: DetailScraper::new(launcher, profile.clone(), settings),
            profile,
        }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub async fn discover(&self) -> Vec<ListingEntry> {
        self.listing.discover(&self.profile.category_urls).await
    }

    pub async fn fetch(&self, url: &str) -> Option<ArticleRecord> {
        self.detail.fetch_detail(url).await
    }

    pub async fn store(&self, record: &ArticleRecord) -> Result<StoreOutcome> {
        self.storage.store_article(record).await
    }

    /// One full pass. Nothing is retried; a crash loses only the entries not
    /// yet visited, and stored ones are skipped on the next pass.
    pub async fn run(&self) -> HarvestReport {
        let start = Instant::now();
        info!(
            "{} Harvesting {} ({} category pages)",
            self.profile.emoji,
            self.profile.name,
            self.profile.category_urls.len()
        );

        let entries = self.discover().await;
        let mut report = HarvestReport {
            discovered: entries.len(),
            ..Default::default()
        };

        for (i, entry) in entries.iter().enumerate() {
            info!("🔎 [{}/{}] {}", i + 1, entries.len(), entry.url);
            let Some(record) = self.fetch(&entry.url).await else {
                warn!("⚠️ No article fetched from {}", entry.url);
                report.failed += 1;
                continue;
            };
            report.fetched += 1;

            match self.store(&record).await {
                Ok(StoreOutcome::Inserted) => report.inserted += 1,
                Ok(StoreOutcome::AlreadyPresent) => report.skipped += 1,
                Err(e) => {
                    error!("❌ Failed to store {}: {}", record.url, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            discovered = report.discovered,
            fetched = report.fetched,
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failed,
            elapsed_secs = start.elapsed().as_secs(),
            "✨ Harvest complete"
        );
        report
    }
}
