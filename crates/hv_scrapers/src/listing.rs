use hv_core::{Error, ListingEntry, Result, NO_IMAGE};
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::{release, BrowserLauncher, BrowserSession};
use crate::scrapers::{utils, ListingSelectors, SiteProfile};
use crate::settings::HarvestSettings;

/// Collects article teasers from category pages, all in one browser session.
pub struct ListingScraper {
    launcher: Arc<BrowserLauncher>,
    profile: SiteProfile,
    settings: HarvestSettings,
}

impl ListingScraper {
    pub fn new(launcher: Arc<BrowserLauncher>, profile: SiteProfile, settings: HarvestSettings) -> Self {
        Self {
            launcher,
            profile,
            settings,
        }
    }

    /// Visit every url in order and concatenate what each page lists.
    ///
    /// A page that fails to load or never shows its article container adds
    /// nothing; the remaining pages are still visited.
    pub async fn discover(&self, urls: &[String]) -> Vec<ListingEntry> {
        let Some(mut session) = self.launcher.acquire().await else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for url in urls {
            match self.scrape_page(session.as_mut(), url).await {
                Ok(found) => {
                    info!("📰 {} articles listed on {}", found.len(), url);
                    entries.extend(found);
                }
                Err(e) => warn!("⚠️ No articles detected on {}: {}", url, e),
            }
        }

        release(session).await;
        info!("🦗 {} articles discovered on {} pages", entries.len(), urls.len());
        entries
    }

    async fn scrape_page(&self, session: &mut dyn BrowserSession, url: &str) -> Result<Vec<ListingEntry>> {
        session.goto(url).await?;
        session
            .wait_for(self.profile.listing.container, self.settings.listing_timeout)
            .await?;
        let html = session.page_source().await?;
        parse_listing(&html, url, &self.profile.listing, self.settings.max_items_per_page)
    }
}

/// Extract at most `max_items` entries from a rendered category page, in
/// document order. Items that cannot be read are logged and skipped.
pub fn parse_listing(
    html: &str,
    page_url: &str,
    selectors: &ListingSelectors,
    max_items: usize,
) -> Result<Vec<ListingEntry>> {
    let base = utils::parse_url(page_url)?;
    let item_selector = utils::parse_selector(selectors.item)?;
    let link_selector = utils::parse_selector(selectors.link)?;
    let image_selector = utils::parse_selector(selectors.image)?;

    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    for (index, item) in document.select(&item_selector).take(max_items).enumerate() {
        match extract_entry(&item, &base, &link_selector, &image_selector, selectors.link) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(page = page_url, index, "⚠️ Skipping article: {}", e),
        }
    }

    Ok(entries)
}

fn extract_entry(
    item: &ElementRef,
    base: &Url,
    link_selector: &Selector,
    image_selector: &Selector,
    link_css: &str,
) -> Result<ListingEntry> {
    let link = item
        .select(link_selector)
        .next()
        .ok_or_else(|| Error::element_not_found(link_css))?;
    let href = link
        .value()
        .attr("href")
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| Error::element_not_found(format!("{}[href]", link_css)))?;

    let url = utils::resolve_href(base, href)?;
    let title = utils::element_text(&link);

    let image = match item
        .select(image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        Some(src) => utils::resolve_href(base, src).unwrap_or_else(|_| src.to_string()),
        None => {
            debug!(%url, "No thumbnail");
            NO_IMAGE.to_string()
        }
    };

    Ok(ListingEntry { title, url, image })
}
