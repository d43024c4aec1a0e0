use chrono::{DateTime, Utc};
use hv_core::{ArticleRecord, Result};
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::browser::{release, BrowserLauncher, BrowserSession};
use crate::scrapers::{utils, ArticleSelectors, SiteProfile};
use crate::settings::{HarvestSettings, SettleStrategy};

/// Fetches full articles, one fresh browser session per article.
pub struct DetailScraper {
    launcher: Arc<BrowserLauncher>,
    profile: SiteProfile,
    settings: HarvestSettings,
}

impl DetailScraper {
    pub fn new(launcher: Arc<BrowserLauncher>, profile: SiteProfile, settings: HarvestSettings) -> Self {
        Self {
            launcher,
            profile,
            settings,
        }
    }

    /// Returns `None` when no browser could be started or the page could not
    /// be loaded. Missing fields never abort the record.
    pub async fn fetch_detail(&self, url: &str) -> Option<ArticleRecord> {
        let mut session = self.launcher.acquire().await?;
        let rendered = self.render(session.as_mut(), url).await;
        release(session).await;

        let html = match rendered {
            Ok(html) => html,
            Err(e) => {
                error!("❌ Failed to load article {}: {}", url, e);
                return None;
            }
        };

        match parse_article(&html, url, &self.profile.article, Utc::now()) {
            Ok(record) => {
                info!("📰 Scraped article: {}", record.title);
                Some(record)
            }
            Err(e) => {
                error!("❌ Failed to parse article {}: {}", url, e);
                None
            }
        }
    }

    async fn render(&self, session: &mut dyn BrowserSession, url: &str) -> Result<String> {
        session.goto(url).await?;

        match self.settings.settle {
            SettleStrategy::Fixed(delay) => {
                debug!(?delay, "Settling before parse");
                tokio::time::sleep(delay).await;
            }
            SettleStrategy::UntilMarker { timeout } => {
                let marker = self.profile.article.ready_marker;
                if let Err(e) = session.wait_for(marker, timeout).await {
                    debug!("Article marker not rendered, parsing anyway: {}", e);
                }
            }
        }

        session.page_source().await
    }
}

/// Read the article fields out of a rendered page.
pub fn parse_article(
    html: &str,
    url: &str,
    selectors: &ArticleSelectors,
    scraped_at: DateTime<Utc>,
) -> Result<ArticleRecord> {
    let category = utils::parse_selector(selectors.category)?;
    let title = utils::parse_selector(selectors.title)?;
    let paragraphs = utils::parse_selector(selectors.paragraphs)?;
    let published_at = utils::parse_selector(selectors.published_at)?;

    let document = Html::parse_document(html);

    Ok(ArticleRecord::new(
        url,
        utils::first_text(&document, &category),
        utils::first_text(&document, &title),
        utils::all_texts(&document, &paragraphs),
        utils::first_text(&document, &published_at),
        scraped_at,
    ))
}
