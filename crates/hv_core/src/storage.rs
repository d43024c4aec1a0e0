use async_trait::async_trait;
use tracing::info;

use crate::types::ArticleRecord;
use crate::Result;

/// What happened to a record handed to [`ArticleStorage::store_article`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Inserted,
    AlreadyPresent,
}

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Human readable backend name, used in logs
    fn name(&self) -> &str;

    /// Look up a record by exact url
    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleRecord>>;

    /// Insert a record unconditionally
    async fn insert_article(&self, record: &ArticleRecord) -> Result<()>;

    /// Number of stored records
    async fn count(&self) -> Result<u64>;

    /// Insert the record unless one with the same url already exists.
    ///
    /// Existing documents are never modified. The check and the insert are
    /// two separate operations, so concurrent writers can still race.
    async fn store_article(&self, record: &ArticleRecord) -> Result<StoreOutcome> {
        if self.find_by_url(&record.url).await?.is_some() {
            info!("⏭️ Article already stored: {}", record.title);
            return Ok(StoreOutcome::AlreadyPresent);
        }

        self.insert_article(record).await?;
        info!("💾 Article stored: {}", record.title);
        Ok(StoreOutcome::Inserted)
    }
}
