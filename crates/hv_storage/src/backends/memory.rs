use async_trait::async_trait;
use hv_core::{ArticleRecord, ArticleStorage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    articles: Vec<ArticleRecord>,
}

impl MemoryStore {
    pub fn find_by_url(&self, url: &str) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.url == url)
    }

    pub fn insert(&mut self, record: &ArticleRecord) {
        self.articles.push(record.clone());
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}

/// Process-local store, mostly useful for tests and dry runs.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record in insertion order
    pub async fn all(&self) -> Vec<ArticleRecord> {
        self.store.read().await.articles.clone()
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleRecord>> {
        let store = self.store.read().await;
        Ok(store.find_by_url(url).cloned())
    }

    async fn insert_article(&self, record: &ArticleRecord) -> Result<()> {
        let mut store = self.store.write().await;
        store.insert(record);
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let store = self.store.read().await;
        Ok(store.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hv_core::StoreOutcome;

    fn article(url: &str, title: &str) -> ArticleRecord {
        ArticleRecord::new(
            url,
            Some("Société".to_string()),
            Some(title.to_string()),
            vec!["Paragraphe".to_string()],
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        let record = article("https://fr.le360.ma/societe/a", "Test Article");

        let outcome = storage.store_article(&record).await.unwrap();
        assert_eq!(outcome, StoreOutcome::Inserted);

        let found = storage.find_by_url(&record.url).await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn test_store_twice_is_idempotent() {
        let storage = MemoryStorage::new();
        let record = article("https://fr.le360.ma/societe/a", "Test Article");

        storage.store_article(&record).await.unwrap();
        let second = storage.store_article(&record).await.unwrap();

        assert_eq!(second, StoreOutcome::AlreadyPresent);
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_existing_document_is_not_modified() {
        let storage = MemoryStorage::new();
        let original = article("https://fr.le360.ma/sport/b", "Original");
        let newer = article("https://fr.le360.ma/sport/b", "Newer title");

        storage.store_article(&original).await.unwrap();
        let outcome = storage.store_article(&newer).await.unwrap();

        assert_eq!(outcome, StoreOutcome::AlreadyPresent);
        assert_eq!(storage.count().await.unwrap(), 1);
        let stored = storage.find_by_url(&original.url).await.unwrap().unwrap();
        assert_eq!(stored.title, "Original");
    }

    #[tokio::test]
    async fn test_urls_stay_unique() {
        let storage = MemoryStorage::new();
        for url in ["https://x.test/1", "https://x.test/2", "https://x.test/1", "https://x.test/3", "https://x.test/2"] {
            storage.store_article(&article(url, "t")).await.unwrap();
        }

        let mut urls: Vec<_> = storage.all().await.into_iter().map(|a| a.url).collect();
        let total = urls.len();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), total);
        assert_eq!(total, 3);
    }
}
