use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hv_core::{ArticleRecord, ArticleStorage, Error, Result};
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Collection};
use tracing::debug;

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "articles360DB";

pub struct MongoStorage {
    collection: Collection<Document>,
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {}", context, e))
}

impl MongoStorage {
    pub async fn connect(uri: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| storage_error("Failed to connect to MongoDB", e))?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        debug!(database = %database.name(), collection, "Using MongoDB collection");

        Ok(Self {
            collection: database.collection::<Document>(collection),
        })
    }
}

pub(crate) fn to_document(record: &ArticleRecord) -> Document {
    doc! {
        "category": record.category.as_str(),
        "title": record.title.as_str(),
        "content": record.content.as_str(),
        "url": record.url.as_str(),
        "published_at": record.published_at.as_str(),
        "scraped_at": bson::DateTime::from_millis(record.scraped_at.timestamp_millis()),
    }
}

pub(crate) fn from_document(document: &Document) -> Result<ArticleRecord> {
    let field = |name: &str| {
        document
            .get_str(name)
            .map(str::to_string)
            .map_err(|e| storage_error(&format!("Malformed field {}", name), e))
    };

    let millis = document
        .get_datetime("scraped_at")
        .map_err(|e| storage_error("Malformed field scraped_at", e))?
        .timestamp_millis();
    let scraped_at = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| Error::Storage(format!("scraped_at out of range: {}", millis)))?;

    Ok(ArticleRecord {
        category: field("category")?,
        title: field("title")?,
        content: field("content")?,
        url: field("url")?,
        published_at: field("published_at")?,
        scraped_at,
    })
}

#[async_trait]
impl ArticleStorage for MongoStorage {
    fn name(&self) -> &str {
        "mongodb"
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleRecord>> {
        let found = self
            .collection
            .find_one(doc! { "url": url })
            .await
            .map_err(|e| storage_error("Failed to look up article", e))?;

        found.as_ref().map(from_document).transpose()
    }

    async fn insert_article(&self, record: &ArticleRecord) -> Result<()> {
        self.collection
            .insert_one(to_document(record))
            .await
            .map_err(|e| storage_error("Failed to store article", e))?;
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| storage_error("Failed to count articles", e))
    }
}
