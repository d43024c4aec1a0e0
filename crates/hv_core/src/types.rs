use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for an article field whose selector matched nothing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a listing item without a thumbnail.
pub const NO_IMAGE: &str = "none";

/// A teaser found on a category page. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub title: String,
    pub url: String,
    pub image: String,
}

impl ListingEntry {
    pub fn has_image(&self) -> bool {
        self.image != NO_IMAGE
    }
}

/// A fully scraped article, keyed by `url` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub category: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub published_at: String,
    pub scraped_at: DateTime<Utc>,
}

impl ArticleRecord {
    /// Builds a record, replacing absent fields with [`NOT_AVAILABLE`].
    pub fn new(
        url: impl Into<String>,
        category: Option<String>,
        title: Option<String>,
        paragraphs: impl IntoIterator<Item = String>,
        published_at: Option<String>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        let content = paragraphs
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            category: category.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            content,
            url: url.into(),
            published_at: published_at.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            scraped_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_become_sentinels() {
        let record = ArticleRecord::new(
            "https://fr.le360.ma/societe/a",
            None,
            None,
            Vec::new(),
            None,
            Utc::now(),
        );
        assert_eq!(record.category, NOT_AVAILABLE);
        assert_eq!(record.title, NOT_AVAILABLE);
        assert_eq!(record.published_at, NOT_AVAILABLE);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_content_drops_blank_paragraphs() {
        let record = ArticleRecord::new(
            "https://fr.le360.ma/societe/a",
            Some("Société".to_string()),
            Some("Titre".to_string()),
            vec!["  Premier  ".to_string(), " \n\t ".to_string(), "Second".to_string()],
            Some("Le 12/03/2025".to_string()),
            Utc::now(),
        );
        assert_eq!(record.content, "Premier\nSecond");
        assert_eq!(record.category, "Société");
    }

    #[test]
    fn test_listing_entry_image_sentinel() {
        let entry = ListingEntry {
            title: "Titre".to_string(),
            url: "https://fr.le360.ma/sport/x".to_string(),
            image: NO_IMAGE.to_string(),
        };
        assert!(!entry.has_image());
    }

    #[test]
    fn test_record_serializes_with_field_names() {
        let record = ArticleRecord::new("https://x.test/a", None, None, Vec::new(), None, Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "https://x.test/a");
        assert_eq!(json["category"], NOT_AVAILABLE);
        assert!(json.get("scraped_at").is_some());
    }
}
