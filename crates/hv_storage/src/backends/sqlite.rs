use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hv_core::{ArticleRecord, ArticleStorage, Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::PathBuf;
use std::sync::Arc;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        url TEXT PRIMARY KEY,
        category TEXT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        published_at TEXT NOT NULL,
        scraped_at TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {}", context, e))
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| storage_error("Failed to connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| storage_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.clone(),
        })
    }

    pub fn get_db_path(&self) -> &PathBuf {
        &self.db_path
    }

    fn row_to_article(row: &SqliteRow) -> Result<ArticleRecord> {
        let scraped_at: String = row.get("scraped_at");
        let scraped_at = DateTime::parse_from_rfc3339(&scraped_at)
            .map_err(|e| storage_error("Failed to parse scraped_at", e))?
            .with_timezone(&Utc);

        Ok(ArticleRecord {
            category: row.get("category"),
            title: row.get("title"),
            content: row.get("content"),
            url: row.get("url"),
            published_at: row.get("published_at"),
            scraped_at,
        })
    }
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<ArticleRecord>> {
        let row = sqlx::query(
            r#"
            SELECT url, category, title, content, published_at, scraped_at
            FROM articles
            WHERE url = ?
            "#,
        )
        .bind(url)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| storage_error("Failed to look up article", e))?;

        row.as_ref().map(Self::row_to_article).transpose()
    }

    async fn insert_article(&self, record: &ArticleRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO articles
            (url, category, title, content, published_at, scraped_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.url)
        .bind(&record.category)
        .bind(&record.title)
        .bind(&record.content)
        .bind(&record.published_at)
        .bind(record.scraped_at.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| storage_error("Failed to store article", e))?;

        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM articles")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| storage_error("Failed to count articles", e))?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }
}
