use hv_core::{ArticleStorage, Error, Result};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

pub const DEFAULT_COLLECTION: &str = "articles360";

/// Where articles are kept, parsed from a store URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// `memory://`
    Memory,
    /// `sqlite:<path>`
    Sqlite(String),
    /// `mongodb://...` or `mongodb+srv://...`
    MongoDb(String),
}

impl FromStr for StoreTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "memory" || s.starts_with("memory://") {
            Ok(Self::Memory)
        } else if let Some(path) = s.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            if path.is_empty() {
                return Err(Error::Storage("SQLite URL needs a file path".to_string()));
            }
            Ok(Self::Sqlite(path.to_string()))
        } else if s.starts_with("mongodb://") || s.starts_with("mongodb+srv://") {
            Ok(Self::MongoDb(s.to_string()))
        } else {
            Err(Error::Storage(format!("Unsupported storage URL: {}", s)))
        }
    }
}

/// Opens the store described by `url`. `collection` names the MongoDB
/// collection and is ignored by the other backends.
#[cfg_attr(not(feature = "mongodb"), allow(unused_variables))]
pub async fn create_storage(url: &str, collection: &str) -> Result<Arc<dyn ArticleStorage>> {
    let target: StoreTarget = url.parse()?;
    let storage: Arc<dyn ArticleStorage> = match target {
        StoreTarget::Memory => Arc::new(MemoryStorage::new()),
        #[cfg(feature = "sqlite")]
        StoreTarget::Sqlite(path) => {
            Arc::new(SQLiteStorage::new_with_path(&std::path::PathBuf::from(path)).await?)
        }
        #[cfg(feature = "mongodb")]
        StoreTarget::MongoDb(uri) => Arc::new(MongoStorage::connect(&uri, collection).await?),
        #[allow(unreachable_patterns)]
        other => {
            return Err(Error::Storage(format!(
                "Storage backend for {:?} is not compiled in",
                other
            )))
        }
    };

    info!("🏦 Storage backend ready (using {})", storage.name());
    Ok(storage)
}
