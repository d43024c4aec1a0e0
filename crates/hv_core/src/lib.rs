pub mod error;
pub mod storage;
pub mod types;

pub use error::Error;
pub use storage::{ArticleStorage, StoreOutcome};
pub use types::{ArticleRecord, ListingEntry, NOT_AVAILABLE, NO_IMAGE};

pub type Result<T> = std::result::Result<T, Error>;
