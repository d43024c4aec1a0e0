//! Headless browser sessions.
//!
//! A [`BrowserLauncher`] holds an ordered list of [`SessionProvider`]s and
//! hands out the first session that starts. Scrapers only see the
//! [`BrowserSession`] trait, so they can be driven by WebDriver in production
//! and by static pages in tests.

use async_trait::async_trait;
use hv_core::{Error, Result};
use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};

pub mod webdriver;

pub use webdriver::{WebDriverProvider, WebDriverSession};

pub const DEFAULT_CHROMEDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_GECKODRIVER_URL: &str = "http://localhost:4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Chrome,
    Firefox,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Chrome => write!(f, "Chrome"),
            Engine::Firefox => write!(f, "Firefox"),
        }
    }
}

/// A live browser tab under our control.
#[async_trait]
pub trait BrowserSession: Send {
    fn engine(&self) -> Engine;

    /// Navigate to `url` and block until the browser reports the load
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Block until `selector` matches at least one element or `timeout` elapses
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// The rendered DOM serialized as HTML
    async fn page_source(&mut self) -> Result<String>;

    /// Terminate the browser
    async fn quit(self: Box<Self>) -> Result<()>;
}

/// Something able to start a [`BrowserSession`].
#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn engine(&self) -> Engine;

    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// WebDriver endpoints for each engine.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub chromedriver_url: String,
    pub geckodriver_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chromedriver_url: DEFAULT_CHROMEDRIVER_URL.to_string(),
            geckodriver_url: DEFAULT_GECKODRIVER_URL.to_string(),
        }
    }
}

pub struct BrowserLauncher {
    providers: Vec<Box<dyn SessionProvider>>,
}

impl BrowserLauncher {
    pub fn new(providers: Vec<Box<dyn SessionProvider>>) -> Self {
        Self { providers }
    }

    /// Headless Chrome first, headless Firefox as fallback.
    pub fn headless(config: &BrowserConfig) -> Self {
        Self::new(vec![
            Box::new(WebDriverProvider::new(Engine::Chrome, &config.chromedriver_url)),
            Box::new(WebDriverProvider::new(Engine::Firefox, &config.geckodriver_url)),
        ])
    }

    /// Start the first provider that succeeds, or fail with
    /// [`Error::NoBrowserAvailable`] once every provider has been tried.
    pub async fn try_acquire(&self) -> Result<Box<dyn BrowserSession>> {
        for provider in &self.providers {
            match provider.launch().await {
                Ok(session) => {
                    info!("🌐 Browser: {}", provider.engine());
                    return Ok(session);
                }
                Err(e) => {
                    warn!(engine = %provider.engine(), "Browser failed to start: {}", e);
                }
            }
        }

        error!(severity = "critical", "No browser available");
        Err(Error::NoBrowserAvailable)
    }

    /// Like [`try_acquire`](Self::try_acquire), with absence instead of an error.
    pub async fn acquire(&self) -> Option<Box<dyn BrowserSession>> {
        self.try_acquire().await.ok()
    }
}

/// Quit `session`, logging instead of failing.
pub async fn release(session: Box<dyn BrowserSession>) {
    let engine = session.engine();
    if let Err(e) = session.quit().await {
        warn!(%engine, "Failed to quit browser: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct NullSession(Engine);

    #[async_trait]
    impl BrowserSession for NullSession {
        fn engine(&self) -> Engine {
            self.0
        }

        async fn goto(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn wait_for(&mut self, _selector: &str, _timeout: Duration) -> Result<()> {
            Ok(())
        }

        async fn page_source(&mut self) -> Result<String> {
            Ok(String::new())
        }

        async fn quit(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    struct StubProvider {
        engine: Engine,
        works: bool,
        attempts: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SessionProvider for StubProvider {
        fn engine(&self) -> Engine {
            self.engine
        }

        async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.works {
                Ok(Box::new(NullSession(self.engine)))
            } else {
                Err(Error::Browser(format!("{} driver missing", self.engine)))
            }
        }
    }

    fn stub(engine: Engine, works: bool, attempts: &Arc<AtomicUsize>) -> Box<dyn SessionProvider> {
        Box::new(StubProvider {
            engine,
            works,
            attempts: attempts.clone(),
        })
    }

    #[tokio::test]
    async fn test_primary_engine_wins() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let launcher = BrowserLauncher::new(vec![
            stub(Engine::Chrome, true, &attempts),
            stub(Engine::Firefox, true, &attempts),
        ]);

        let session = launcher.acquire().await.unwrap();
        assert_eq!(session.engine(), Engine::Chrome);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary_engine() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let launcher = BrowserLauncher::new(vec![
            stub(Engine::Chrome, false, &attempts),
            stub(Engine::Firefox, true, &attempts),
        ]);

        let session = launcher.acquire().await.unwrap();
        assert_eq!(session.engine(), Engine::Firefox);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_browser_available() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let launcher = BrowserLauncher::new(vec![
            stub(Engine::Chrome, false, &attempts),
            stub(Engine::Firefox, false, &attempts),
        ]);

        assert!(launcher.acquire().await.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(matches!(
            launcher.try_acquire().await,
            Err(Error::NoBrowserAvailable)
        ));
    }

    #[test]
    fn test_default_driver_urls() {
        let config = BrowserConfig::default();
        assert_eq!(config.chromedriver_url, "http://localhost:9515");
        assert_eq!(config.geckodriver_url, "http://localhost:4444");
        assert_eq!(Engine::Firefox.to_string(), "Firefox");
    }
}
