use async_trait::async_trait;
use hv_core::{Error, Result};
use std::time::Duration;
use thirtyfour::prelude::*;
use thirtyfour::Capabilities;
use tracing::debug;

use super::{BrowserSession, Engine, SessionProvider};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

const CHROME_ARGS: &[&str] = &[
    "--headless",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--window-size=1920,1080",
];

fn browser_error(context: &str, e: WebDriverError) -> Error {
    Error::Browser(format!("{}: {}", context, e))
}

/// Starts headless sessions against a running chromedriver or geckodriver.
pub struct WebDriverProvider {
    engine: Engine,
    server_url: String,
}

impl WebDriverProvider {
    pub fn new(engine: Engine, server_url: &str) -> Self {
        Self {
            engine,
            server_url: server_url.to_string(),
        }
    }

    fn capabilities(&self) -> WebDriverResult<Capabilities> {
        match self.engine {
            Engine::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                caps.add_chrome_option("args", CHROME_ARGS.to_vec())?;
                Ok(caps.into())
            }
            Engine::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                caps.set_headless()?;
                Ok(caps.into())
            }
        }
    }
}

#[async_trait]
impl SessionProvider for WebDriverProvider {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let caps = self
            .capabilities()
            .map_err(|e| browser_error("Invalid capabilities", e))?;
        debug!(engine = %self.engine, server = %self.server_url, "Connecting to WebDriver");

        let driver = WebDriver::new(&self.server_url, caps)
            .await
            .map_err(|e| browser_error(&format!("Failed to connect to {}", self.server_url), e))?;

        Ok(Box::new(WebDriverSession {
            driver,
            engine: self.engine,
        }))
    }
}

pub struct WebDriverSession {
    driver: WebDriver,
    engine: Engine,
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| browser_error(&format!("Failed to navigate to {}", url), e))
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.driver
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map(|_| ())
            .map_err(|e| {
                debug!(selector, "Wait failed: {}", e);
                Error::element_not_found(selector)
            })
    }

    async fn page_source(&mut self) -> Result<String> {
        self.driver
            .source()
            .await
            .map_err(|e| browser_error("Failed to get page source", e))
    }

    async fn quit(self: Box<Self>) -> Result<()> {
        self.driver
            .quit()
            .await
            .map_err(|e| browser_error("Failed to quit browser", e))
    }
}
