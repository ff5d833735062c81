//! Headless Chrome page fetcher.
//!
//! Each fetch launches its own browser process, renders the page, reads the
//! DOM and drops the browser. Dropping `Browser` kills the process, so the
//! browser is released on every exit path, including early returns.
//!
//! `headless_chrome` is synchronous, so the whole session runs inside
//! `spawn_blocking`.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use scraper::{Html, Node};
use tracing::{debug, info};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::PageFetcher;
use crate::types::page::PageText;

/// Elements whose text is never visible.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Launch and render settings for [`BrowserFetcher`].
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Chrome/Chromium binary. `None` lets headless_chrome find one.
    pub chrome_path: Option<PathBuf>,

    /// Extra wait after the body appears, for client-side rendering.
    pub settle_delay: Duration,

    /// Upper bound on navigation and element waits.
    pub navigation_timeout: Duration,

    /// Viewport width and height.
    pub window_size: (u32, u32),
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            settle_delay: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(60),
            window_size: (1366, 900),
        }
    }
}

impl BrowserOptions {
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

/// Renders pages in a fresh headless Chrome per target.
pub struct BrowserFetcher {
    options: BrowserOptions,
}

impl BrowserFetcher {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

impl Default for BrowserFetcher {
    fn default() -> Self {
        Self::new(BrowserOptions::default())
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<PageText> {
        let target = validate_url(url)?;
        info!(url = %target, "Visiting with a headless browser");

        let options = self.options.clone();
        let html = tokio::task::spawn_blocking(move || render(&options, target.as_str()))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))??;

        let text = html_to_text(&html);
        debug!(url = %url, html_bytes = html.len(), text_chars = text.chars().count(), "Rendered page");

        if text.is_empty() {
            return Err(FetchError::EmptyPage {
                url: url.to_string(),
            });
        }

        Ok(PageText::new(url, text))
    }

    fn name(&self) -> &str {
        "headless-chrome"
    }
}

/// Accept only absolute http(s) URLs.
fn validate_url(url: &str) -> FetchResult<Url> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(parsed),
        _ => Err(FetchError::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

/// Run one browser session and return the rendered HTML.
fn render(options: &BrowserOptions, url: &str) -> FetchResult<String> {
    let launch = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .path(options.chrome_path.clone())
        .window_size(Some(options.window_size))
        .args(vec![OsStr::new("--disable-dev-shm-usage")])
        .build()
        .map_err(|e| FetchError::Launch(e.to_string()))?;

    let browser = Browser::new(launch).map_err(|e| FetchError::Launch(e.to_string()))?;

    let navigation = |e: anyhow::Error| FetchError::Navigation {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let tab = browser.new_tab().map_err(navigation)?;
    tab.set_default_timeout(options.navigation_timeout);

    tab.navigate_to(url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(navigation)?;
    tab.wait_for_element("body").map_err(navigation)?;

    if !options.settle_delay.is_zero() {
        std::thread::sleep(options.settle_delay);
    }

    tab.get_content().map_err(navigation)
}

/// Visible text of an HTML document.
///
/// Each text node is trimmed, empty ones are dropped and the rest are
/// joined with newlines. Text inside script, style, noscript and template
/// elements is skipped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut lines: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let line = text.trim();
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}
