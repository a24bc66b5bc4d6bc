//! Caption font loading.
//!
//! The font database is loaded on first use and shared read-only after that.
//! A failed load leaves the cell empty so the next request tries again.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::OnceCell;
use usvg::fontdb;

/// Inter Regular (latin subset) from the fontsource CDN.
pub const DEFAULT_FONT_URL: &str =
    "https://cdn.jsdelivr.net/fontsource/fonts/inter@latest/latin-400-normal.ttf";

/// Upper bound on a whole font download, connect included.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Family name captions are rendered with.
pub const CAPTION_FAMILY: &str = "Inter";

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where caption fonts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Url(String),
    File(PathBuf),
    /// Whatever the host has installed.
    System,
}

impl Default for FontSource {
    fn default() -> Self {
        FontSource::Url(DEFAULT_FONT_URL.to_string())
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Url(url) => write!(f, "{url}"),
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::System => write!(f, "system fonts"),
        }
    }
}

pub struct FontCache {
    source: FontSource,
    fetch_timeout: Duration,
    database: OnceCell<Arc<fontdb::Database>>,
}

impl FontCache {
    pub fn new(source: FontSource) -> Self {
        Self::with_timeout(source, DEFAULT_FETCH_TIMEOUT)
    }

    /// Like [`FontCache::new`], failing URL loads that take longer than
    /// `fetch_timeout`.
    pub fn with_timeout(source: FontSource, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
            database: OnceCell::new(),
        }
    }

    /// Cache that never touches the network or disk.
    pub fn preloaded(database: fontdb::Database) -> Self {
        Self {
            source: FontSource::System,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            database: OnceCell::new_with(Some(Arc::new(database))),
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.database.initialized()
    }

    /// Font database, loading it if no earlier call succeeded.
    pub async fn get(&self) -> Result<Arc<fontdb::Database>, FontError> {
        self.database
            .get_or_try_init(|| self.load())
            .await
            .cloned()
    }

    async fn load(&self) -> Result<Arc<fontdb::Database>, FontError> {
        tracing::info!("Loading caption font from {}", self.source);
        let mut database = fontdb::Database::new();

        match &self.source {
            FontSource::Url(url) => {
                let bytes = self.fetch(url).await?;
                database.load_font_data(bytes);
            }
            FontSource::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| FontError::Read {
                    path: path.clone(),
                    source,
                })?;
                database.load_font_data(bytes);
            }
            FontSource::System => database.load_system_fonts(),
        }

        if database.is_empty() {
            tracing::warn!(
                "No font faces found in {}; captions will be missing from PNG output",
                self.source
            );
        } else {
            tracing::info!("Loaded {} font face(s)", database.len());
        }
        Ok(Arc::new(database))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FontError> {
        let fetch_err = |source| FontError::Fetch {
            url: url.to_string(),
            source,
        };
        // Every queued PNG request waits on this load, so a stalled CDN must
        // fail fast instead of hanging them all.
        let client = reqwest::Client::builder()
            .connect_timeout(self.fetch_timeout)
            .timeout(self.fetch_timeout)
            .build()
            .map_err(fetch_err)?;
        let response = client.get(url).send().await.map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FontError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("source", &self.source)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
