//! Sources for the raw IEEE registry text.
//!
//! The pipeline only depends on [`RegistrySource`]; the HTTP download and the
//! local-file variant are interchangeable behind it.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use ouiup_common::error::UpdateError;
use tracing::debug;

/// Every record line of the IEEE text export carries this marker.
pub const REGISTRY_MARKER: &str = "(base 16)";

const USER_AGENT: &str = concat!("ouiup/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Human readable origin, used in log lines and errors.
    fn describe(&self) -> String;

    /// Retrieves the whole registry document.
    async fn fetch(&self) -> Result<String, UpdateError>;
}

pub struct HttpRegistry {
    url: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, UpdateError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpdateError::network(url.clone(), e))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl RegistrySource for HttpRegistry {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, UpdateError> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| UpdateError::network(self.describe(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::network(
                self.describe(),
                format!("server answered with status {status}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpdateError::network(self.describe(), e))?;
        ensure_registry(&self.describe(), body)
    }
}

/// A registry export that was downloaded earlier.
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RegistrySource for FileRegistry {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, UpdateError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| UpdateError::network(self.describe(), e))?;
        ensure_registry(&self.describe(), body)
    }
}

/// Rejects documents that are obviously not the IEEE export, such as an
/// error page served with a 200 status.
fn ensure_registry(origin: &str, body: String) -> Result<String, UpdateError> {
    if body.contains(REGISTRY_MARKER) {
        Ok(body)
    } else {
        Err(UpdateError::network(origin, "response is not an OUI registry"))
    }
}
