//! Where workbook bytes come from: a public cloud link or a local file.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const YANDEX_API_BASE: &str = "https://cloud-api.yandex.net/v1/disk/public/resources/download";

/// Produces the raw bytes of an xlsx workbook.
pub trait WorkbookSource: Send + Sync {
    /// Short human-readable origin for logs and messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> AppResult<Vec<u8>>;
}

/// Public-link download: ask the disk API for a one-time `href`, then GET it.
#[derive(Debug, Clone)]
pub struct YandexDiskSource {
    public_link: String,
    api_base: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct DownloadLink {
    href: String,
}

impl YandexDiskSource {
    pub fn new(public_link: impl Into<String>) -> Self {
        Self {
            public_link: public_link.into(),
            api_base: YANDEX_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // The blocking client owns a runtime; build it on the calling
    // (blocking) thread, never inside async code.
    fn client(&self) -> AppResult<reqwest::blocking::Client> {
        Ok(reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?)
    }

    fn resolve_href(&self, client: &reqwest::blocking::Client) -> AppResult<String> {
        let response = client
            .get(&self.api_base)
            .query(&[("public_key", self.public_link.as_str())])
            .send()?;

        if !response.status().is_success() {
            return Err(AppError::Retrieval(format!(
                "download link request failed with HTTP {}",
                response.status()
            )));
        }

        let link: DownloadLink = response
            .json()
            .map_err(|e| AppError::Retrieval(format!("unexpected download link response: {e}")))?;
        Ok(link.href)
    }
}

impl WorkbookSource for YandexDiskSource {
    fn describe(&self) -> String {
        format!("public link {}", self.public_link)
    }

    fn fetch(&self) -> AppResult<Vec<u8>> {
        let client = self.client()?;
        let href = self.resolve_href(&client)?;
        log::debug!("Downloading workbook from {href}");

        let response = client.get(&href).send()?;
        if !response.status().is_success() {
            return Err(AppError::Retrieval(format!(
                "workbook download failed with HTTP {}",
                response.status()
            )));
        }

        let bytes = response.bytes()?;
        log::info!("Downloaded workbook ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// A workbook already on disk.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkbookSource for LocalFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> AppResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            AppError::Retrieval(format!("cannot read {}: {e}", self.path.display()))
        })
    }
}

/// Local file when given, otherwise the configured public link.
pub fn source_for(cfg: &Config, xlsx: Option<&Path>) -> Box<dyn WorkbookSource> {
    match xlsx {
        Some(path) => Box::new(LocalFileSource::new(path)),
        None => Box::new(YandexDiskSource::new(cfg.public_link.clone())),
    }
}
