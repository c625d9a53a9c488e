//! Archives fetched over HTTP(S).

use std::io;
use std::io::Cursor;
use std::io::Read;

use reqwest::blocking::Client;
use url::Url;

use crate::ExtractionError;
use crate::Result;
use crate::formats::jar::read_error;

use super::ArchiveSource;
use super::ArchiveStream;

const USER_AGENT: &str = concat!("jarex/", env!("CARGO_PKG_VERSION"));

/// An archive behind an `http:` or `https:` URL.
///
/// The body is downloaded into memory when the source is opened and then
/// read through the central directory, so every JAR layout is supported.
/// Redirects are followed and any non-success status fails the open.
///
/// # Examples
///
/// ```no_run
/// use jarex_core::ExtractionConfig;
/// use jarex_core::NoopReporter;
/// use jarex_core::RemoteSource;
/// use jarex_core::extract_from_source;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut source = RemoteSource::new("https://example.com/robots/sample.jar".parse()?)?;
/// extract_from_source(&mut source, "/tmp/robots", &ExtractionConfig::default(), NoopReporter)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: Url,
    client: Client,
}

impl RemoteSource {
    /// Creates a source for `url` with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Source` if the HTTP client cannot be built,
    /// e.g. when no TLS backend can be initialized.
    pub fn new(url: Url) -> Result<Self> {
        Ok(Self::with_client(url, default_client()?))
    }

    /// Creates a source for `url` that fetches with `client`.
    #[must_use]
    pub fn with_client(url: Url, client: Client) -> Self {
        Self { url, client }
    }

    /// Returns the archive URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ArchiveSource for RemoteSource {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        fetch(&self.client, &self.url)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

pub(super) fn default_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(http_error)
}

/// Downloads `url` and returns the body as a seekable stream.
pub(super) fn fetch(client: &Client, url: &Url) -> Result<ArchiveStream<'static>> {
    log::debug!(target: "jarex", "fetching {url}");

    let mut response = client
        .get(url.clone())
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(http_error)?;

    let mut body = Vec::new();
    response.read_to_end(&mut body).map_err(read_error)?;

    log::debug!(target: "jarex", "fetched {} bytes from {url}", body.len());
    Ok(ArchiveStream::Seekable(Box::new(Cursor::new(body))))
}

fn http_error(err: reqwest::Error) -> ExtractionError {
    ExtractionError::Source(io::Error::other(err))
}
