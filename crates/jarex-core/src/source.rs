//! Archive sources: where the archive bytes come from.
//!
//! The extraction engine needs a byte stream. [`ArchiveSource`] opens one and
//! says whether it can seek. Seekable streams (local files, in-memory buffers,
//! downloaded archives) are read through the central directory, which is the
//! only way to read entries whose sizes follow their data, as `jar` writes
//! them. Sequential streams are read front to back from local headers.
//!
//! Local files are sources directly, textual locators (`file:`, `jar:` and,
//! with the `remote` feature, `http:`/`https:` URLs) are parsed by
//! [`Locator`], and open readers are wrapped in [`SeekableSource`] or
//! [`ReaderSource`].

use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::ExtractionError;
use crate::Result;

#[cfg(feature = "remote")]
mod remote;

#[cfg(feature = "remote")]
pub use remote::RemoteSource;

/// A stream that can be read and repositioned.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// The byte stream of an opened archive.
pub enum ArchiveStream<'a> {
    /// Random access. Entries are listed from the central directory.
    Seekable(Box<dyn ReadSeek + 'a>),

    /// Front to back only. Entries are read from their local headers, so
    /// each entry must record its sizes before its data.
    Sequential(Box<dyn Read + 'a>),
}

impl ArchiveStream<'_> {
    /// Returns `true` for [`ArchiveStream::Seekable`].
    #[must_use]
    pub fn is_seekable(&self) -> bool {
        matches!(self, Self::Seekable(_))
    }
}

impl Read for ArchiveStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Seekable(inner) => inner.read(buf),
            Self::Sequential(inner) => inner.read(buf),
        }
    }
}

impl fmt::Debug for ArchiveStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seekable(_) => f.write_str("ArchiveStream::Seekable"),
            Self::Sequential(_) => f.write_str("ArchiveStream::Sequential"),
        }
    }
}

/// Opens the byte stream of an archive.
///
/// # Examples
///
/// ```
/// use jarex_core::ArchiveSource;
/// use jarex_core::ReaderSource;
/// use std::io::Read;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut source = ReaderSource::new(&b"PK"[..]);
/// let mut bytes = Vec::new();
/// source.open()?.read_to_end(&mut bytes)?;
/// assert_eq!(bytes, b"PK");
/// # Ok(())
/// # }
/// ```
pub trait ArchiveSource {
    /// Opens the stream. The returned reader is owned by the caller and
    /// released when dropped.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if a local resource cannot be opened and
    /// `ExtractionError::Source` if a remote one cannot be fetched.
    fn open(&mut self) -> Result<ArchiveStream<'_>>;

    /// Short human-readable description used in log messages.
    fn describe(&self) -> String;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &mut T {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

fn open_file(path: &Path) -> Result<ArchiveStream<'static>> {
    let file = File::open(path).map_err(ExtractionError::at(path))?;
    Ok(ArchiveStream::Seekable(Box::new(BufReader::new(file))))
}

impl ArchiveSource for Path {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        open_file(self)
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl ArchiveSource for PathBuf {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        open_file(self)
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Local(PathBuf),
    #[cfg(feature = "remote")]
    Remote(Url),
}

/// A textual reference to an archive.
///
/// Accepted forms:
///
/// - a plain filesystem path (`robots/sample.jar`)
/// - a `file:` URL (`file:///home/user/sample.jar`)
/// - a `jar:` URL pointing at the root of an archive
///   (`jar:file:///home/user/sample.jar!/`)
/// - with the `remote` feature, an `http:` or `https:` URL, bare or inside
///   `jar:` (`jar:https://example.com/sample.jar!/`)
///
/// Any other URL scheme is rejected with
/// [`ExtractionError::UnsupportedLocator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    target: Target,
}

impl Locator {
    /// Parses a locator string.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::UnsupportedLocator` for unsupported URL
    /// schemes, for `jar:` URLs that point at an entry inside the archive,
    /// and for `file:` URLs that do not map to a local path.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarex_core::Locator;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let locator = Locator::parse("jar:file:///tmp/sample.jar!/")?;
    /// assert!(locator.path().is_some_and(|p| p.ends_with("sample.jar")));
    ///
    /// assert!(Locator::parse("ftp://example.com/sample.jar").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let target = Self::resolve(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            target,
        })
    }

    fn resolve(raw: &str) -> Result<Target> {
        let unsupported = || ExtractionError::UnsupportedLocator {
            locator: raw.to_string(),
        };

        if let Some(inner) = strip_prefix_ignore_case(raw, "jar:") {
            let (archive, entry) = inner.rsplit_once("!/").ok_or_else(unsupported)?;
            if !entry.is_empty() {
                return Err(unsupported());
            }
            let url = Url::parse(archive).map_err(|_| unsupported())?;
            return url_target(&url).ok_or_else(unsupported);
        }

        match Url::parse(raw) {
            // A single-letter scheme is a Windows drive (`C:\robots\a.jar`).
            Ok(url) if url.scheme().len() == 1 => Ok(Target::Local(PathBuf::from(raw))),
            Ok(url) => url_target(&url).ok_or_else(unsupported),
            Err(_) => Ok(Target::Local(PathBuf::from(raw))),
        }
    }

    /// Returns the local archive path, or `None` for a remote archive.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.target {
            Target::Local(path) => Some(path),
            #[cfg(feature = "remote")]
            Target::Remote(_) => None,
        }
    }

    /// Returns the URL of a remote archive.
    #[cfg(feature = "remote")]
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match &self.target {
            Target::Remote(url) => Some(url),
            Target::Local(_) => None,
        }
    }

    /// Returns `true` if the archive has to be fetched over the network.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.path().is_none()
    }

    /// Returns the locator as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Locator {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl ArchiveSource for Locator {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        match &self.target {
            Target::Local(path) => open_file(path),
            #[cfg(feature = "remote")]
            Target::Remote(url) => remote::fetch(&remote::default_client()?, url),
        }
    }

    fn describe(&self) -> String {
        self.raw.clone()
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

fn url_target(url: &Url) -> Option<Target> {
    match url.scheme() {
        "file" => url.to_file_path().ok().map(Target::Local),
        #[cfg(feature = "remote")]
        "http" | "https" => Some(Target::Remote(url.clone())),
        _ => None,
    }
}

/// Wraps an open reader that can seek, such as a `Cursor` over downloaded
/// bytes.
///
/// Entries are listed from the central directory, so archives written with
/// trailing data descriptors extract fully.
#[derive(Debug)]
pub struct SeekableSource<R> {
    reader: R,
    label: String,
}

impl<R: Read + Seek> SeekableSource<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            label: String::from("<buffer>"),
        }
    }

    /// Sets the description used in log messages.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> ArchiveSource for SeekableSource<R> {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        Ok(ArchiveStream::Seekable(Box::new(&mut self.reader)))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Wraps an open reader that can only be read front to back.
///
/// The reader is handed out by reference, so the source can only be
/// extracted while it is alive and the caller keeps ownership of the stream.
///
/// Entries are read from their local headers. An entry whose sizes are only
/// recorded in a trailing data descriptor cannot be read this way and fails
/// the extraction with `InvalidArchive`; use [`SeekableSource`] when the
/// bytes can be buffered.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    label: String,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            label: String::from("<stream>"),
        }
    }

    /// Sets the description used in log messages.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ArchiveSource for ReaderSource<R> {
    fn open(&mut self) -> Result<ArchiveStream<'_>> {
        Ok(ArchiveStream::Sequential(Box::new(&mut self.reader)))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
