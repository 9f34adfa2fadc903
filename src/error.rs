use crate::model::PageKind;
use thiserror::Error;

/// Raised when a document deviates from the expected template in a way that
/// makes extraction impossible. No partial record is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Zero or several page containers were found
    #[error("unsupported page, possibly a broken link")]
    UnsupportedPage,

    /// A required element is absent
    #[error("missing element: {0}")]
    MissingElement(String),

    /// Game page sub-sections are missing, extra or out of order
    #[error("unexpected game page layout: {0}")]
    SectionLayout(String),

    /// The "Page n of m" counter could not be read
    #[error("malformed pagination counter: {0:?}")]
    Pagination(String),

    /// Track length is not `mm:ss`
    #[error("malformed track duration: {0:?}")]
    Duration(String),

    /// An archive caption names a format we do not know
    #[error("unknown audio format: {0:?}")]
    UnknownFormat(String),

    /// Free-text date could not be normalized
    #[error("malformed date: {0:?}")]
    Date(String),
}

impl ParseError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }
}

/// Errors from the fetch layer and from callers asserting a page shape
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The page parsed fine but is not the shape the caller asked for
    #[error("expected {expected} page, got {found} page")]
    UnexpectedPage { expected: PageKind, found: PageKind },

    /// Search results are always served on a single page
    #[error("search result spans {0} pages")]
    PaginatedSearch(u32),
}
