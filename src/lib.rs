//! Scraper for the Zophar game-music archive.
//!
//! Page templates of the site are parsed into a typed catalog: menus, search
//! platforms, paginated game lists, game pages with their soundtracks and
//! plain link pages. Parsing is a pure function of the page text; fetching
//! lives in [`browser`].

pub mod browser;
pub mod config;
pub mod dates;
pub mod error;
pub mod model;
pub mod parsers;

// Re-export commonly used types for convenience
pub use browser::{Browser, Fetch, HttpFetcher};
pub use config::BrowserConfig;
pub use error::{BrowseError, ParseError};
pub use model::{
    AudioFormat, AudioTrack, Browsable, GameEntry, GameListPage, GamePage, InfoPage, Menu,
    MenuSection, Page, PageKind, Platform, Platforms, PlaylistItem,
};
pub use parsers::{parse_page, parse_search_page};
