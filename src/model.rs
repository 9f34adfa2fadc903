use crate::dates;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Audio formats offered by the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG Layer-3 lossy format
    Mp3,
    /// FLAC lossless format
    Flac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 2] = [AudioFormat::Mp3, AudioFormat::Flac];

    /// File extension, also used as the format token in captions
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
        }
    }

    /// MIME media type
    pub fn mime(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Flac => "audio/flac",
        }
    }

    /// Looks up a format by its token, ignoring case
    pub fn from_token(token: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|f| token.eq_ignore_ascii_case(f.extension()))
            .ok_or_else(|| ParseError::UnknownFormat(token.to_string()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A named link to another catalog page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browsable {
    pub name: String,
    /// Relative request path on the archive site
    pub path: String,
}

impl Browsable {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One row of a game list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub name: String,
    pub path: String,
    /// Large thumbnail URL
    pub cover: Option<String>,
    pub year: Option<String>,
    pub console: Option<String>,
    pub developer: Option<String>,
}

impl GameEntry {
    /// Display label, `"name (console)"` when the console is known
    pub fn label(&self) -> String {
        match &self.console {
            Some(console) => format!("{} ({})", self.name, console),
            None => self.name.clone(),
        }
    }

    pub fn browsable(&self) -> Browsable {
        Browsable::new(&self.name, &self.path)
    }
}

/// A soundtrack item. Only tracks with an MP3 download exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub title: String,
    #[serde(with = "duration_secs")]
    pub length: Duration,
    pub mp3_url: String,
}

impl AudioTrack {
    /// URL of this track in `format`.
    ///
    /// Other formats are derived by swapping the trailing `mp3` of the MP3 URL
    /// for the format extension. The derived resource is not checked.
    pub fn url(&self, format: AudioFormat) -> String {
        if format == AudioFormat::Mp3 {
            return self.mp3_url.clone();
        }

        let stem = match self.mp3_url.char_indices().rev().nth(2) {
            Some((idx, _)) => &self.mp3_url[..idx],
            None => "",
        };
        format!("{}{}", stem, format.extension())
    }
}

/// Game detail page with its soundtrack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePage {
    pub name: String,
    pub console: String,
    pub cover: Option<String>,
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    /// Original (emulator) music files
    pub originals: Option<String>,
    /// Whole-soundtrack archives by format
    pub archives: BTreeMap<AudioFormat, String>,
    pub tracks: Vec<AudioTrack>,
}

impl GamePage {
    pub fn has_format(&self, format: AudioFormat) -> bool {
        self.archives.contains_key(&format)
    }

    /// FLAC when asked for and offered, otherwise MP3
    pub fn preferred_format(&self, prefer_lossless: bool) -> AudioFormat {
        if prefer_lossless && self.has_format(AudioFormat::Flac) {
            AudioFormat::Flac
        } else {
            AudioFormat::Mp3
        }
    }

    /// Numbered, playable items for every track in `format`
    pub fn playlist(&self, format: AudioFormat) -> Vec<PlaylistItem> {
        let release_date = self.release_date.as_deref().and_then(|raw| {
            dates::normalize(raw)
                .map_err(|e| ::log::debug!("Keeping playlist without release date: {}", e))
                .ok()
        });

        self.tracks
            .iter()
            .enumerate()
            .map(|(idx, track)| PlaylistItem {
                number: idx + 1,
                title: track.title.clone(),
                url: track.url(format),
                mime: format.mime(),
                duration_secs: track.length.as_secs(),
                album: self.name.clone(),
                artist: self.developer.clone(),
                release_date: release_date.clone(),
                cover: self.cover.clone(),
            })
            .collect()
    }
}

/// A track as a music player would list it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistItem {
    pub number: usize,
    pub title: String,
    pub url: String,
    pub mime: &'static str,
    pub duration_secs: u64,
    pub album: String,
    pub artist: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub cover: Option<String>,
}

/// One page of a possibly multi-page game list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameListPage {
    pub entries: Vec<GameEntry>,
    pub title: String,
    /// Result statistics or any description
    pub description: String,
    pub page: u32,
    pub total_pages: u32,
}

impl GameListPage {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Simple list of links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoPage {
    pub entries: Vec<Browsable>,
    pub description: String,
}

/// A named menu section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<Browsable>,
}

/// Root navigation, sections in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub sections: Vec<MenuSection>,
}

impl Menu {
    pub fn get(&self, name: &str) -> Option<&[Browsable]> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.items.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Opens a section and returns its index. A repeated name is emptied in place.
    pub(crate) fn open_section(&mut self, name: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            self.sections[idx].items.clear();
            return idx;
        }
        self.sections.push(MenuSection {
            name: name.to_string(),
            items: Vec::new(),
        });
        self.sections.len() - 1
    }

    pub(crate) fn push_item(&mut self, section: usize, item: Browsable) {
        self.sections[section].items.push(item);
    }
}

/// A selectable search platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    /// Value sent as `search_consoleid`
    pub id: String,
}

/// Search platforms in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    pub platforms: Vec<Platform>,
}

impl Platforms {
    /// Id of the platform with the given display name
    pub fn id(&self, name: &str) -> Option<&str> {
        self.platforms
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id.as_str())
    }

    pub fn first(&self) -> Option<&Platform> {
        self.platforms.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Page templates recognized by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    GameList,
    Game,
    Info,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::GameList, PageKind::Game, PageKind::Info];

    /// Id of the container element carrying this template
    pub fn container_id(self) -> &'static str {
        match self {
            PageKind::GameList => "gamelistpage",
            PageKind::Game => "gamepage",
            PageKind::Info => "infopage",
        }
    }

    pub fn from_container_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.container_id() == id)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::GameList => "game list",
            PageKind::Game => "game",
            PageKind::Info => "info",
        };
        f.write_str(name)
    }
}

/// Any page the dispatcher can parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Page {
    GameList(GameListPage),
    Game(GamePage),
    Info(InfoPage),
}

impl Page {
    pub fn kind(&self) -> PageKind {
        match self {
            Page::GameList(_) => PageKind::GameList,
            Page::Game(_) => PageKind::Game,
            Page::Info(_) => PageKind::Info,
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
