use crate::error::ParseError;
use crate::model::{AudioFormat, AudioTrack, GamePage};
use crate::parsers::html;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

static IMAGE: LazyLock<Selector> = LazyLock::new(|| html::selector("img"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| html::selector("h2"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| html::selector("p"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| html::selector("a"));
static ROW: LazyLock<Selector> = LazyLock::new(|| html::selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| html::selector("td"));

static ARCHIVE_CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^download\s+all\s+files\s+as\s+(\S+)$")
        .expect("invalid regex: archive caption")
});

/// Sub-section ids of a game page, in the order they must appear
pub const SECTION_IDS: [&str; 4] = ["music_cover", "music_info", "mass_download", "tracklist"];

/// Info labels kept on the record. Everything else is template noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InfoField {
    Console,
    ReleaseDate,
    Developer,
    Publisher,
}

impl InfoField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "console" => Some(InfoField::Console),
            "release_date" => Some(InfoField::ReleaseDate),
            "developer" => Some(InfoField::Developer),
            "publisher" => Some(InfoField::Publisher),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Info {
    console: Option<String>,
    release_date: Option<String>,
    developer: Option<String>,
    publisher: Option<String>,
}

impl Info {
    fn set(&mut self, field: InfoField, value: String) {
        let slot = match field {
            InfoField::Console => &mut self.console,
            InfoField::ReleaseDate => &mut self.release_date,
            InfoField::Developer => &mut self.developer,
            InfoField::Publisher => &mut self.publisher,
        };
        *slot = Some(value);
    }
}

/// Parses a `gamepage` container
pub fn parse(page: ElementRef) -> Result<GamePage, ParseError> {
    let [cover, info, download, tracklist] = sections(page)?;

    let name = html::first(info, &HEADING)
        .map(html::text)
        .ok_or_else(|| ParseError::missing("game title"))?;
    let fields = info_fields(info);
    let (originals, archives) = downloads(download)?;
    let tracks = tracks(tracklist)?;

    ::log::debug!(
        "Game page {:?}: {} tracks, archives in {:?}",
        name,
        tracks.len(),
        archives.keys().collect::<Vec<_>>()
    );

    Ok(GamePage {
        name,
        console: fields.console.unwrap_or_default(),
        cover: html::first(cover, &IMAGE)
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string),
        release_date: fields.release_date,
        developer: fields.developer,
        publisher: fields.publisher,
        originals,
        archives,
        tracks,
    })
}

/// The four fixed sub-sections, checked for count and order
fn sections(page: ElementRef) -> Result<[ElementRef; 4], ParseError> {
    let found = html::child_elements(page)
        .filter(|el| el.value().id().is_some_and(|id| SECTION_IDS.contains(&id)))
        .collect::<Vec<_>>();

    let ids = found
        .iter()
        .filter_map(|el| el.value().id())
        .collect::<Vec<_>>();
    if ids != SECTION_IDS {
        return Err(ParseError::SectionLayout(format!(
            "expected sections {:?}, found {:?}",
            SECTION_IDS, ids
        )));
    }

    found
        .try_into()
        .map_err(|_| ParseError::SectionLayout("section count".to_string()))
}

/// `"Release date:"` becomes `"release_date"`. Only the first letter is lowercased.
pub fn field_key(label: &str) -> String {
    let key = label.split_whitespace().collect::<Vec<_>>().join("_");
    let key = key.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '_');

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Each info row is a `<p>` with an `infoname` and an `infodata` span
fn info_fields(info: ElementRef) -> Info {
    let mut fields = Info::default();

    for row in info.select(&PARAGRAPH) {
        let spans = html::child_elements(row)
            .filter(|el| el.value().name() == "span")
            .collect::<Vec<_>>();
        let [label, data] = spans.as_slice() else {
            ::log::trace!("Skipping info row with {} spans", spans.len());
            continue;
        };

        let key = field_key(&html::text(*label));
        match InfoField::from_key(&key) {
            Some(field) => fields.set(field, html::joined_strings(*data)),
            None => ::log::debug!("Dropping unknown info field {:?}", key),
        }
    }

    fields
}

type Downloads = (Option<String>, BTreeMap<AudioFormat, String>);

/// Original files link plus one archive per offered format
fn downloads(download: ElementRef) -> Result<Downloads, ParseError> {
    let mut originals = None;
    let mut archives = BTreeMap::new();

    for anchor in download.select(&ANCHOR) {
        let Some(url) = anchor.value().attr("href") else {
            continue;
        };
        let caption = html::first(anchor, &PARAGRAPH)
            .map(html::text)
            .unwrap_or_else(|| html::text(anchor));

        // "Download original music files"
        if caption
            .split_whitespace()
            .any(|word| word.eq_ignore_ascii_case("original"))
        {
            originals = Some(url.to_string());
            continue;
        }

        // "Download all files as {format}"
        let token = ARCHIVE_CAPTION
            .captures(&caption)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| ParseError::UnknownFormat(caption.clone()))?;
        archives.insert(AudioFormat::from_token(&token)?, url.to_string());
    }

    Ok((originals, archives))
}

/// `"1:23"` as a duration. Both parts are plain digits and seconds stay below 60.
pub fn track_length(text: &str) -> Result<Duration, ParseError> {
    let err = || ParseError::Duration(text.to_string());

    let (minutes, seconds) = text.trim().split_once(':').ok_or_else(err)?;
    let minutes = digits(minutes).ok_or_else(err)?;
    let seconds = digits(seconds).filter(|s| *s < 60).ok_or_else(err)?;

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(err)?;
    Ok(Duration::from_secs(total))
}

/// Unsigned decimal made of ASCII digits only
fn digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Rows are `number | name | length | download...`. Only rows with an MP3 link yield a track.
fn tracks(tracklist: ElementRef) -> Result<Vec<AudioTrack>, ParseError> {
    let mut tracks = Vec::new();

    for row in tracklist.select(&ROW) {
        let cells = row.select(&CELL).collect::<Vec<_>>();
        let (name, length, links) = match cells.as_slice() {
            [] => continue,
            [_, name, length, links @ ..] => (*name, *length, links),
            _ => return Err(ParseError::missing("track name or length cell")),
        };

        let title = html::text(name);
        let length = track_length(&html::text(length))?;

        let mp3 = links
            .iter()
            .filter_map(|cell| html::first(*cell, &ANCHOR))
            .filter_map(|a| a.value().attr("href"))
            .find(|url| is_mp3(url));

        match mp3 {
            Some(url) => tracks.push(AudioTrack {
                title,
                length,
                mp3_url: url.to_string(),
            }),
            None => ::log::debug!("Skipping track {:?} without MP3 download", title),
        }
    }

    Ok(tracks)
}

fn is_mp3(url: &str) -> bool {
    let extension = url.rsplit_once('.').map_or("", |(_, ext)| ext);
    match AudioFormat::from_token(extension) {
        Ok(format) => format == AudioFormat::Mp3,
        Err(_) => {
            ::log::trace!("Ignoring track link of unknown format: {}", url);
            false
        }
    }
}
