use crate::error::ParseError;
use crate::model::{GameEntry, GameListPage};
use crate::parsers::html;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static COUNTER: LazyLock<Selector> = LazyLock::new(|| html::selector("p.counter"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| html::selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| html::selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| html::selector("td"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| html::selector("a"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| html::selector("img"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| html::selector("h2"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| html::selector("p"));

static PAGE_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Page\s+(\d+)\s+of\s+(\d+)$").expect("invalid regex: page counter")
});

const SMALL_THUMBS: &str = "/thumbs_small/";
const LARGE_THUMBS: &str = "/thumbs_large/";

/// Parses a `gamelistpage` container
pub fn parse(page: ElementRef) -> Result<GameListPage, ParseError> {
    let (current, total) = pagination(page)?;
    let entries = entries(page)?;

    ::log::debug!(
        "Game list page {} of {} with {} entries",
        current,
        total,
        entries.len()
    );

    Ok(GameListPage {
        entries,
        title: html::first(page, &HEADING).map(html::text).unwrap_or_default(),
        description: html::first(page, &PARAGRAPH)
            .map(html::text)
            .unwrap_or_default(),
        page: current,
        total_pages: total,
    })
}

/// Lists with many entries are split into pages carrying a "Page n of m" counter.
/// Without one the list is complete; search results always are.
fn pagination(page: ElementRef) -> Result<(u32, u32), ParseError> {
    let Some(counter) = html::first(page, &COUNTER) else {
        return Ok((1, 1));
    };

    let text = html::text(counter);
    let caps = PAGE_OF
        .captures(&text)
        .ok_or_else(|| ParseError::Pagination(text.clone()))?;

    let current: u32 = caps[1]
        .parse()
        .map_err(|_| ParseError::Pagination(text.clone()))?;
    let total: u32 = caps[2]
        .parse()
        .map_err(|_| ParseError::Pagination(text.clone()))?;

    if current == 0 || total < current {
        return Err(ParseError::Pagination(text));
    }

    Ok((current, total))
}

fn entries(page: ElementRef) -> Result<Vec<GameEntry>, ParseError> {
    // An empty search result has no table at all
    let Some(table) = html::first(page, &TABLE) else {
        return Ok(Vec::new());
    };

    // First and last rows are header and footer
    let rows = table.select(&ROW).collect::<Vec<_>>();
    if rows.len() <= 2 {
        return Ok(Vec::new());
    }

    rows[1..rows.len() - 1].iter().map(|row| entry(*row)).collect()
}

fn entry(row: ElementRef) -> Result<GameEntry, ParseError> {
    let cells: HashMap<&str, ElementRef> = row
        .select(&CELL)
        .filter_map(|cell| html::first_class(&cell).map(|class| (class, cell)))
        .collect();

    let anchor = cells
        .get("name")
        .and_then(|cell| html::first(*cell, &ANCHOR))
        .ok_or_else(|| ParseError::missing("game list name link"))?;
    let link = html::browsable(anchor).ok_or_else(|| ParseError::missing("game list link target"))?;

    let cover = cells
        .get("image")
        .and_then(|cell| html::first(*cell, &IMAGE))
        .and_then(|img| img.value().attr("src"))
        .map(large_cover);

    let field = |role: &str| cells.get(role).and_then(|cell| html::optional_text(*cell));

    Ok(GameEntry {
        name: link.name,
        path: link.path,
        cover,
        year: field("year"),
        console: field("console"),
        developer: field("developer"),
    })
}

/// Points a thumbnail at its larger variant (about 200px)
pub fn large_cover(src: &str) -> String {
    src.replace(SMALL_THUMBS, LARGE_THUMBS)
}
