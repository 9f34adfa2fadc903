pub mod game;
pub mod gamelist;
pub mod html;
pub mod info;
pub mod search;

#[cfg(test)]
mod tests;

use crate::error::ParseError;
use crate::model::{Menu, Page, PageKind, Platforms};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static CONTAINERS: LazyLock<Selector> = LazyLock::new(|| {
    let css = PageKind::ALL
        .iter()
        .map(|kind| format!("div#{}", kind.container_id()))
        .collect::<Vec<_>>()
        .join(", ");
    html::selector(&css)
});

/// Parses any supported page template from raw HTML
pub fn parse_page(text: &str) -> Result<Page, ParseError> {
    let document = Html::parse_document(text);
    parse_document(&document)
}

/// Finds the single page container and routes it to its parser
pub fn parse_document(document: &Html) -> Result<Page, ParseError> {
    let containers = document.select(&CONTAINERS).collect::<Vec<_>>();
    let [container] = containers.as_slice() else {
        ::log::debug!("Found {} page containers", containers.len());
        return Err(ParseError::UnsupportedPage);
    };

    let kind = container
        .value()
        .id()
        .and_then(PageKind::from_container_id)
        .unwrap_or_else(|| unreachable!("container selector only matches known page ids"));
    ::log::debug!("Classifying as {} page", kind);

    Ok(match kind {
        PageKind::GameList => Page::GameList(gamelist::parse(*container)?),
        PageKind::Game => Page::Game(game::parse(*container)?),
        PageKind::Info => Page::Info(info::parse(*container)),
    })
}

/// Parses the search (home) page into the root menu and search platforms
pub fn parse_search_page(text: &str) -> Result<(Menu, Platforms), ParseError> {
    let document = Html::parse_document(text);
    search::parse(&document)
}
