use crate::model::InfoPage;
use crate::parsers::html;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| html::selector("a"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| html::selector("p"));

/// Parses an `infopage` container: its links and a description
pub fn parse(page: ElementRef) -> InfoPage {
    InfoPage {
        entries: html::links(page, &ANCHOR),
        description: html::first(page, &PARAGRAPH)
            .map(html::text)
            .unwrap_or_default(),
    }
}
