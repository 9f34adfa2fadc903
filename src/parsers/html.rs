use crate::model::Browsable;
use scraper::{ElementRef, Selector};

/// Compiles a selector known at build time
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {}", css, e))
}

/// Whole text of an element with whitespace collapsed
pub fn text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Like [`text`], but `None` when nothing visible is left
pub fn optional_text(element: ElementRef) -> Option<String> {
    Some(text(element)).filter(|s| !s.is_empty())
}

/// Trimmed text nodes joined with single spaces
pub fn joined_strings(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First descendant matching `selector`
pub fn first<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Direct element children, in document order
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// First class name of an element
pub fn first_class<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().classes().next()
}

/// Turns an `<a>` element into a link, if it has a target
pub fn browsable(anchor: ElementRef) -> Option<Browsable> {
    let path = anchor.value().attr("href")?;
    Some(Browsable::new(text(anchor), path))
}

/// Every link below `element` in document order. Anchors without `href` are skipped.
pub fn links(element: ElementRef, anchors: &Selector) -> Vec<Browsable> {
    let links = element
        .select(anchors)
        .filter_map(browsable)
        .collect::<Vec<_>>();

    ::log::debug!("Found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).map(|l| &l.path).collect::<Vec<_>>()
        );
    }

    links
}
