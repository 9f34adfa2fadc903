use crate::error::ParseError;
use crate::model::{Browsable, Page, PageKind};
use crate::parsers::{parse_page, parse_search_page};

#[cfg(test)]
mod tests {
    use super::*;

    const INFO_PAGE: &str = r#"<html><body>
        <div id="header"><a href="/">Home</a></div>
        <div id="infopage">
          <p>Browse soundtracks by developer.</p>
          <ul>
            <li><a href="/music/developer/capcom">Capcom</a></li>
            <li><a href="/music/developer/konami">Konami</a></li>
            <li><a name="anchor">No target</a></li>
            <li><a href="/music/developer/sunsoft">Sunsoft</a></li>
          </ul>
        </div>
    </body></html>"#;

    #[test]
    fn test_info_page() {
        let page = parse_page(INFO_PAGE).unwrap();
        assert_eq!(page.kind(), PageKind::Info);

        let Page::Info(info) = page else {
            unreachable!()
        };
        assert_eq!(info.description, "Browse soundtracks by developer.");
        assert_eq!(
            info.entries,
            [
                Browsable::new("Capcom", "/music/developer/capcom"),
                Browsable::new("Konami", "/music/developer/konami"),
                Browsable::new("Sunsoft", "/music/developer/sunsoft"),
            ]
        );
    }

    #[test]
    fn test_no_container() {
        let err = parse_page("<html><body><p>404 Not Found</p></body></html>").unwrap_err();
        assert_eq!(err, ParseError::UnsupportedPage);
    }

    #[test]
    fn test_ambiguous_containers() {
        let html = r#"<div id="infopage"><p>a</p></div><div id="gamelistpage"><h2>b</h2></div>"#;
        assert_eq!(parse_page(html), Err(ParseError::UnsupportedPage));
    }

    #[test]
    fn test_container_must_be_div() {
        let html = r#"<section id="infopage"><p>a</p></section>"#;
        assert_eq!(parse_page(html), Err(ParseError::UnsupportedPage));
    }

    #[test]
    fn test_dispatch_to_game_list() {
        let html = r#"<div id="gamelistpage"><h2>Top 100</h2><p>Most played</p></div>"#;
        let page = parse_page(html).unwrap();
        assert_eq!(page.kind(), PageKind::GameList);
    }

    #[test]
    fn test_search_page_is_not_dispatched() {
        let html = r#"<div id="sidebarSearch"><h2>Consoles</h2></div>
            <div id="searchsearch"><select><option value="1">NES</option></select></div>"#;
        assert_eq!(parse_page(html), Err(ParseError::UnsupportedPage));
        assert!(parse_search_page(html).is_ok());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_page(INFO_PAGE).unwrap();
        let second = parse_page(INFO_PAGE).unwrap();
        assert_eq!(first, second);

        let list = r#"<div id="gamelistpage"><h2>NES</h2><p>Found</p>
            <p class="counter">Page 1 of 3</p>
            <table><tr><th>x</th></tr>
            <tr><td class="name"><a href="/g">G</a></td></tr>
            <tr><td>y</td></tr></table></div>"#;
        assert_eq!(parse_page(list).unwrap(), parse_page(list).unwrap());
    }

    #[test]
    fn test_page_serializes_with_type_tag() {
        let page = parse_page(INFO_PAGE).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["type"], "Info");
        assert_eq!(json["entries"][0]["name"], "Capcom");
    }
}
