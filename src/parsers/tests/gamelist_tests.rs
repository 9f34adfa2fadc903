use crate::error::ParseError;
use crate::model::{GameListPage, Page};
use crate::parsers::{gamelist, parse_page};

#[cfg(test)]
mod gamelist_tests {
    use super::*;

    const NES_PAGE: &str = r#"<html><body>
        <div id="gamelistpage">
          <h2>Nintendo NES</h2>
          <p>Found 2 games</p>
          <p class="counter">Page 2 of 5</p>
          <table>
            <tr><th>Image</th><th>Name</th><th>Year</th><th>Developer</th></tr>
            <tr>
              <td class="image"><a href="/music/nintendo-nes-nsf/contra"><img src="https://fi.zophar.net/images/thumbs_small/contra.jpg"></a></td>
              <td class="name"><a href="/music/nintendo-nes-nsf/contra">Contra</a></td>
              <td class="year">1988</td>
              <td class="developer">Konami</td>
            </tr>
            <tr>
              <td class="image"></td>
              <td class="name"><a href="/music/nintendo-nes-nsf/zelda">The Legend of Zelda</a></td>
              <td class="year"></td>
            </tr>
            <tr><td colspan="4">Page 2 of 5</td></tr>
          </table>
        </div>
    </body></html>"#;

    fn parse_list(html: &str) -> Result<GameListPage, ParseError> {
        match parse_page(html)? {
            Page::GameList(list) => Ok(list),
            other => panic!("expected a game list, got {:?}", other.kind()),
        }
    }

    fn page_with(inner: &str) -> String {
        format!(r#"<div id="gamelistpage"><h2>Title</h2><p>Text</p>{}</div>"#, inner)
    }

    #[test]
    fn test_pagination_counter() {
        let list = parse_list(NES_PAGE).unwrap();
        assert_eq!(list.page, 2);
        assert_eq!(list.total_pages, 5);
        assert!(list.has_next());
    }

    #[test]
    fn test_absent_counter_is_single_page() {
        let list = parse_list(&page_with("")).unwrap();
        assert_eq!((list.page, list.total_pages), (1, 1));
        assert!(!list.has_next());
    }

    #[test]
    fn test_malformed_counter() {
        let err = parse_list(&page_with(r#"<p class="counter">Page two of five</p>"#)).unwrap_err();
        assert_eq!(err, ParseError::Pagination("Page two of five".to_string()));

        let err = parse_list(&page_with(r#"<p class="counter">Page 3 of 2</p>"#)).unwrap_err();
        assert!(matches!(err, ParseError::Pagination(_)));

        let err = parse_list(&page_with(r#"<p class="counter">Page 0 of 2</p>"#)).unwrap_err();
        assert!(matches!(err, ParseError::Pagination(_)));
    }

    #[test]
    fn test_title_and_description() {
        let list = parse_list(NES_PAGE).unwrap();
        assert_eq!(list.title, "Nintendo NES");
        assert_eq!(list.description, "Found 2 games");
    }

    #[test]
    fn test_entries() {
        let list = parse_list(NES_PAGE).unwrap();
        assert_eq!(list.entries.len(), 2);

        let contra = &list.entries[0];
        assert_eq!(contra.name, "Contra");
        assert_eq!(contra.path, "/music/nintendo-nes-nsf/contra");
        assert_eq!(
            contra.cover.as_deref(),
            Some("https://fi.zophar.net/images/thumbs_large/contra.jpg")
        );
        assert_eq!(contra.year.as_deref(), Some("1988"));
        assert_eq!(contra.developer.as_deref(), Some("Konami"));
        assert_eq!(contra.console, None);
    }

    #[test]
    fn test_missing_optional_cells() {
        let list = parse_list(NES_PAGE).unwrap();
        let zelda = &list.entries[1];
        assert_eq!(zelda.name, "The Legend of Zelda");
        assert_eq!(zelda.cover, None);
        assert_eq!(zelda.year, None);
        assert_eq!(zelda.developer, None);
        assert_eq!(zelda.console, None);
    }

    #[test]
    fn test_header_and_footer_only() {
        let table = r#"<table><tr><th>Name</th></tr><tr><td>footer</td></tr></table>"#;
        let list = parse_list(&page_with(table)).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_no_table() {
        let list = parse_list(&page_with("<p>No games found</p>")).unwrap();
        assert!(list.entries.is_empty());
        assert_eq!((list.page, list.total_pages), (1, 1));
    }

    #[test]
    fn test_row_without_name_link() {
        let table = r#"<table>
            <tr><th>Name</th></tr>
            <tr><td class="image"></td><td class="name">Unlinked</td></tr>
            <tr><td>footer</td></tr>
        </table>"#;
        let err = parse_list(&page_with(table)).unwrap_err();
        assert!(matches!(err, ParseError::MissingElement(_)));
    }

    #[test]
    fn test_console_cell() {
        let table = r#"<table>
            <tr><th>Name</th></tr>
            <tr><td class="name"><a href="/g">Mega Man</a></td><td class="console">NES</td></tr>
            <tr><td>footer</td></tr>
        </table>"#;
        let list = parse_list(&page_with(table)).unwrap();
        assert_eq!(list.entries[0].console.as_deref(), Some("NES"));
        assert_eq!(list.entries[0].label(), "Mega Man (NES)");
    }

    #[test]
    fn test_large_cover_rewrite() {
        assert_eq!(
            gamelist::large_cover("https://x/images/thumbs_small/a.jpg"),
            "https://x/images/thumbs_large/a.jpg"
        );
        assert_eq!(
            gamelist::large_cover("https://x/images/covers/a.jpg"),
            "https://x/images/covers/a.jpg"
        );
    }
}
