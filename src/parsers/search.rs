use crate::error::ParseError;
use crate::model::{Menu, Platform, Platforms};
use crate::parsers::html;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static SIDEBAR: LazyLock<Selector> = LazyLock::new(|| html::selector("div#sidebarSearch"));
static PLATFORM_SELECT: LazyLock<Selector> = LazyLock::new(|| html::selector("#searchsearch"));
static MENU_NODES: LazyLock<Selector> = LazyLock::new(|| html::selector("h2, a"));
static OPTION: LazyLock<Selector> = LazyLock::new(|| html::selector("option"));

/// Menu sections left out of the parsed menu, items included
pub const BLACKLIST: [&str; 1] = ["Emulated Files"];

/// Where the flat heading/link walk currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    NoSection,
    Allowed(usize),
    Blacklisted,
}

impl MenuState {
    fn heading(menu: &mut Menu, name: &str) -> Self {
        if BLACKLIST.contains(&name) {
            ::log::debug!("Skipping blacklisted menu section {:?}", name);
            MenuState::Blacklisted
        } else {
            MenuState::Allowed(menu.open_section(name))
        }
    }
}

/// Parses the search page into its sidebar menu and platform selector
pub fn parse(document: &Html) -> Result<(Menu, Platforms), ParseError> {
    let root = document.root_element();

    let sidebar =
        html::first(root, &SIDEBAR).ok_or_else(|| ParseError::missing("sidebar menu"))?;
    let select =
        html::first(root, &PLATFORM_SELECT).ok_or_else(|| ParseError::missing("platform selector"))?;

    Ok((menu(sidebar), platforms(select)))
}

/// Headings and links are siblings, so sections are tracked while walking them in order
pub fn menu(sidebar: ElementRef) -> Menu {
    let mut menu = Menu::default();
    let mut state = MenuState::NoSection;

    for node in sidebar.select(&MENU_NODES) {
        if node.value().name() == "h2" {
            state = MenuState::heading(&mut menu, &html::text(node));
            continue;
        }

        let Some(link) = html::browsable(node) else {
            continue;
        };
        match state {
            MenuState::Allowed(section) => menu.push_item(section, link),
            MenuState::Blacklisted => {}
            MenuState::NoSection => {
                ::log::warn!("Ignoring menu link {:?} outside any section", link.path)
            }
        }
    }

    ::log::debug!("Parsed menu with {} sections", menu.len());
    menu
}

/// Option text and value, the text standing in for a missing value
pub fn platforms(select: ElementRef) -> Platforms {
    let platforms = select
        .select(&OPTION)
        .map(|option| {
            let name = html::text(option);
            let id = option
                .value()
                .attr("value")
                .map_or_else(|| name.clone(), str::to_string);
            Platform { name, id }
        })
        .collect();

    Platforms { platforms }
}
