use clap::Parser;
use serde::Serialize;
use std::error::Error;
use zophar_scrape::{Browser, BrowserConfig, Page};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => BrowserConfig::from_file(path)?,
        None => BrowserConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }

    ::log::info!("Browsing {}", config.base_url);
    let browser = Browser::new(config)?;

    match args.command {
        Command::Menu => {
            let (menu, _) = browser.home().await?;
            print_json(&menu)
        }
        Command::Platforms => {
            let (_, platforms) = browser.home().await?;
            print_json(&platforms)
        }
        Command::Page { path } => print_json(&browser.page(&path).await?),
        Command::List { path, max_pages } => {
            let start_time = std::time::Instant::now();
            let pages = browser.gamelist_all(&path, max_pages).await?;
            ::log::info!(
                "Fetched {} pages in {:.2} seconds",
                pages.len(),
                start_time.elapsed().as_secs_f64()
            );
            let entries = pages.into_iter().flat_map(|p| p.entries).collect::<Vec<_>>();
            print_json(&entries)
        }
        Command::Search { text, platform } => {
            let (_, platforms) = browser.home().await?;
            let id = match &platform {
                Some(name) => platforms
                    .id(name)
                    .ok_or_else(|| format!("unknown platform: {}", name))?,
                None => platforms
                    .first()
                    .map(|p| p.id.as_str())
                    .ok_or("search page lists no platforms")?,
            };
            let result = browser.search(&text, id).await?;
            if result.is_empty() {
                ::log::warn!("Nothing found for {:?}", text);
            }
            print_json(&result)
        }
        Command::Playlist { path, flac } => match browser.page(&path).await? {
            Page::Game(game) => print_json(&game.playlist(game.preferred_format(flac))),
            other => Err(format!("{} is a {} page, not a game page", path, other.kind()).into()),
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
