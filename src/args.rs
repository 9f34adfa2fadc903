use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zophar-scrape")]
#[command(about = "Browse the Zophar game-music archive from the command line")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the site base URL
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the root menu
    Menu,

    /// Print the platforms usable as a search filter
    Platforms,

    /// Parse whatever page lives at a path
    Page {
        /// Site path, e.g. /music/nintendo-nes-nsf
        path: String,
    },

    /// Collect every page of a game list
    List {
        path: String,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Search game titles
    Search {
        text: String,

        /// Platform display name (defaults to the first listed platform)
        #[arg(short, long)]
        platform: Option<String>,
    },

    /// Print the playable tracks of a game page
    Playlist {
        path: String,

        /// Prefer FLAC when the game offers it
        #[arg(long)]
        flac: bool,
    },
}
