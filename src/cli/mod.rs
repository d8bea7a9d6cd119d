use std::path::PathBuf;

use structopt::StructOpt;

use crate::auth::HttpMethod;

pub mod commands;
pub mod output;

pub use commands::run;

#[derive(Debug, StructOpt)]
#[structopt(name = "moviebox", about = "Browse MovieBox and resolve playable stream links")]
pub struct Opts {
    /// Configuration file. Defaults to ./moviebox.toml, then ./config.default.toml.
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[structopt(long)]
    pub log_level: Option<String>,

    /// Print results as JSON.
    #[structopt(long)]
    pub json: bool,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// List every non-empty home-feed tab and its sections.
    Tabs,

    /// List the sections of one tab.
    Categories {
        #[structopt(long)]
        tab: u32,
    },

    /// List the titles in one section of a tab.
    Items {
        #[structopt(long)]
        tab: u32,
        /// Exact section title.
        #[structopt(long)]
        category: String,
    },

    /// Search movies and series by keyword.
    Search {
        #[structopt(long = "q")]
        query: String,
        #[structopt(long, default_value = "1")]
        page: u32,
        #[structopt(long, default_value = "10")]
        per_page: u32,
    },

    /// Resolve playable stream links for a movie or an episode.
    Links {
        #[structopt(long)]
        subject_id: String,
        #[structopt(long, default_value = "0")]
        season: u32,
        #[structopt(long, default_value = "0")]
        episode: u32,
    },

    /// Print the authentication headers for a request without sending it.
    Sign {
        #[structopt(long, default_value = "GET")]
        method: HttpMethod,
        #[structopt(long)]
        url: String,
        #[structopt(long)]
        body: Option<String>,
        /// Milliseconds since the Unix epoch; defaults to now.
        #[structopt(long)]
        timestamp: Option<u64>,
    },
}
