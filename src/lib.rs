pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpCatalogue;
pub use app::TerminalRenderer;
pub use config::{OutputFormat, TomlConfig};
pub use core::{fetcher::GenreFetcher, service::MovieService};
pub use utils::error::{CatalogueError, Result};
