pub mod toml_config;

pub use toml_config::TomlConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::{OutputFormat, TomlConfig};
    use crate::core::fetcher::DEFAULT_TOTAL;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "juststreamit")]
    #[command(about = "Browse the JustStreamIt movie catalogue from the terminal")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Catalogue titles endpoint, overrides api.base_url
        #[arg(long, global = true)]
        pub base_url: Option<String>,

        /// Request timeout, overrides api.timeout_seconds
        #[arg(long, global = true)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
        pub format: OutputFormat,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log as JSON lines")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Best movie and the configured carousels
        Home,
        /// Top-scored titles of one genre ("best" for all genres)
        Genre {
            genre: String,
            #[arg(long, default_value_t = 0)]
            skip: usize,
            #[arg(long, default_value_t = DEFAULT_TOTAL)]
            total: usize,
        },
        /// Full record of one title
        Details { id: u64 },
        /// Titles whose name contains the query
        Search {
            query: String,
            #[arg(long, default_value_t = 1)]
            page: u32,
        },
        /// Genres known to the catalogue
        Genres,
    }

    impl CliConfig {
        /// Configuration file (or defaults) with command line overrides applied.
        pub fn effective_config(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(base_url) = &self.base_url {
                config.api.base_url = base_url.clone();
            }
            if let Some(timeout) = self.timeout_seconds {
                config.api.timeout_seconds = timeout;
            }

            config.validate()?;
            Ok(config)
        }
    }

}
