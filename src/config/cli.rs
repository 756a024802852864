use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "price-finder")]
#[command(about = "Compare product prices across regional e-commerce sites")]
pub struct CliConfig {
    /// TOML 設定檔路徑
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run a single price search and print the results
    Search {
        query: String,

        #[arg(long, short)]
        country: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = CliConfig::parse_from([
            "price-finder",
            "search",
            "iPhone 16 Pro, 128GB",
            "--country",
            "in",
            "--format",
            "csv",
        ]);

        match cli.command {
            Command::Search {
                query,
                country,
                format,
            } => {
                assert_eq!(query, "iPhone 16 Pro, 128GB");
                assert_eq!(country.as_deref(), Some("in"));
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_global_flags() {
        let cli = CliConfig::parse_from([
            "price-finder",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--verbose",
            "--config",
            "price-finder.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("price-finder.toml")));
        assert!(matches!(
            cli.command,
            Command::Serve { bind: Some(ref b) } if b == "127.0.0.1:8080"
        ));
    }

    #[test]
    fn test_search_defaults_to_table() {
        let cli = CliConfig::parse_from(["price-finder", "search", "Pixel 9"]);
        assert!(matches!(
            cli.command,
            Command::Search {
                format: OutputFormat::Table,
                country: None,
                ..
            }
        ));
    }
}
