//! Command-line interface definitions for newsup.
//!
//! Flags override values from the optional `--config` YAML file, which in
//! turn override the built-in defaults.

use clap::Parser;
use newsup::OrderBy;
use newsup::config::{ConfigError, FeedSettings};
use std::path::PathBuf;

/// Command-line arguments for the newsup binary.
///
/// # Examples
///
/// ```sh
/// # Newest technology stories with the public test key
/// newsup
///
/// # Most relevant climate stories, also saved as JSON
/// newsup -s climate -o relevance -j ./out/climate.json
///
/// # Keep running and refresh on Enter
/// newsup -s football -i
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Free-text search query
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Sort order of the results
    #[arg(short, long, value_enum)]
    pub order_by: Option<OrderBy>,

    /// Content API key
    #[arg(long, env = "GUARDIAN_API_KEY")]
    pub api_key: Option<String>,

    /// Search endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Also write each delivered feed as JSON to this path
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Keep running: Enter or `r` refreshes, `q` quits
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Resolve the effective settings: defaults, then file, then flags.
    pub async fn settings(&self) -> Result<FeedSettings, ConfigError> {
        let base = match &self.config {
            Some(path) => FeedSettings::load(path).await?,
            None => FeedSettings::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut settings: FeedSettings) -> FeedSettings {
        if let Some(subject) = &self.subject {
            settings.subject = subject.clone();
        }
        if let Some(order_by) = self.order_by {
            settings.order_by = order_by;
        }
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "newsup",
            "--subject",
            "climate change",
            "--order-by",
            "relevance",
            "--json-output",
            "./out/feed.json",
        ]);

        assert_eq!(cli.subject.as_deref(), Some("climate change"));
        assert_eq!(cli.order_by, Some(OrderBy::Relevance));
        assert_eq!(cli.json_output, Some(PathBuf::from("./out/feed.json")));
        assert!(!cli.interactive);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["newsup", "-s", "books", "-o", "oldest", "-i"]);

        assert_eq!(cli.subject.as_deref(), Some("books"));
        assert_eq!(cli.order_by, Some(OrderBy::Oldest));
        assert!(cli.interactive);
    }

    #[test]
    fn test_cli_rejects_unknown_order() {
        assert!(Cli::try_parse_from(["newsup", "--order-by", "popular"]).is_err());
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from(["newsup", "-s", "music", "--base-url", "http://localhost/search"]);
        let file = FeedSettings {
            subject: "film".to_string(),
            order_by: OrderBy::Oldest,
            ..FeedSettings::default()
        };

        let settings = cli.apply(file);
        assert_eq!(settings.subject, "music");
        assert_eq!(settings.order_by, OrderBy::Oldest);
        assert_eq!(settings.base_url, "http://localhost/search");
    }
}
