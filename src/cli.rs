use std::path::PathBuf;

use clap::Parser;

/// Browse the PokeAPI creature catalog from the terminal
#[derive(Debug, Parser)]
#[command(name = "dex", version, about)]
pub struct Cli {
    /// API base URL (default https://pokeapi.co/api/v2)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Base URL for artwork images; `<id>.png` is appended
    #[arg(long, value_name = "URL")]
    pub sprite_base: Option<String>,

    /// Number of entries to fetch at startup
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Cards per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Seconds between carousel slides
    #[arg(long, value_name = "SECS")]
    pub carousel_interval: Option<u64>,

    /// Config file (default: <config dir>/dex/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file (default: <cache dir>/dex/dex.log). Filter with RUST_LOG
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_no_overrides() {
        let cli = Cli::parse_from(["dex"]);
        assert!(cli.api_base.is_none());
        assert!(cli.limit.is_none());
        assert!(cli.page_size.is_none());
        assert!(cli.config.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn rejects_non_numeric_limit() {
        assert!(Cli::try_parse_from(["dex", "--limit", "lots"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
