//! Command-line and environment configuration.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "articulos", about = "Terminal client for the articulos inventory API")]
pub struct Config {
    /// Base URL of the articulos API.
    #[arg(long, env = "ARTICULOS_API_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_wins() {
        let config = Config::parse_from(["articulos", "--base-url", "http://inventory:9000/"]);
        assert_eq!(config.base_url, "http://inventory:9000/");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
