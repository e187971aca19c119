use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Startup configuration
///
/// Every option can be given as a command-line flag or an environment variable.
/// A `.env` file in the working directory is honoured by [`Config::load`].
#[derive(Debug, Clone, Parser)]
#[command(
    name = "org-read-public",
    version,
    about = "A RESTful API for the public organisations read endpoint"
)]
pub struct Config {
    /// Neo4j endpoint URL
    #[arg(long, env = "NEO_URL", default_value = "http://localhost:7474/db/data")]
    pub neo_url: String,

    /// Port to listen on
    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind the HTTP listener to
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Upper bound on each graph query round-trip, in seconds
    #[arg(long, env = "QUERY_TIMEOUT_SECS", default_value_t = 10)]
    pub query_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process arguments and environment
    ///
    /// Loads environment variables from a .env file (if present) before parsing,
    /// then validates the result.
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.neo_url)
            .with_context(|| format!("neo-url is not a valid URL: {}", self.neo_url))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "neo-url must use http or https, got '{}': {}",
                url.scheme(),
                self.neo_url
            );
        }

        if self.query_timeout_secs == 0 {
            anyhow::bail!("query-timeout-secs must be greater than 0");
        }

        self.listen_addr()?;

        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))
    }

    /// Per-query deadline
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
