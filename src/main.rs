use anyhow::{Context, Result};
use org_read_public::http::HttpServer;
use org_read_public::{Config, Neo4jClient, OrganisationQueries, OrganisationService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let config = Config::load()?;
    log::info!("Starting org-read-public v{}", env!("CARGO_PKG_VERSION"));

    let client = Neo4jClient::connect(&config.neo_url, config.query_timeout())
        .await
        .with_context(|| format!("Failed to connect to {}", config.neo_url))?;
    log::info!("connected to {}", config.neo_url);

    // One graph client for the whole process, shared by every request
    let queries = OrganisationQueries::new(Arc::new(client), config.query_timeout());
    let server = HttpServer::new(OrganisationService::new(queries));

    server.run(config.listen_addr()?).await?;

    Ok(())
}
