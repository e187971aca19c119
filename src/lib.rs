pub mod config;
pub mod error;
pub mod graph;
pub mod http;
pub mod organisations;

pub use config::Config;
pub use error::{OrgReadError, Result};
pub use graph::{CypherExecutor, Neo4jClient};
pub use organisations::{Organisation, OrganisationQueries, OrganisationService};
