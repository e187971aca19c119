//! Organisation read path: graph traversals, vocabulary, and public model.

pub mod mapper;
pub mod model;
pub mod query;
pub mod vocabulary;

pub use model::Organisation;
pub use query::OrganisationQueries;

use crate::error::Result;

/// Reads one organisation and its memberships and maps them to the public model.
#[derive(Clone)]
pub struct OrganisationService {
    queries: OrganisationQueries,
}

impl OrganisationService {
    pub fn new(queries: OrganisationQueries) -> Self {
        Self { queries }
    }

    /// `Ok(None)` when no organisation has this identifier.
    ///
    /// The organisation is fetched first; memberships are only queried once it
    /// is known to exist.
    pub async fn read(&self, uuid: &str) -> Result<Option<Organisation>> {
        let record = match self.queries.fetch_organisation(uuid).await? {
            Some(record) => record,
            None => {
                log::debug!("organisation {} not found", uuid);
                return Ok(None);
            }
        };

        let memberships = self.queries.fetch_memberships(uuid).await?;

        Ok(Some(mapper::map_organisation(record, memberships)))
    }
}
