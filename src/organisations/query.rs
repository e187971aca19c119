//! The two graph traversals behind an organisation read.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{OrgReadError, Result};
use crate::graph::{null_as_default, CypherExecutor, CypherQuery, CypherResult};

/// Organisation, optional parent, optional industry, and collected subsidiaries.
///
/// Subsidiaries are collected so they don't multiply the row; parent and industry
/// stay row-local, so a second parent or industry shows up as a second row.
pub const ORGANISATION_QUERY: &str = r#"
MATCH (org:Organisation {uuid: $uuid})
OPTIONAL MATCH (org)-[:SUB_ORG_OF]->(par:Organisation)
OPTIONAL MATCH (org)-[:IN_INDUSTRY]->(ind:Industry)
OPTIONAL MATCH (sub:Organisation)-[:SUB_ORG_OF]->(org)
RETURN
    {uuid: org.uuid, prefLabel: org.prefLabel, leiCode: org.leiIdentifier, labs: labels(org),
     hiddenLabel: org.hiddenLabel, legalName: org.legalName, shortName: org.shortName,
     profile: org.profile} AS organisation,
    {uuid: par.uuid, prefLabel: par.prefLabel, leiCode: par.leiIdentifier, labs: labels(par)} AS parent,
    {uuid: ind.uuid, prefLabel: ind.prefLabel, icbCode: ind.icbCode} AS industry,
    collect({uuid: sub.uuid, prefLabel: sub.prefLabel, leiCode: sub.leiIdentifier, labs: labels(sub)}) AS subs
"#;

/// People holding a membership in the organisation, ranked by how much content
/// mentions both of them.
pub const MEMBERSHIP_QUERY: &str = r#"
MATCH (o:Organisation {uuid: $uuid})<-[:HAS_ORGANISATION]-(m:Membership)-[:HAS_MEMBER]->(p:Person)
OPTIONAL MATCH (cont:Content)-[:MENTIONS]->(p), (cont)-[:MENTIONS]->(o)
RETURN p.prefLabel AS name, p.uuid AS uuid, labels(p) AS labs, m.prefLabel AS title, count(cont) AS count
ORDER BY count DESC, name
LIMIT 1000
"#;

/// Row cap applied by [`MEMBERSHIP_QUERY`]
pub const MEMBERSHIP_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pref_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legal_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lei_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labs: Vec<String>,
}

/// Parent or subsidiary organisation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedOrganisationNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pref_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lei_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pref_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icb_code: String,
}

/// One row of [`ORGANISATION_QUERY`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrganisationRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub organisation: OrganisationNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent: RelatedOrganisationNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: IndustryNode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subs: Vec<RelatedOrganisationNode>,
}

/// One row of [`MEMBERSHIP_QUERY`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MembershipRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub count: i64,
}

/// Organisation query component
///
/// Owns a shared handle to the graph executor and applies the per-query deadline.
#[derive(Clone)]
pub struct OrganisationQueries {
    executor: Arc<dyn CypherExecutor>,
    timeout: Duration,
}

impl OrganisationQueries {
    pub fn new(executor: Arc<dyn CypherExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// Fetch the organisation row for `uuid`.
    ///
    /// `Ok(None)` when nothing matches. More than one row is a data integrity
    /// problem and comes back as [`OrgReadError::Integrity`].
    pub async fn fetch_organisation(&self, uuid: &str) -> Result<Option<OrganisationRecord>> {
        validate_identifier(uuid)?;

        let query = CypherQuery::new(ORGANISATION_QUERY).param("uuid", uuid);
        let mut rows: Vec<OrganisationRecord> = self.run(&query).await?.rows()?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            count => Err(OrgReadError::Integrity {
                uuid: uuid.to_string(),
                count,
            }),
        }
    }

    /// Fetch memberships for `uuid`, most mentioned first.
    pub async fn fetch_memberships(&self, uuid: &str) -> Result<Vec<MembershipRecord>> {
        validate_identifier(uuid)?;

        let query = CypherQuery::new(MEMBERSHIP_QUERY).param("uuid", uuid);
        self.run(&query).await?.rows()
    }

    async fn run(&self, query: &CypherQuery) -> Result<CypherResult> {
        tokio::time::timeout(self.timeout, self.executor.execute(query))
            .await
            .map_err(|_| OrgReadError::Timeout(self.timeout))?
    }
}

/// Only emptiness is checked; identifiers are otherwise opaque.
pub fn validate_identifier(uuid: &str) -> Result<()> {
    if uuid.trim().is_empty() {
        return Err(OrgReadError::InvalidIdentifier(
            "organisation identifier must not be empty".to_string(),
        ));
    }
    Ok(())
}
