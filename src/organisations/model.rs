//! Public JSON representation of an organisation.
//!
//! Optional scalars and the industry classification are omitted when absent,
//! `subsidiaries` is omitted when empty, and `labels`, `types` and
//! `memberships` are always present.

use serde::{Deserialize, Serialize};

/// Canonical identity URIs are `{THING_URI_BASE}/{uuid}`
pub const THING_URI_BASE: &str = "http://api.ft.com/things";

/// Dereferenceable URLs are `{API_URL_BASE}/{collection}/{uuid}`
pub const API_URL_BASE: &str = "http://test.api.ft.com";

/// API collection an entity is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Organisations,
    People,
    Things,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Organisations => "organisations",
            Collection::People => "people",
            Collection::Things => "things",
        }
    }
}

/// `http://api.ft.com/things/{uuid}`
pub fn thing_uri(uuid: &str) -> String {
    format!("{}/{}", THING_URI_BASE, uuid)
}

/// `http://test.api.ft.com/{collection}/{uuid}`
pub fn api_url(collection: Collection, uuid: &str) -> String {
    format!("{}/{}/{}", API_URL_BASE, collection.as_str(), uuid)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub api_url: String,
    pub id: String,
    pub pref_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lei_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub labels: Vec<String>,
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_classification: Option<IndustryClassification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsidiaries: Vec<Subsidiary>,
    pub memberships: Vec<Membership>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryClassification {
    pub api_url: String,
    pub id: String,
    pub pref_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsidiary {
    pub api_url: String,
    pub id: String,
    pub pref_label: String,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub title: String,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub api_url: String,
    pub id: String,
    pub pref_label: String,
    pub types: Vec<String>,
}
