//! Graph query executor seam.
//!
//! The service never talks to a graph engine directly: it hands a parameterised
//! Cypher statement to a [`CypherExecutor`] and gets tabular rows back. Rows are
//! decoded into typed structs with [`CypherResult::rows`].

mod neo4j;
#[cfg(test)]
pub mod testing;

pub use neo4j::Neo4jClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{OrgReadError, Result};

/// A parameterised Cypher statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherQuery {
    pub query: String,
    pub params: Map<String, Value>,
}

impl CypherQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Map::new(),
        }
    }

    /// Bind a named parameter.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }
}

/// Tabular result: one column name per entry of every row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CypherResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl CypherResult {
    /// Decode every row into `T` by pairing values with their column names.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.columns.len() {
                    return Err(OrgReadError::Decode(format!(
                        "row {} has {} values for {} columns",
                        i,
                        row.len(),
                        self.columns.len()
                    )));
                }
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                serde_json::from_value(Value::Object(object))
                    .map_err(|e| OrgReadError::Decode(format!("row {}: {}", i, e)))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Something that can run Cypher and return rows.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    async fn execute(&self, query: &CypherQuery) -> Result<CypherResult>;
}

/// Deserialize `null` as the type's zero value.
///
/// A failed `OPTIONAL MATCH` still produces the projected map, with every
/// property set to `null`. Decoding those as empty strings and lists keeps the
/// row shape fixed; presence is then decided by the mapper from the identity field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
