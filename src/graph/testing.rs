//! In-memory executor and row fixtures for tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::{CypherExecutor, CypherQuery, CypherResult};
use crate::error::{OrgReadError, Result};

/// Replays queued responses in order and records every query it receives.
///
/// Once the queue is drained it answers with an empty result.
#[derive(Default)]
pub struct FakeExecutor {
    responses: Mutex<VecDeque<Result<CypherResult>>>,
    queries: Mutex<Vec<CypherQuery>>,
    delay: Option<Duration>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, result: CypherResult) -> Self {
        self.responses.lock().unwrap().push_back(Ok(result));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(OrgReadError::Executor(message.to_string())));
        self
    }

    /// Sleep this long before answering each query
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> Vec<CypherQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CypherExecutor for FakeExecutor {
    async fn execute(&self, query: &CypherQuery) -> Result<CypherResult> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CypherResult::default()))
    }
}

/// Organisation projection as the primary traversal returns it
pub fn org(uuid: &str, pref_label: &str, labs: &[&str]) -> Value {
    json!({
        "uuid": uuid,
        "prefLabel": pref_label,
        "hiddenLabel": null,
        "legalName": null,
        "shortName": null,
        "leiCode": null,
        "profile": null,
        "labs": labs,
    })
}

/// Related organisation (parent or subsidiary) projection
pub fn related(uuid: &str, pref_label: &str, labs: &[&str]) -> Value {
    json!({
        "uuid": uuid,
        "prefLabel": pref_label,
        "leiCode": null,
        "labs": labs,
    })
}

/// What an unmatched `OPTIONAL MATCH` projects for a related organisation
pub fn missing_related() -> Value {
    json!({ "uuid": null, "prefLabel": null, "leiCode": null, "labs": null })
}

pub fn industry(uuid: &str, pref_label: &str) -> Value {
    json!({ "uuid": uuid, "prefLabel": pref_label, "icbCode": "1234" })
}

/// What an unmatched `OPTIONAL MATCH` projects for an industry
pub fn missing_industry() -> Value {
    json!({ "uuid": null, "prefLabel": null, "icbCode": null })
}

/// One primary-traversal row per entry of `rows`
pub fn org_result(rows: Vec<(Value, Value, Value, Vec<Value>)>) -> CypherResult {
    CypherResult {
        columns: vec![
            "organisation".into(),
            "parent".into(),
            "industry".into(),
            "subs".into(),
        ],
        data: rows
            .into_iter()
            .map(|(o, p, i, s)| vec![o, p, i, Value::Array(s)])
            .collect(),
    }
}

/// Membership rows: (name, uuid, labels, title, count)
pub fn membership_result(rows: Vec<(&str, &str, Vec<&str>, &str, i64)>) -> CypherResult {
    CypherResult {
        columns: vec![
            "name".into(),
            "uuid".into(),
            "labs".into(),
            "title".into(),
            "count".into(),
        ],
        data: rows
            .into_iter()
            .map(|(name, uuid, labs, title, count)| {
                vec![json!(name), json!(uuid), json!(labs), json!(title), json!(count)]
            })
            .collect(),
    }
}
