//! Neo4j REST client (legacy `/db/data` Cypher endpoint).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{CypherExecutor, CypherQuery, CypherResult};
use crate::error::{OrgReadError, Result};

/// Service root document returned by `GET /db/data`
#[derive(Deserialize)]
struct ServiceRoot {
    cypher: Option<String>,
}

/// Error body returned by the Cypher endpoint on failure
#[derive(Deserialize)]
struct Neo4jErrorBody {
    message: Option<String>,
    exception: Option<String>,
}

/// Neo4j graph client
///
/// Holds one pooled HTTP client for the lifetime of the process. Cloning is cheap
/// and clones share the connection pool.
#[derive(Clone)]
pub struct Neo4jClient {
    client: Client,
    cypher_url: Url,
}

impl Neo4jClient {
    /// Connect to the graph endpoint
    ///
    /// Fetches the service root to discover the Cypher endpoint, falling back to
    /// `{neo_url}/cypher` when the root does not advertise one.
    pub async fn connect(neo_url: &str, timeout: Duration) -> Result<Self> {
        let root = Url::parse(neo_url)
            .map_err(|e| OrgReadError::Config(format!("Invalid graph URL {}: {}", neo_url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        let response = client
            .get(root.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| OrgReadError::Executor(format!("Cannot reach {}: {}", root, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrgReadError::Executor(format!(
                "Graph service root {} returned {}",
                root, status
            )));
        }

        // Some deployments answer the root with an empty or non-JSON body.
        let discovered = response
            .json::<ServiceRoot>()
            .await
            .ok()
            .and_then(|r| r.cypher)
            .and_then(|href| Url::parse(&href).ok());

        let cypher_url = match discovered {
            Some(url) => url,
            None => default_cypher_url(&root)?,
        };

        log::debug!("Cypher endpoint: {}", cypher_url);

        Ok(Self { client, cypher_url })
    }

    /// Cypher endpoint queries are posted to
    pub fn cypher_url(&self) -> &Url {
        &self.cypher_url
    }
}

/// `{root}/cypher`, keeping any path prefix on the root
fn default_cypher_url(root: &Url) -> Result<Url> {
    let mut base = root.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("cypher")
        .map_err(|e| OrgReadError::Config(format!("Invalid graph URL {}: {}", root, e)))
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute(&self, query: &CypherQuery) -> Result<CypherResult> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.cypher_url.clone())
            .header("Accept", "application/json")
            .json(query)
            .send()
            .await
            .map_err(|e| OrgReadError::Executor(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            let detail = match serde_json::from_str::<Neo4jErrorBody>(&body) {
                Ok(Neo4jErrorBody {
                    message: Some(message),
                    exception,
                }) => match exception {
                    Some(exception) => format!("{}: {}", exception, message),
                    None => message,
                },
                _ => body,
            };

            return Err(OrgReadError::Executor(format!(
                "Neo4j error {}: {}",
                status, detail
            )));
        }

        let result: CypherResult = response
            .json()
            .await
            .map_err(|e| OrgReadError::Decode(format!("Failed to parse response: {}", e)))?;

        log::debug!(
            "Cypher query returned {} rows in {:?}",
            result.len(),
            start.elapsed()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::net::SocketAddr;

    /// Serve `app` on an ephemeral local port, returning its address
    async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// Echo the posted parameters back as a single row
    async fn echo_cypher(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "columns": ["query", "uuid"],
            "data": [[body["query"], body["params"]["uuid"]]]
        }))
    }

    #[test]
    fn test_default_cypher_url() {
        let root = Url::parse("http://localhost:7474/db/data").unwrap();
        assert_eq!(
            default_cypher_url(&root).unwrap().as_str(),
            "http://localhost:7474/db/data/cypher"
        );
        let root = Url::parse("http://localhost:7474/db/data/").unwrap();
        assert_eq!(
            default_cypher_url(&root).unwrap().as_str(),
            "http://localhost:7474/db/data/cypher"
        );
    }

    #[tokio::test]
    async fn test_connect_discovers_cypher_endpoint() {
        let app = Router::new()
            .route(
                "/db/data",
                get(|axum::extract::Host(host): axum::extract::Host| async move {
                    Json(json!({ "cypher": format!("http://{}/custom/cypher", host) }))
                }),
            )
            .route("/custom/cypher", post(echo_cypher));
        let addr = spawn(app).await;

        let client = Neo4jClient::connect(
            &format!("http://{}/db/data", addr),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(client.cypher_url().path(), "/custom/cypher");

        let query = CypherQuery::new("RETURN 1").param("uuid", "org-1");
        let result = client.execute(&query).await.unwrap();
        assert_eq!(result.columns, vec!["query", "uuid"]);
        assert_eq!(result.data, vec![vec![json!("RETURN 1"), json!("org-1")]]);
    }

    #[tokio::test]
    async fn test_connect_falls_back_without_discovery() {
        let app = Router::new()
            .route("/db/data", get(|| async { "ok" }))
            .route("/db/data/cypher", post(echo_cypher));
        let addr = spawn(app).await;

        let client = Neo4jClient::connect(
            &format!("http://{}/db/data", addr),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(client.cypher_url().path(), "/db/data/cypher");
    }

    #[tokio::test]
    async fn test_connect_fails_on_error_status() {
        let app = Router::new().route(
            "/db/data",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let addr = spawn(app).await;

        let result =
            Neo4jClient::connect(&format!("http://{}/db/data", addr), Duration::from_secs(5))
                .await;
        assert!(matches!(result, Err(OrgReadError::Executor(_))));
    }

    #[tokio::test]
    async fn test_execute_surfaces_neo4j_error_message() {
        let app = Router::new()
            .route("/db/data", get(|| async { "ok" }))
            .route(
                "/db/data/cypher",
                post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "message": "Invalid input 'X'",
                            "exception": "SyntaxException"
                        })),
                    )
                        .into_response()
                }),
            );
        let addr = spawn(app).await;

        let client =
            Neo4jClient::connect(&format!("http://{}/db/data", addr), Duration::from_secs(5))
                .await
                .unwrap();
        let err = client
            .execute(&CypherQuery::new("MATCH X"))
            .await
            .unwrap_err();
        match err {
            OrgReadError::Executor(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("SyntaxException: Invalid input 'X'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_malformed_body() {
        let app = Router::new()
            .route("/db/data", get(|| async { "ok" }))
            .route("/db/data/cypher", post(|| async { "not json" }));
        let addr = spawn(app).await;

        let client =
            Neo4jClient::connect(&format!("http://{}/db/data", addr), Duration::from_secs(5))
                .await
                .unwrap();
        let err = client.execute(&CypherQuery::new("RETURN 1")).await.unwrap_err();
        assert!(matches!(err, OrgReadError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connect_unreachable() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result =
            Neo4jClient::connect(&format!("http://{}/db/data", addr), Duration::from_secs(2))
                .await;
        assert!(result.is_err());
    }
}
