use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::OrgReadError;
use crate::organisations::{Organisation, OrganisationService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: OrganisationService,
}

impl AppState {
    pub fn new(service: OrganisationService) -> Self {
        Self { service }
    }
}

/// GET /organisations/:uuid
pub async fn get_organisation(State(state): State<AppState>, Path(uuid): Path<String>) -> Response {
    match state.service.read(&uuid).await {
        Ok(Some(org)) => organisation_response(&org),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /organisations/ with no identifier
pub async fn missing_identifier() -> Response {
    error_response(&OrgReadError::InvalidIdentifier(
        "organisation identifier must not be empty".to_string(),
    ))
}

/// Health check; does not touch the graph
pub async fn handle_health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "org-read-public",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
        .into_response()
}

fn organisation_response(org: &Organisation) -> Response {
    match serde_json::to_vec(org) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => error_response(&OrgReadError::Serialization(e)),
    }
}

/// Error kind to HTTP status; the body is the error message.
fn error_response(err: &OrgReadError) -> Response {
    let status = match err {
        OrgReadError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
        OrgReadError::Integrity { .. } => {
            log::error!("Data integrity problem: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        OrgReadError::Executor(_)
        | OrgReadError::Timeout(_)
        | OrgReadError::Decode(_)
        | OrgReadError::Serialization(_)
        | OrgReadError::Config(_)
        | OrgReadError::Io(_) => {
            log::error!("Error reading organisation: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string()).into_response()
}
