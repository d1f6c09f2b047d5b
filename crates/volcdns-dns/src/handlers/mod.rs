//! HTTP handlers for the cert-manager webhook protocol
//!
//! cert-manager posts a `ChallengePayload` to
//! `/apis/{group}/v1alpha1/{solver}` and expects the same payload back with
//! a `response` describing the outcome. Solver failures are reported inside
//! the payload, not as HTTP errors. `GET /apis/{group}/v1alpha1` serves the
//! resource list the Kubernetes API aggregation layer checks before routing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::services::{ChallengeRequest, ChallengeSolver};

pub const CHALLENGE_API_VERSION: &str = "acme.cert-manager.io/v1alpha1";
pub const CHALLENGE_KIND: &str = "ChallengePayload";

/// Application state for webhook handlers
pub struct WebhookAppState {
    pub solver: Arc<ChallengeSolver>,
    /// API group the webhook is registered under
    pub group_name: String,
}

// ========================================
// Request/Response Types
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePayload {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub uid: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChallengeStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Discovery document the API aggregation layer fetches for the group version
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub group_version: String,
    pub resources: Vec<ApiResource>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub name: String,
    pub singular_name: String,
    pub namespaced: bool,
    pub kind: &'static str,
    pub verbs: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// ========================================
// Handlers
// ========================================

async fn healthz() -> &'static str {
    "ok"
}

async fn list_resources(
    State(state): State<Arc<WebhookAppState>>,
    Path(group): Path<String>,
) -> impl IntoResponse {
    if group != state.group_name {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("unknown group {}", group),
            }),
        )
            .into_response();
    }

    let solver = state.solver.name();
    Json(ApiResourceList {
        kind: "APIResourceList",
        api_version: "v1",
        group_version: format!("{}/v1alpha1", group),
        resources: vec![ApiResource {
            name: solver.to_string(),
            singular_name: solver.to_string(),
            namespaced: false,
            kind: CHALLENGE_KIND,
            verbs: vec!["create"],
        }],
    })
    .into_response()
}

async fn solve_challenge(
    State(state): State<Arc<WebhookAppState>>,
    Path((group, solver_name)): Path<(String, String)>,
    Json(payload): Json<ChallengePayload>,
) -> impl IntoResponse {
    if group != state.group_name || solver_name != state.solver.name() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("no solver {} in group {}", solver_name, group),
            }),
        )
            .into_response();
    }

    let Some(request) = payload.request else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "challenge payload has no request".to_string(),
            }),
        )
            .into_response();
    };

    info!(
        "{} challenge {} for {}",
        request.action, request.uid, request.resolved_fqdn
    );

    let response = match state.solver.solve(&request).await {
        Ok(()) => ChallengeResponse {
            uid: request.uid,
            success: true,
            status: None,
        },
        Err(e) => {
            error!(
                "{} failed for {}: {}",
                request.action, request.resolved_fqdn, e
            );
            ChallengeResponse {
                uid: request.uid,
                success: false,
                status: Some(ChallengeStatus {
                    message: e.to_string(),
                    reason: Some(e.reason().to_string()),
                }),
            }
        }
    };

    Json(ChallengePayload {
        api_version: if payload.api_version.is_empty() {
            CHALLENGE_API_VERSION.to_string()
        } else {
            payload.api_version
        },
        kind: CHALLENGE_KIND.to_string(),
        request: None,
        response: Some(response),
    })
    .into_response()
}

// ========================================
// Router Configuration
// ========================================

/// Configure webhook routes
pub fn configure_routes() -> Router<Arc<WebhookAppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/apis/{group}/v1alpha1", get(list_resources))
        .route("/apis/{group}/v1alpha1/{solver}", post(solve_challenge))
}
