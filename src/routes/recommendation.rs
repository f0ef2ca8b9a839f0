//! The recommendation endpoint.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::state::AppState;

/// Response body for `GET /recommendation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation: String,
}

/// Returns one entry of the Option List, drawn uniformly at random.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Recommendation> {
    let choice = state.options.pick();
    tracing::debug!(
        request_id = %request_id.0,
        recommendation = %choice,
        "Picked recommendation"
    );

    Json(Recommendation {
        recommendation: choice.to_string(),
    })
}
