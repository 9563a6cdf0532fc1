use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::LookupError;
use crate::models::AriesResponse;
use crate::AppState;

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(ping))
        .route("/:id", axum::routing::get(lookup))
}

/// GET /api/aries
async fn ping() -> &'static str {
    "Aries Virgo API"
}

/// GET /api/aries/:id
/// Resolve an identifier to its Virgo service, access, and metadata URLs
async fn lookup(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AriesResponse>, LookupError> {
    state.resolver.resolve(&id).await.map(Json)
}
