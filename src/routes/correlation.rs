use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::corr;
use crate::error::CorrError;
use crate::state::AppState;
use crate::upstream::ScopeKind;

/// Wire value meaning "the datasets had no countries in common".
pub const NO_OVERLAP_SENTINEL: f64 = 99.0;
/// Wire value meaning "the correlation could not be computed".
pub const FAILURE_SENTINEL: f64 = 500.0;

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    country: String,
}

#[derive(Debug, Deserialize)]
pub struct ContinentQuery {
    continent: String,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/correlation/country", get(by_country))
        .route("/api/correlation/continent", get(by_continent))
}

/// GET /api/correlation/country?country=France
async fn by_country(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CountryQuery>,
) -> Json<f64> {
    let result = corr::correlation_for_scope(&state.stats, ScopeKind::Country, &q.country).await;
    Json(to_wire(result))
}

/// GET /api/correlation/continent?continent=Europe
async fn by_continent(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ContinentQuery>,
) -> Json<f64> {
    let result =
        corr::correlation_for_scope(&state.stats, ScopeKind::Continent, &q.continent).await;
    Json(to_wire(result))
}

/// Collapse the typed pipeline result onto the legacy bare-number contract.
///
/// The response is always HTTP 200 with a single JSON number; these sentinel
/// codes exist only here, at the outermost boundary. Everything beneath the
/// routes speaks `Result`.
fn to_wire(result: Result<f64, CorrError>) -> f64 {
    match result {
        Ok(r) => r,
        Err(CorrError::NoOverlap) => NO_OVERLAP_SENTINEL,
        Err(err) => {
            tracing::error!(%err, "correlation request failed");
            FAILURE_SENTINEL
        }
    }
}
