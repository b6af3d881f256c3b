use axum::Json;
use axum::extract::State;

use crate::presentation::state::AppState;

/// Ordered list of financial-year labels offered at upload time.
pub async fn financial_years_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.settings.catalog.financial_years.clone())
}

/// Ledger names offered at upload time.
pub async fn ledgers_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.settings.catalog.ledgers.clone())
}
