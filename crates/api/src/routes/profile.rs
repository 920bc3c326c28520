//! Business profile routes.

use axum::{Json, Router, extract::State, routing::get};
use bahi_core::engine::BusinessProfile;
use bahi_store::DocumentStore;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Creates the profile routes.
pub fn routes<S: DocumentStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/profile", get(get_profile::<S>).put(save_profile::<S>))
}

/// GET /profile
async fn get_profile<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<BusinessProfile>> {
    Ok(Json(state.store.get_business_profile().await?))
}

/// PUT /profile
async fn save_profile<S: DocumentStore + 'static>(
    State(state): State<AppState<S>>,
    Json(profile): Json<BusinessProfile>,
) -> ApiResult<Json<BusinessProfile>> {
    if profile.company_name.trim().is_empty() {
        return Err(ApiError::validation("Company name is required"));
    }
    let saved = state.store.save_business_profile(profile).await?;
    tracing::info!(company = %saved.company_name, "business profile saved");
    Ok(Json(saved))
}
