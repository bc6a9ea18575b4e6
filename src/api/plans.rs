//! JSON planning endpoint

use axum::{extract::State, Json};

use crate::{
    error::{AppError, AppResult},
    models::{PlanOutcome, PlanRequest, TripForm, TripPlan, TripRequest},
    AppState,
};

use super::today;

/// Generate a trip plan
#[utoipa::path(
    post,
    path = "/plans",
    tag = "plans",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Generated plan", body = TripPlan),
        (status = 400, description = "Invalid trip request", body = crate::error::ErrorResponse),
        (status = 502, description = "Itinerary could not be generated", body = crate::error::ErrorResponse),
        (status = 503, description = "Provider credentials are missing", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> AppResult<Json<TripPlan>> {
    state.config.credentials()?;

    let today = today();
    let request = TripRequest::from_form(&TripForm::from(request), today)?;

    match state.services.planner.plan(&request, today).await {
        PlanOutcome::Success(plan) => Ok(Json(plan)),
        PlanOutcome::Failure { error, .. } => Err(AppError::PlanFailure(error)),
    }
}
