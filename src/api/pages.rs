//! Server-rendered planner page and PDF download

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{PlanOutcome, TripForm, TripRequest},
    presentation::{
        days::normalise_blocks,
        pdf::{attachment_filename, DEFAULT_DESTINATION},
        IndexView, ItineraryDocument,
    },
    AppState,
};

use super::today;

/// Fields posted by the download button under a rendered plan
#[derive(Debug, Default, Deserialize)]
pub struct DownloadForm {
    #[serde(rename = "itinerary[]", default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub weather_warning: Option<String>,
}

/// Empty planner form, or the configuration error when keys are missing
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let view = match state.config.credentials() {
        Ok(_) => IndexView::default(),
        Err(e) => IndexView::with_error(TripForm::default(), e.user_message()),
    };
    Ok(Html(state.renderer.render_index(&view)?))
}

/// Validate the form, run the planner and render the result
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> AppResult<Html<String>> {
    let view = plan_page(&state, form).await;
    Ok(Html(state.renderer.render_index(&view)?))
}

async fn plan_page(state: &AppState, form: TripForm) -> IndexView {
    if let Err(e) = state.config.credentials() {
        tracing::warn!("Rejecting plan request: {}", e);
        return IndexView::with_error(TripForm::default(), e.user_message());
    }

    let today = today();
    let request = match TripRequest::from_form(&form, today) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Invalid trip form: {}", e);
            return IndexView::with_error(form, e.user_message());
        }
    };

    match state.services.planner.plan(&request, today).await {
        PlanOutcome::Success(plan) => IndexView::with_plan(form, &plan),
        PlanOutcome::Failure { error, .. } => IndexView::with_error(form, error),
    }
}

/// Render previously shown day blocks as a PDF attachment
pub async fn download_pdf(Form(form): Form<DownloadForm>) -> Response {
    let destination = form
        .destination
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESTINATION)
        .to_string();

    let document = ItineraryDocument {
        weather_warning: form.weather_warning.filter(|w| !w.trim().is_empty()),
        days: normalise_blocks(&form.itinerary),
        generated_at: chrono::Local::now().naive_local(),
        destination,
    };

    match document.render() {
        Ok(bytes) => {
            tracing::info!(
                "Generated PDF for {} ({} days, {} bytes)",
                document.destination,
                document.days.len(),
                bytes.len()
            );
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={}", attachment_filename(&document.destination)),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Error generating PDF: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate PDF").into_response()
        }
    }
}
