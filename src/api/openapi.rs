//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, plans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WanderWise API",
        version = "1.0.0",
        description = "Weather-aware, budget-aware trip itinerary generator",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        plans::create_plan,
    ),
    components(
        schemas(
            crate::models::PlanRequest,
            crate::models::TripPlan,
            crate::models::TripStyle,
            crate::models::DayItinerary,
            crate::models::DaySource,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "plans", description = "Itinerary generation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
