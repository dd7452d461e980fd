use crate::domain::{Amenities, CafeForm, CafeView};
use crate::transport::http::handlers::{cafes, health, home};
use crate::transport::http::types::{ErrorBody, HealthBody, SuccessBody, SuccessMessage};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        cafes::random_cafe_handler,
        cafes::all_cafes_handler,
        cafes::search_handler,
        cafes::add_cafe_handler,
        cafes::update_price_handler,
        cafes::report_closed_handler
    ),
    components(schemas(
        CafeView,
        Amenities,
        CafeForm,
        SuccessBody,
        SuccessMessage,
        ErrorBody,
        HealthBody
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(home::home_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/random", get(cafes::random_cafe_handler))
        .route("/all", get(cafes::all_cafes_handler))
        .route("/search", get(cafes::search_handler))
        .route("/add", post(cafes::add_cafe_handler))
        .route("/update-price/:id", patch(cafes::update_price_handler))
        .route("/report-closed/:id", delete(cafes::report_closed_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
