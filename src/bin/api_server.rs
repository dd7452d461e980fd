// src/bin/api_server.rs

use cafe_api::infra::{telemetry, Config};
use cafe_api::transport;
use cafe_api::{storage, CafeService};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let config = Config::from_env()?;

    // --- Store Initialization ---
    let store = storage::open(&config).await?;
    match store.count().await {
        Ok(cafes) => tracing::info!(cafes, "cafe store ready"),
        Err(e) => tracing::warn!(error = %e, "could not count cafes at startup"),
    }

    let app_state = transport::http::AppState {
        service: CafeService::new(store, config.api_key.as_str()),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("API server listening on http://{}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, stopping");
        }
    }

    Ok(())
}
