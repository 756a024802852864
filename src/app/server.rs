use crate::app::handler::{HandlerError, PriceHandler};
use crate::config::AppConfig;
use crate::core::country;
use crate::core::{ConfigProvider, CountryProfile, SearchResult};
use crate::domain::model::PriceRequest;
use crate::utils::error::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

async fn search_prices<C: ConfigProvider + 'static>(
    State(handler): State<Arc<PriceHandler<C>>>,
    payload: std::result::Result<Json<PriceRequest>, JsonRejection>,
) -> std::result::Result<Json<SearchResult>, HandlerError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("⚠️ Rejected request body: {}", rejection.body_text());
        HandlerError::Internal
    })?;

    handler.handle(request).await.map(Json)
}

async fn list_countries() -> Json<&'static [CountryProfile]> {
    Json(country::profiles())
}

pub fn router<C: ConfigProvider + 'static>(handler: Arc<PriceHandler<C>>) -> Router {
    Router::new()
        .route("/api/price", post(search_prices::<C>))
        .route("/api/countries", get(list_countries))
        .with_state(handler)
}

pub async fn serve(config: Arc<AppConfig>) -> Result<()> {
    let bind_address = config.server.bind_address.clone();
    if config.api_key().is_none() {
        tracing::warn!("⚠️ OPENAI_API_KEY is not set; /api/price will answer 500 until it is");
    }

    let handler = Arc::new(PriceHandler::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
