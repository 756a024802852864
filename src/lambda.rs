#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use price_finder::utils::logger;
#[cfg(feature = "lambda")]
use price_finder::{AppConfig, PriceHandler, PriceRequest};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: serde_json::Value,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &PriceHandler<AppConfig>,
    event: LambdaEvent<PriceRequest>,
) -> Result<Response, Error> {
    tracing::info!("Starting price search Lambda invocation");

    let response = match handler.handle(event.payload).await {
        Ok(result) => Response {
            status_code: 200,
            body: serde_json::to_value(result)?,
        },
        Err(e) => Response {
            status_code: e.status_code(),
            body: serde_json::to_value(e.body())?,
        },
    };

    tracing::info!("Price search Lambda completed with {}", response.status_code);
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_logger(logger::LogFormat::Json, false);

    // 冷啟動時讀一次環境變數
    let config = AppConfig::load(None)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let handler = Arc::new(PriceHandler::new(Arc::new(config)));

    run(service_fn(move |event: LambdaEvent<PriceRequest>| {
        let handler = handler.clone();
        async move { function_handler(&handler, event).await }
    }))
    .await
}
