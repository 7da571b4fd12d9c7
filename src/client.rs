//! Enhancement client - one POST to the rephrase endpoint per request

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::EnhanceError;
use crate::http_logger::{self, ExchangeLog, ExchangeOutcome};

/// Rephrase request body
#[derive(Debug, Serialize)]
struct RephraseRequest<'a> {
    text: &'a str,
}

/// HTTP client for the rephrase endpoint
#[derive(Debug, Clone)]
pub struct EnhancementClient {
    config: Arc<Config>,
    client: Client,
}

impl EnhancementClient {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send `text` to the rephrase endpoint.
    ///
    /// Returns `Ok(None)` when the response parses but carries neither
    /// `text` nor `rephrased.text`. A `null` body is an error.
    pub async fn rephrase(&self, text: &str) -> Result<Option<String>, EnhanceError> {
        let url = self.config.rephrase_url();
        let payload = RephraseRequest { text };
        let exchange_log = ExchangeLog::start(&url, &payload);

        info!("Calling rephrase API: {}", url);
        let start_time = Instant::now();

        // .json() sets Content-Type: application/json
        let response = self.client.post(&url).json(&payload).send().await;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Rephrase API call completed in {}ms", duration_ms);

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                if let Some(log) = exchange_log {
                    log.finish(&self.config.store_dir, ExchangeOutcome::Error(&e.to_string()));
                }
                return Err(EnhanceError::Network(e));
            }
        };

        let status = response.status();
        let headers = if exchange_log.is_some() {
            http_logger::response_headers(&response)
        } else {
            Vec::new()
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                if let Some(log) = exchange_log {
                    log.finish(&self.config.store_dir, ExchangeOutcome::Error(&e.to_string()));
                }
                return Err(EnhanceError::Network(e));
            }
            Err(_) => String::new(),
        };

        if let Some(log) = exchange_log {
            log.finish(
                &self.config.store_dir,
                ExchangeOutcome::Response {
                    status: status.as_u16(),
                    headers,
                    body: &body,
                },
            );
        }

        if !status.is_success() {
            return Err(EnhanceError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        if value.is_null() {
            return Err(EnhanceError::NullBody);
        }

        let result = extract_result(&value);
        debug!("Rephrase result present: {}", result.is_some());

        Ok(result)
    }
}

/// Pick the enhanced text out of a response body.
///
/// Prefers a non-empty top-level `text`, then a non-empty `rephrased.text`.
/// Non-string values count as absent. A `null` body is rejected before
/// this point, so here it also reads as absent.
pub fn extract_result(body: &Value) -> Option<String> {
    let non_empty_str = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_empty_str(body.get("text"))
        .or_else(|| non_empty_str(body.get("rephrased").and_then(|r| r.get("text"))))
}
