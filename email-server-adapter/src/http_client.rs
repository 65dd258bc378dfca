//! Generic HTTP client tools
//!
//! Shared request execution and response parsing for vendor clients.
//! Each vendor client still builds its own `RequestBuilder` (auth headers, paths);
//! these helpers only cover sending, logging and reading the body.
//!
//! Requests are sent exactly once. Retrying is the host's decision.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::AdapterError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with the default timeouts.
///
/// `ssl_verification = false` accepts invalid certificates (self-signed panels).
pub fn create_http_client(
    adapter_name: &str,
    ssl_verification: bool,
) -> Result<Client, AdapterError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .danger_accept_invalid_certs(!ssl_verification)
        .build()
        .map_err(|e| AdapterError::TransportError {
            adapter: adapter_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status and response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `adapter_name` - adapter name (for logs and errors)
    /// * `method_name` - HTTP method (for logs)
    /// * `url` - request URL (for logs)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for every status except 429 and 502-504
    /// * `Err(AdapterError::RateLimited)` - HTTP 429
    /// * `Err(AdapterError::TransportError)` - network failure or HTTP 502-504
    /// * `Err(AdapterError::Timeout)` - request timed out
    pub async fn execute_request(
        request_builder: RequestBuilder,
        adapter_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), AdapterError> {
        log::debug!("[{adapter_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AdapterError::Timeout {
                    adapter: adapter_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                AdapterError::TransportError {
                    adapter: adapter_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{adapter_name}] Response Status: {status_code}");

        // Read Retry-After before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{adapter_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(AdapterError::RateLimited {
                adapter: adapter_name.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        // Gateway errors mean the vendor API itself was not reached
        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{adapter_name}] Gateway error (HTTP {status_code})");
            return Err(AdapterError::TransportError {
                adapter: adapter_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AdapterError::TransportError {
                adapter: adapter_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{adapter_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(AdapterError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, adapter_name: &str) -> Result<T, AdapterError>
    where
        T: DeserializeOwned,
    {
        // Some vendors answer 200/204 with an empty body on writes
        let text = if response_text.trim().is_empty() {
            "null"
        } else {
            response_text
        };
        serde_json::from_str(text).map_err(|e| {
            log::error!("[{adapter_name}] JSON parse failed: {e}");
            log::error!(
                "[{adapter_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            AdapterError::ParseError {
                adapter: adapter_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
