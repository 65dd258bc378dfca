//! Sample API request execution

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::{AdapterError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, RawApiError, VendorErrorMapper};
use crate::utils::log_sanitizer::truncate_for_log;
use crate::vendor::{ApiRequest, ApiResponse};

use super::SampleApi;
use super::types::SampleErrorEnvelope;

impl SampleApi {
    /// Send a request and decode a successful body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        context: ErrorContext,
    ) -> Result<T> {
        let response = match self.vendor.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                log_failure(&request, &e);
                return Err(e);
            }
        };

        if !response.is_success() {
            let err = self.map_error(raw_error(&response), context);
            log_failure(&request, &err);
            return Err(err);
        }

        HttpUtils::parse_json(&response.body, self.adapter_name())
    }

    /// Send a request whose successful body carries nothing of interest.
    pub(crate) async fn execute(&self, request: ApiRequest, context: ErrorContext) -> Result<()> {
        self.call::<IgnoredAny>(request, context).await.map(|_| ())
    }
}

/// Extract code and message from the vendor's error envelope.
fn raw_error(response: &ApiResponse) -> RawApiError {
    let body = serde_json::from_str::<SampleErrorEnvelope>(&response.body)
        .ok()
        .and_then(|envelope| envelope.error);

    let Some(body) = body else {
        let message = if response.body.trim().is_empty() {
            format!("HTTP {}", response.status)
        } else {
            truncate_for_log(&response.body)
        };
        return RawApiError::new(response.status, message);
    };

    let message = body
        .message
        .clone()
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    match body.code_string() {
        Some(code) => RawApiError::with_code(response.status, code, message),
        None => RawApiError::new(response.status, message),
    }
}

fn log_failure(request: &ApiRequest, err: &AdapterError) {
    if err.is_expected() {
        log::warn!("{} {} failed: {err}", request.method, request.path);
    } else {
        log::error!("{} {} failed: {err}", request.method, request.path);
    }
}
