//! Static configuration descriptors and connection config validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::AdapterError;
use crate::types::{ConfigValues, PlanConfig};

// ============ Field Descriptors ============

/// The input type of a configuration field (affects form rendering).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Boolean checkbox.
    Checkbox,
}

/// Definition of a single configuration field.
///
/// Used by the host to render configuration forms and validate stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Machine-readable field key (e.g. `"api_url"`).
    pub name: String,
    /// Human-readable label (e.g. `"Url"`).
    pub label: String,
    /// Input type for form rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Value used when the field is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether the vendor supplies the selectable values at runtime.
    ///
    /// See [`EmailServer::available_server_values`](crate::EmailServer::available_server_values).
    #[serde(default)]
    pub dynamic_options: bool,
}

impl ConfigField {
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type: FieldType::Text,
            default: None,
            dynamic_options: false,
        }
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self {
            field_type: FieldType::Checkbox,
            ..Self::text(name, label)
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    #[must_use]
    pub fn with_dynamic_options(mut self) -> Self {
        self.dynamic_options = true;
        self
    }

    /// The default as a JSON value of this field's type.
    fn default_value(&self) -> Option<Value> {
        let default = self.default.as_deref()?;
        match self.field_type {
            FieldType::Text => Some(Value::from(default)),
            FieldType::Checkbox => parse_checkbox(&Value::from(default)).map(Value::from),
        }
    }
}

/// Static metadata describing an email server adapter.
///
/// Obtainable without an instance via
/// [`EmailServer::metadata()`](crate::EmailServer::metadata) or
/// [`get_all_adapter_metadata()`](crate::get_all_adapter_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterMetadata {
    /// Adapter type tag, matching [`ServerConfig::server_type`](crate::ServerConfig::server_type).
    pub id: String,
    /// Human-readable adapter name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Fields needed to connect to the vendor API.
    pub config_fields: Vec<ConfigField>,
    /// Optional fields applied when provisioning a domain.
    pub account_config_fields: Vec<ConfigField>,
}

impl AdapterMetadata {
    pub fn config_field(&self, name: &str) -> Option<&ConfigField> {
        self.config_fields.iter().find(|f| f.name == name)
    }

    pub fn account_config_field(&self, name: &str) -> Option<&ConfigField> {
        self.account_config_fields.iter().find(|f| f.name == name)
    }

    /// Account config fields whose options come from the vendor.
    pub fn dynamic_fields(&self) -> impl Iterator<Item = &ConfigField> {
        self.account_config_fields
            .iter()
            .filter(|f| f.dynamic_options)
    }

    /// Plan values restricted to known account fields, with absent fields filled from defaults.
    pub fn resolve_plan(&self, plan: &PlanConfig) -> serde_json::Map<String, Value> {
        self.account_config_fields
            .iter()
            .filter_map(|field| {
                plan.get(&field.name)
                    .filter(|v| !v.is_null())
                    .cloned()
                    .or_else(|| field.default_value())
                    .map(|value| (field.name.clone(), value))
            })
            .collect()
    }
}

// ============ Connection Config ============

/// Validation error for connection configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigValidationError {
    /// A required field is missing entirely.
    #[error("Missing required field: {label}")]
    MissingField { field: String, label: String },

    /// A field is present but empty or whitespace-only.
    #[error("Field must not be empty: {label}")]
    EmptyField { field: String, label: String },

    /// A field has an invalid format.
    #[error("{label}: {reason}")]
    InvalidFormat {
        field: String,
        label: String,
        reason: String,
    },
}

impl ConfigValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::EmptyField { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// Convert into the crate error, attributed to `adapter`.
    pub fn into_adapter_error(self, adapter: &str) -> AdapterError {
        AdapterError::InvalidConfig {
            adapter: adapter.to_string(),
            field: self.field().to_string(),
            detail: self.to_string(),
        }
    }
}

/// Validated connection settings for a REST email vendor.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL of the vendor API.
    pub api_url: reqwest::Url,
    /// Bearer API key.
    pub api_key: String,
    /// Whether TLS certificates are verified.
    pub ssl_verification: bool,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_key",
                &crate::utils::log_sanitizer::mask_secret(&self.api_key),
            )
            .field("ssl_verification", &self.ssl_verification)
            .finish()
    }
}

impl ConnectionConfig {
    pub const API_URL: &'static str = "api_url";
    pub const API_KEY: &'static str = "api_key";
    pub const SSL_VERIFICATION: &'static str = "ssl_verification";

    /// The connection fields this config is validated against.
    pub fn fields() -> Vec<ConfigField> {
        vec![
            ConfigField::text(Self::API_URL, "Url"),
            ConfigField::text(Self::API_KEY, "API Key"),
            ConfigField::checkbox(Self::SSL_VERIFICATION, "SSL Verification").with_default("1"),
        ]
    }

    /// Validate raw form values and build the typed config.
    pub fn from_values(values: &ConfigValues) -> Result<Self, ConfigValidationError> {
        let api_url = required_text(values, Self::API_URL, "Url")?;
        let api_url = reqwest::Url::parse(api_url.trim()).map_err(|e| {
            ConfigValidationError::InvalidFormat {
                field: Self::API_URL.to_string(),
                label: "Url".to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigValidationError::InvalidFormat {
                field: Self::API_URL.to_string(),
                label: "Url".to_string(),
                reason: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        let api_key = required_text(values, Self::API_KEY, "API Key")?;

        let ssl_verification = match values.get(Self::SSL_VERIFICATION) {
            None | Some(Value::Null) => true,
            Some(raw) => {
                parse_checkbox(raw).ok_or_else(|| ConfigValidationError::InvalidFormat {
                    field: Self::SSL_VERIFICATION.to_string(),
                    label: "SSL Verification".to_string(),
                    reason: format!("expected a checkbox value, got {raw}"),
                })?
            }
        };

        Ok(Self {
            api_url,
            api_key: api_key.trim().to_string(),
            ssl_verification,
        })
    }

    /// Convert back to flat form values for storage.
    pub fn to_values(&self) -> ConfigValues {
        [
            (Self::API_URL.to_string(), Value::from(self.api_url.as_str())),
            (Self::API_KEY.to_string(), Value::from(self.api_key.as_str())),
            (
                Self::SSL_VERIFICATION.to_string(),
                Value::from(self.ssl_verification),
            ),
        ]
        .into()
    }
}

/// Get a required text field and verify that it is not blank.
fn required_text<'a>(
    values: &'a ConfigValues,
    field: &str,
    label: &str,
) -> Result<&'a str, ConfigValidationError> {
    match values.get(field) {
        None | Some(Value::Null) => Err(ConfigValidationError::MissingField {
            field: field.to_string(),
            label: label.to_string(),
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ConfigValidationError::EmptyField {
            field: field.to_string(),
            label: label.to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ConfigValidationError::InvalidFormat {
            field: field.to_string(),
            label: label.to_string(),
            reason: format!("expected text, got {other}"),
        }),
    }
}

/// Interpret a checkbox value as stored by HTML forms or JSON clients.
fn parse_checkbox(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
