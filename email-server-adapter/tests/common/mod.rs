//! Shared test fixtures and helpers

#![allow(dead_code)]

use std::sync::Arc;

use email_server_adapter::{
    ConfigValues, CreateAccountParams, DomainRecord, EmailDomain, EmailServer,
    InMemoryDomainRecordStore, InMemoryVendor, SampleEmailServer, ServerConfig,
};

/// Assert that an `Option` is `Some` and unwrap it (the test fails otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (the test fails otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const SERVER_ID: &str = "srv-1";
pub const DOMAIN: &str = "example.com";

/// Connection values pointing at `api_url`.
pub fn connection_values(api_url: &str) -> ConfigValues {
    [
        ("api_url".to_string(), api_url.into()),
        ("api_key".to_string(), "test-key".into()),
        ("ssl_verification".to_string(), "1".into()),
    ]
    .into()
}

pub fn server_config(api_url: &str) -> ServerConfig {
    ServerConfig {
        id: SERVER_ID.to_string(),
        name: "Test mail server".to_string(),
        server_type: "sample-email-server".to_string(),
        connection_config: connection_values(api_url),
        details: serde_json::Map::new(),
    }
}

/// A sample adapter wired to an in-memory vendor and record store.
pub struct Harness {
    pub vendor: Arc<InMemoryVendor>,
    pub store: Arc<InMemoryDomainRecordStore>,
    pub server: SampleEmailServer,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_vendor(InMemoryVendor::new())
    }

    pub fn with_vendor(vendor: InMemoryVendor) -> Self {
        let vendor = Arc::new(vendor);
        let store = Arc::new(InMemoryDomainRecordStore::new());
        let server = SampleEmailServer::with_vendor(
            server_config("https://mail.example.net/api"),
            vendor.clone(),
            store.clone(),
        );
        Self {
            vendor,
            store,
            server,
        }
    }

    /// A domain adapter for a fresh record, registered with the store but not provisioned.
    pub async fn domain(&self, record_id: &str, domain: &str) -> Box<dyn EmailDomain> {
        let record = DomainRecord::new(record_id, domain);
        self.store.insert(SERVER_ID, record.clone()).await;
        self.server.domain(record)
    }
}

pub fn account_params(email: &str, quota: u64) -> CreateAccountParams {
    CreateAccountParams {
        email: email.to_string(),
        password: "p4ssw0rd".to_string(),
        quota,
        unlimited_quota: false,
    }
}
