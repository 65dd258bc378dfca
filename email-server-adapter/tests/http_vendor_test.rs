//! Sample adapter over real HTTP, against a `wiremock` server
//!
//! Exercises the reqwest transport: auth header, query encoding, status mapping
//! and body parsing.

mod common;

use std::sync::Arc;

use common::{DOMAIN, SERVER_ID, connection_values, server_config};
use email_server_adapter::{
    AdapterError, DomainRecord, EmailServer, InMemoryDomainRecordStore, SampleEmailServer,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer, store: Arc<InMemoryDomainRecordStore>) -> Option<SampleEmailServer> {
    SampleEmailServer::new(server_config(&server.uri()), store).ok()
}

// ============ Connection ============

#[tokio::test]
async fn test_connection_sends_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "domains": [] })))
        .expect(1)
        .mount(&server)
        .await;

    require_ok!(SampleEmailServer::test_connection(&connection_values(&server.uri())).await);
}

#[tokio::test]
async fn test_connection_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "unauthorized", "message": "Invalid API key" }
        })))
        .mount(&server)
        .await;

    let res = SampleEmailServer::test_connection(&connection_values(&server.uri())).await;
    assert!(
        matches!(&res, Err(AdapterError::ConnectionError { raw_message: Some(m), .. }) if m == "Invalid API key"),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn test_connection_server_error_is_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let res = SampleEmailServer::test_connection(&connection_values(&server.uri())).await;
    assert!(matches!(res, Err(AdapterError::ConnectionError { .. })));
}

#[tokio::test]
async fn test_connection_unreachable_host() {
    // Port 1 on loopback refuses connections.
    let res = SampleEmailServer::test_connection(&connection_values("http://127.0.0.1:1")).await;
    assert!(
        matches!(&res, Err(AdapterError::ConnectionError { .. })),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn test_connection_invalid_url() {
    let res = SampleEmailServer::test_connection(&connection_values("ftp://mail.example.net")).await;
    assert!(matches!(res, Err(AdapterError::ConnectionError { .. })));
}

// ============ Queries ============

#[tokio::test]
async fn test_list_domains_accepts_numeric_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [
                { "id": 7, "name": "example.com" },
                { "id": "dom-8", "name": "example.org" }
            ]
        })))
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let domains = require_ok!(mail.list_domains().await);
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].details.remote_id, "7");
    assert_eq!(domains[1].domain, "example.org");
}

#[tokio::test]
async fn test_find_domain_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains/missing.example"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "domain_not_found", "message": "no such domain" }
        })))
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let found = require_ok!(mail.find_domain("missing.example").await);
    assert!(found.is_none());
}

#[tokio::test]
async fn test_usage_queries_store_domains() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/usage"))
        .and(query_param("domains[]", DOMAIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email_accounts": { "usage": 2, "maximum": 10 },
            "forwarders": { "usage": 0, "maximum": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryDomainRecordStore::new());
    store.insert(SERVER_ID, DomainRecord::new("d1", DOMAIN)).await;
    let mail = require_some!(adapter(&server, store));

    let usage = require_ok!(mail.usage().await);
    assert_eq!(usage.email_accounts.usage, 2);
    assert_eq!(usage.email_accounts.maximum, Some(10));
    assert!(usage.forwarders.is_unlimited());
}

#[tokio::test]
async fn test_negative_usage_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email_accounts": { "usage": -1, "maximum": null },
            "forwarders": { "usage": 0, "maximum": null }
        })))
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let res = mail.usage().await;
    assert!(matches!(res, Err(AdapterError::ParseError { .. })));
}

// ============ Status Handling ============

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let res = mail.list_domains().await;
    assert!(
        matches!(&res, Err(AdapterError::RateLimited { retry_after: Some(30), .. })),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn test_gateway_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let res = mail.list_domains().await;
    assert!(matches!(res, Err(e) if e.is_transport()));
}

#[tokio::test]
async fn test_server_error_keeps_vendor_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 9001, "message": "database unavailable" }
        })))
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let res = mail.list_domains().await;
    assert!(
        matches!(&res, Err(AdapterError::Unknown { raw_code, raw_message, .. })
            if raw_code.as_deref() == Some("9001") && raw_message == "database unavailable"),
        "unexpected result: {res:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/email/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let res = mail.list_domains().await;
    assert!(matches!(res, Err(AdapterError::ParseError { .. })));
}

// ============ Writes ============

#[tokio::test]
async fn test_create_domain_persists_remote_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/create-domain"))
        .and(body_partial_json(json!({
            "domain": DOMAIN,
            "config": { "email_plan": "Default", "spam_filter": true }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "domain": { "id": 99, "name": DOMAIN }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryDomainRecordStore::new());
    store.insert(SERVER_ID, DomainRecord::new("d1", DOMAIN)).await;
    let mail = require_some!(adapter(&server, store.clone()));

    let mut domain = mail.domain(DomainRecord::new("d1", DOMAIN));
    require_ok!(domain.create().await);
    assert_eq!(domain.record().remote_id().as_deref(), Some("99"));

    let stored = require_some!(store.get("d1").await);
    assert_eq!(stored.remote_id().as_deref(), Some("99"));
}

#[tokio::test]
async fn test_delete_forwarder_sends_rule_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/email/forwarders"))
        .and(query_param("domain", DOMAIN))
        .and(query_param("email", "sales@example.com"))
        .and(query_param("forward_to", "team@elsewhere.net"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mail = require_some!(adapter(&server, Arc::new(InMemoryDomainRecordStore::new())));
    let domain = mail.domain(DomainRecord::new("d1", DOMAIN));
    require_ok!(
        domain
            .forwarder()
            .delete("sales@example.com", "team@elsewhere.net")
            .await
    );
}
