#![allow(clippy::unwrap_used)]
// Integration tests for `HitCount` and `FmcClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fmc_api::{
    ClientConfig, Diagnostic, Error, FmcClient, HitCount, HitCountQuery, Identifier, Outcome,
    PrefilterAction, ResourceKind, ServerVersion, TlsMode, TransportConfig,
};

const DOMAIN: &str = "e276abec-e0f2-11e3-8169-6d9ed49b625f";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with_version(version: &str) -> (MockServer, FmcClient) {
    let server = MockServer::start().await;
    let client = FmcClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        DOMAIN.into(),
        ServerVersion::parse(version),
    );
    (server, client)
}

async fn setup() -> (MockServer, FmcClient) {
    setup_with_version("7.2.5 (build 208)").await
}

fn config_path(suffix: &str) -> String {
    format!("/api/fmc_config/v1/domain/{DOMAIN}/{suffix}")
}

fn hitcount_path(policy: &str) -> String {
    config_path(&format!(
        "policy/accesspolicies/{policy}/operational/hitcounts"
    ))
}

fn hitcount_items() -> serde_json::Value {
    json!({
        "items": [
            {
                "rule": { "id": "r-1", "name": "Allow DNS", "type": "AccessRule" },
                "hitCount": 1523,
                "firstHitTimeStamp": "2024-06-01T10:00:00Z",
                "lastHitTimeStamp": "2024-06-15T10:30:00Z",
                "metadata": {
                    "policy": { "id": "100", "type": "AccessPolicy" },
                    "device": { "id": "200", "type": "Device" }
                }
            },
            {
                "rule": { "id": "r-2", "name": "Block Telnet", "type": "AccessRule" },
                "hitCount": 0
            }
        ],
        "paging": { "offset": 0, "limit": 1000, "count": 2, "pages": 1 }
    })
}

/// Mount a catch-all that fails the test if anything reaches the server.
async fn expect_no_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

// ── GET ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_by_device() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(query_param("filter", "\"deviceId:200\""))
        .and(query_param("expanded", "true"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hitcount_items()))
        .expect(1)
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    let page = hc.get(None).await.unwrap().0.into_sent().unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].hit_count, 1523);
    assert_eq!(page.items[0].rule_label(), "Allow DNS");
    assert_eq!(page.items[1].hit_count, 0);
    assert_eq!(hc.paging().map(|p| p.count), Some(2));
}

#[tokio::test]
async fn test_get_missing_items_defaults_to_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": { "self": "https://fmc/api/..." }
        })))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let query = HitCountQuery {
        policy: Some(Identifier::ById("100".into())),
        device: Some(Identifier::ById("200".into())),
        ..HitCountQuery::default()
    };

    let page = hc.get(Some(query)).await.unwrap().0.into_sent().unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_get_with_overrides_builds_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies/10")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "10", "name": "pf-a" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies/20")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "20", "name": "pf-b" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(query_param("filter", "\"ids:10,20;fetchZeroHitCount:true\""))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hitcount_items()))
        .expect(1)
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let query = HitCountQuery {
        policy: Some(Identifier::ById("100".into())),
        prefilters: vec![Identifier::ById("10".into()), Identifier::ById("20".into())],
        fetch_zero_hit_count: Some(true),
        limit: Some(50),
        ..HitCountQuery::default()
    };

    let (outcome, diags) = hc.get(Some(query)).await.unwrap();
    assert!(matches!(outcome, Outcome::Sent(_)));
    assert!(diags.is_empty());
    assert_eq!(hc.criteria().prefilter_ids(), ["10", "20"]);
}

#[tokio::test]
async fn test_get_without_policy_is_refused() {
    let (server, client) = setup().await;
    expect_no_requests(&server).await;

    let mut hc = HitCount::new(&client);
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    let result = hc.get(None).await;
    assert!(
        matches!(result, Err(Error::Validation { .. })),
        "expected Validation error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_get_without_scope_is_refused() {
    let (server, client) = setup().await;
    expect_no_requests(&server).await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();

    match hc.get(None).await {
        Err(Error::Validation { ref message, .. }) => {
            assert!(message.contains("device"), "unexpected message: {message}");
        }
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_on_old_server_is_refused() {
    let (server, client) = setup_with_version("6.3.0 (build 83)").await;
    expect_no_requests(&server).await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    let result = hc.get(None).await;
    assert!(
        matches!(result, Err(Error::UnsupportedVersion { .. })),
        "expected UnsupportedVersion, got: {result:?}"
    );
}

#[tokio::test]
async fn test_dry_run_sends_nothing() {
    let (server, client) = setup().await;
    expect_no_requests(&server).await;
    let client = client.with_dry_run(true);

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();
    hc.set_page_limit(None);

    match hc.get(None).await.unwrap().0 {
        Outcome::DryRun(planned) => {
            assert_eq!(planned.method, reqwest::Method::GET);
            assert_eq!(
                planned.url,
                format!(
                    "{}{}?filter=\"deviceId:200\"&expanded=true",
                    server.uri(),
                    hitcount_path("100")
                )
            );
        }
        Outcome::Sent(_) => panic!("dry run must not send"),
    }
}

#[tokio::test]
async fn test_api_error_is_passed_through() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "category": "FRAMEWORK",
                "messages": [{ "description": "Invalid device id" }],
                "severity": "ERROR"
            }
        })))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("nope".into())).await.unwrap();

    match hc.get(None).await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid device id");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_ascii_body_is_not_split_mid_char() {
    let (server, client) = setup().await;

    let body = format!("{}é… internal error", "a".repeat(199));
    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(hitcount_path("100")))
        .respond_with(ResponseTemplate::new(500).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    match hc.get(None).await {
        Err(Error::Deserialization { message, body: raw }) => {
            assert!(message.contains('é'), "unexpected message: {message}");
            assert_eq!(raw, body);
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
    match hc.refresh().await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message.chars().count(), 200);
            assert!(message.ends_with('é'));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Overrides ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_override_leaves_criteria_unchanged() {
    let (server, client) = setup().await;
    expect_no_requests(&server).await;

    let mut hc = HitCount::new(&client);
    hc.set_device(Identifier::ById("300".into())).await.unwrap();
    let before = hc.criteria().clone();

    let query = HitCountQuery {
        policy: Some(Identifier::ById("100".into())),
        device: Some(Identifier::ById(String::new())),
        fetch_zero_hit_count: Some(true),
        limit: Some(10),
        ..HitCountQuery::default()
    };
    let result = hc.get(Some(query)).await;

    assert!(
        matches!(result, Err(Error::MissingIdentifier { target: "device" })),
        "expected MissingIdentifier, got: {result:?}"
    );
    assert_eq!(hc.criteria(), &before);
    assert_eq!(hc.criteria().policy_id(), None);
    assert_eq!(hc.criteria().device_id(), Some("300"));
}

#[tokio::test]
async fn test_failed_lookup_during_override_rolls_back() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies/pf-1")))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let query = HitCountQuery {
        policy: Some(Identifier::ById("100".into())),
        device: Some(Identifier::ById("200".into())),
        prefilters: vec![Identifier::ById("pf-1".into())],
        ..HitCountQuery::default()
    };

    let result = hc.get(Some(query)).await;
    assert!(
        matches!(result, Err(Error::Api { status: 503, .. })),
        "expected Api error, got: {result:?}"
    );
    assert_eq!(hc.criteria().policy_id(), None);
    assert_eq!(hc.criteria().device_id(), None);
}

#[tokio::test]
async fn test_unresolved_override_name_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("policy/accesspolicies")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "acp-1", "name": "Corporate", "type": "AccessPolicy" }],
            "paging": { "offset": 0, "limit": 1000, "count": 1, "pages": 1 }
        })))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let query = HitCountQuery {
        policy: Some(Identifier::ByName("Corprate".into())),
        device: Some(Identifier::ById("200".into())),
        ..HitCountQuery::default()
    };

    match hc.get(Some(query)).await {
        Err(Error::Validation { diagnostics, .. }) => assert_eq!(
            diagnostics,
            vec![Diagnostic::NotFound {
                kind: ResourceKind::AccessPolicy,
                identifier: Identifier::ByName("Corprate".into()),
            }]
        ),
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_override_diagnostics_come_back_with_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("devices/devicerecords")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "paging": { "offset": 0, "limit": 1000, "count": 0, "pages": 0 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(query_param("filter", "\"deviceId:200\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(hitcount_items()))
        .expect(1)
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    let query = HitCountQuery {
        device: Some(Identifier::ByName("ftd-ghost".into())),
        ..HitCountQuery::default()
    };
    let (outcome, diags) = hc.get(Some(query)).await.unwrap();

    assert_eq!(outcome.into_sent().unwrap().items.len(), 2);
    assert_eq!(diags.len(), 1);
    assert!(diags[0].is_warning());
    assert_eq!(hc.criteria().device_id(), Some("200"));
}

// ── Name resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn test_set_policy_by_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("policy/accesspolicies")))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "acp-1", "name": "Corporate", "type": "AccessPolicy" },
                { "id": "acp-2", "name": "Lab", "type": "AccessPolicy" }
            ],
            "paging": { "offset": 0, "limit": 1000, "count": 2, "pages": 1 }
        })))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let diags = hc
        .set_policy(Identifier::ByName("Lab".into()))
        .await
        .unwrap();

    assert!(diags.is_empty());
    assert_eq!(hc.criteria().policy_id(), Some("acp-2"));
}

#[tokio::test]
async fn test_name_lookup_follows_server_page_size() {
    let (server, client) = setup().await;
    let client = client.with_limit(5000);

    // The server caps pages at 1000 and here returns one item per page.
    Mock::given(method("GET"))
        .and(path(config_path("policy/accesspolicies")))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "acp-1", "name": "Corporate", "type": "AccessPolicy" }],
            "paging": { "offset": 0, "limit": 1, "count": 2, "pages": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(config_path("policy/accesspolicies")))
        .and(query_param("offset", "1"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "acp-2", "name": "Lab", "type": "AccessPolicy" }],
            "paging": { "offset": 1, "limit": 1, "count": 2, "pages": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = client
        .find_by_name(ResourceKind::AccessPolicy, "Lab")
        .await
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some("acp-2".to_owned()));
}

#[tokio::test]
async fn test_set_device_unknown_name_warns() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("devices/devicerecords")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "dev-1", "name": "ftd-edge", "type": "Device" }],
            "paging": { "offset": 0, "limit": 1000, "count": 1, "pages": 1 }
        })))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_device(Identifier::ById("200".into())).await.unwrap();
    let diags = hc
        .set_device(Identifier::ByName("ftd-core".into()))
        .await
        .unwrap();

    assert_eq!(
        diags,
        vec![Diagnostic::NotFound {
            kind: ResourceKind::Device,
            identifier: Identifier::ByName("ftd-core".into()),
        }]
    );
    assert_eq!(hc.criteria().device_id(), Some("200"));
}

#[tokio::test]
async fn test_blank_identifier_is_input_error() {
    let (server, client) = setup().await;
    expect_no_requests(&server).await;

    let mut hc = HitCount::new(&client);
    let result = hc.set_policy(Identifier::ByName("  ".into())).await;
    assert!(matches!(
        result,
        Err(Error::MissingIdentifier {
            target: "access control policy"
        })
    ));
    assert_eq!(hc.criteria().policy_id(), None);
}

// ── Prefilters ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_prefilter_add_remove_clear() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "pf-1", "name": "Default Prefilter", "type": "PrefilterPolicy" }],
            "paging": { "offset": 0, "limit": 1000, "count": 1, "pages": 1 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies/pf-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pf-1", "name": "Default Prefilter", "type": "PrefilterPolicy"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(config_path("policy/prefilterpolicies/missing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    let by_name = Identifier::ByName("Default Prefilter".into());

    // Remove from an empty list.
    let diags = hc
        .manage_prefilters(PrefilterAction::Remove(by_name.clone()))
        .await
        .unwrap();
    assert_eq!(diags, vec![Diagnostic::PrefiltersEmpty]);

    // Add, then add again.
    let diags = hc
        .manage_prefilters(PrefilterAction::Add(by_name.clone()))
        .await
        .unwrap();
    assert_eq!(diags, vec![Diagnostic::PrefilterAdded { id: "pf-1".into() }]);
    let diags = hc
        .manage_prefilters(PrefilterAction::Add(Identifier::ById("pf-1".into())))
        .await
        .unwrap();
    assert_eq!(
        diags,
        vec![Diagnostic::DuplicatePrefilter { id: "pf-1".into() }]
    );
    assert_eq!(hc.criteria().prefilter_ids(), ["pf-1"]);

    // Unknown id leaves the list alone.
    let diags = hc
        .manage_prefilters(PrefilterAction::Add(Identifier::ById("missing".into())))
        .await
        .unwrap();
    assert!(diags[0].is_warning());
    assert_eq!(hc.criteria().prefilter_ids().len(), 1);

    // Remove by id.
    let diags = hc
        .manage_prefilters(PrefilterAction::Remove(Identifier::ById("pf-1".into())))
        .await
        .unwrap();
    assert_eq!(diags, vec![Diagnostic::PrefilterRemoved { id: "pf-1".into() }]);
    assert!(hc.criteria().prefilter_ids().is_empty());

    // Clear is unconditional.
    hc.manage_prefilters(PrefilterAction::Add(by_name))
        .await
        .unwrap();
    let diags = hc.manage_prefilters(PrefilterAction::Clear).await.unwrap();
    assert_eq!(diags, vec![Diagnostic::PrefiltersCleared { count: 1 }]);
    assert!(hc.criteria().prefilter_ids().is_empty());
}

// ── Refresh / clear / post ──────────────────────────────────────────

#[tokio::test]
async fn test_refresh_and_clear_use_put_and_delete() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(hitcount_path("100")))
        .and(query_param("filter", "\"deviceId:200\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(hitcount_path("100")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    assert!(matches!(hc.refresh().await.unwrap(), Outcome::Sent(_)));
    assert!(matches!(hc.clear_counts().await.unwrap(), Outcome::Sent(_)));
}

#[tokio::test]
async fn test_post_is_unsupported() {
    let (_server, client) = setup().await;
    let hc = HitCount::new(&client);
    assert!(matches!(hc.post(), Err(Error::UnsupportedOperation(_))));
}

// ── Authentication ──────────────────────────────────────────────────

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/fmc_platform/v1/auth/generatetoken"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-auth-access-token", "tok-1")
                .insert_header("X-auth-refresh-token", "ref-1")
                .insert_header("DOMAIN_UUID", DOMAIN),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/fmc_platform/v1/info/serverversion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "serverVersion": "7.2.5 (build 208)", "type": "ServerVersion" }]
        })))
        .mount(server)
        .await;
}

fn client_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        host: Url::parse(&server.uri()).unwrap(),
        username: "api".into(),
        password: "secret".to_string().into(),
        domain: None,
        transport: TransportConfig {
            tls: TlsMode::System,
            timeout: Duration::from_secs(5),
        },
        limit: 500,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_connect_and_query_with_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(header("X-auth-access-token", "tok-1"))
        .and(query_param("limit", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hitcount_items()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FmcClient::connect(&client_config(&server)).await.unwrap();
    assert_eq!(client.domain_uuid(), DOMAIN);
    assert_eq!(client.server_version().as_str(), "7.2.5 (build 208)");

    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();
    let page = hc.get(None).await.unwrap().0.into_sent().unwrap();
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(header("X-auth-access-token", "tok-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/fmc_platform/v1/auth/refreshtoken"))
        .and(header("X-auth-refresh-token", "ref-1"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-auth-access-token", "tok-2")
                .insert_header("X-auth-refresh-token", "ref-2"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(hitcount_path("100")))
        .and(header("X-auth-access-token", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hitcount_items()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FmcClient::connect(&client_config(&server)).await.unwrap();
    let mut hc = HitCount::new(&client);
    hc.set_policy(Identifier::ById("100".into())).await.unwrap();
    hc.set_device(Identifier::ById("200".into())).await.unwrap();

    let page = hc.get(None).await.unwrap().0.into_sent().unwrap();
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_connect_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/fmc_platform/v1/auth/generatetoken"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = FmcClient::connect(&client_config(&server)).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {:?}",
        result.err()
    );
}
