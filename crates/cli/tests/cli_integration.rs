//! Commands run end to end through a session against a mock portal.

use clap::Parser;
use portalwatch_cli::{run, Cli, Session};
use portalwatch_domain::{Config, TenantConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TENANT: &str = "contoso.portal.cloudappsecurity.com";
const TOKEN: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const ALERT_ID: &str = "572caf4588011e452ec18ef0";

fn session_for(server: &MockServer) -> Session {
    let mut config = Config {
        tenant: Some(TenantConfig { hostname: TENANT.to_string(), token: TOKEN.to_string() }),
        ..Config::default()
    };
    config.http.endpoint_override = Some(server.uri());
    config.http.retry_interval_seconds = 0;
    Session::from_config(config, None).expect("session")
}

fn command(args: &[&str]) -> portalwatch_cli::Command {
    Cli::try_parse_from(std::iter::once("portalwatch").chain(args.iter().copied()))
        .expect("arguments")
        .command
}

#[tokio::test]
async fn get_prints_aliased_alert() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/alerts/{ALERT_ID}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": ALERT_ID})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let output = run(&session, &command(&["get", ALERT_ID])).await.expect("output");

    assert_eq!(output, json!({"_id": ALERT_ID, "Identity": ALERT_ID}));
}

#[tokio::test]
async fn list_prints_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/alerts/"))
        .and(body_json(json!({
            "skip": 0,
            "limit": 1,
            "filters": {"resolutionStatus": {"eq": [0]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": ALERT_ID}, {"_id": "572caf4588011e452ec18ef1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let output = run(&session, &command(&["list", "--size", "1", "--status", "open"]))
        .await
        .expect("output");

    assert_eq!(output, json!([{"_id": ALERT_ID, "Identity": ALERT_ID}]));
}

#[tokio::test]
async fn rate_limited_list_retries_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let output = run(&session, &command(&["list"])).await.expect("output");

    assert_eq!(output, json!([]));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert_eq!(session.config().http.max_rate_limit_retries, 10);
}

#[tokio::test]
async fn invalid_identity_fails_without_request() {
    let server = MockServer::start().await;
    let session = session_for(&server);

    let err = run(&session, &command(&["get", "xyz"])).await.unwrap_err();

    assert!(format!("{err:#}").contains("24 character hexadecimal"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
