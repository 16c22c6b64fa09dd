//! End-to-end alert queries through the reqwest executor against a mock
//! portal.

mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use portalwatch_core::AlertService;
use portalwatch_domain::{
    AlertFilter, AlertQuery, AliasOutcome, ListAlertsParams, PortalwatchError, RequestError,
    Severity, SortDirection, SortField,
};
use portalwatch_infra::RateLimitPolicy;
use serde_json::json;
use support::{credential, executor_for, RecordingSleeper, ALERT_ID, TOKEN};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_alert_adds_identity_alias() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/alerts/{ALERT_ID}/")))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": ALERT_ID,
            "title": "Impossible travel activity",
            "severityValue": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (executor, _) = executor_for(&server);
    let service = AlertService::new(Arc::new(executor));

    let record = service.fetch_alert(&credential(), ALERT_ID).await.expect("alert");

    assert_eq!(record.identity(), Some(ALERT_ID));
    assert_eq!(record.alias_outcome(), AliasOutcome::Added);
    assert_eq!(record.get("title"), Some(&json!("Impossible travel activity")));
}

#[tokio::test]
async fn list_alerts_posts_filters_and_truncates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/alerts/"))
        .and(body_json(json!({
            "skip": 10,
            "limit": 2,
            "sortDirection": "desc",
            "sortField": "date",
            "filters": {"severity": {"eq": [2]}, "read": {"eq": false}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "000000000000000000000001"},
                {"_id": "000000000000000000000002"},
                {"_id": "000000000000000000000003"}
            ],
            "hasNext": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (executor, _) = executor_for(&server);
    let service = AlertService::new(Arc::new(executor));
    let params = ListAlertsParams::new()
        .with_size(2)
        .with_skip(10)
        .sorted_by(SortField::Date, SortDirection::Descending)
        .with_filter(AlertFilter::new().with_severity([Severity::High]).with_read(false));

    let records = service.list_alerts(&credential(), &params).await.expect("alerts");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].identity(), Some("000000000000000000000002"));
}

#[tokio::test]
async fn rate_limited_query_recovers_after_waiting() {
    let server = MockServer::start().await;
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    Mock::given(method("POST"))
        .and(path("/api/v1/alerts/"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                ResponseTemplate::new(429)
            } else {
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"_id": ALERT_ID}]}))
            }
        })
        .mount(&server)
        .await;

    let (executor, sleeper) = executor_for(&server);
    let service =
        AlertService::new(Arc::new(executor)).with_retry_interval(Duration::from_millis(250));

    let outcome = service
        .query(&credential(), AlertQuery::List(ListAlertsParams::new()))
        .await
        .expect("alerts");

    assert_eq!(outcome.len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(sleeper.calls(), vec![Duration::from_millis(250); 2]);
}

#[tokio::test]
async fn exhausted_rate_limit_is_wrapped_as_query_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let executor = portalwatch_infra::RequestExecutor::builder()
        .endpoint_override(server.uri())
        .sleeper(Arc::new(RecordingSleeper::default()))
        .rate_limit_policy(RateLimitPolicy { max_retries: 1, ..RateLimitPolicy::default() })
        .build()
        .expect("executor");
    let service = AlertService::new(Arc::new(executor));

    let err = service.fetch_alert(&credential(), ALERT_ID).await.unwrap_err();

    match err {
        PortalwatchError::Query { source } => {
            assert!(matches!(*source, PortalwatchError::RateLimitExceeded { attempts: 2, .. }));
        }
        other => panic!("expected query error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_wrapped_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let (executor, sleeper) = executor_for(&server);
    let service = AlertService::new(Arc::new(executor));

    let err = service.fetch_alert(&credential(), ALERT_ID).await.unwrap_err();

    assert!(err.to_string().starts_with("Error calling API. The exception was:"), "{err}");
    match err {
        PortalwatchError::Query { source } => {
            assert!(matches!(*source, PortalwatchError::Request(RequestError::Status { status: 404, .. })));
        }
        other => panic!("expected query error, got {other:?}"),
    }
    assert!(sleeper.calls().is_empty());
}

#[tokio::test]
async fn malformed_identity_never_reaches_the_network() {
    let server = MockServer::start().await;
    let (executor, _) = executor_for(&server);
    let service = AlertService::new(Arc::new(executor));

    let err = service.fetch_alert(&credential(), "not-an-id").await.unwrap_err();

    assert!(matches!(err, PortalwatchError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
