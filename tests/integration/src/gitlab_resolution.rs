//! Resolution driven by the real GitLab fetcher against a mock GitLab API.

use extends_core::{Document, Error, FetchError, resolve_config_str};
use extends_gitlab::{GitLabConfig, GitLabFetcher};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve `body` as the renovate.json of `project` at `branch`.
async fn serve(server: &MockServer, branch: &str, project: &str, body: Value) {
    let encoded = project.replace('/', "%2F");
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v4/projects/{encoded}/repository/files/.gitlab%2Frenovate.json/raw"
        )))
        .and(query_param("ref", branch))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn resolve_against(server: &MockServer, text: &str) -> Result<Document, Error> {
    let config = GitLabConfig::new(format!("{}/api/v4", server.uri()))
        .with_max_retry_elapsed(Duration::ZERO);
    let text = text.to_string();
    tokio::task::spawn_blocking(move || {
        let fetcher = GitLabFetcher::new(config)?;
        resolve_config_str(&text, &fetcher)
    })
    .await
    .expect("resolution task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn resolves_parents_from_two_branches() {
    let server = MockServer::start().await;
    serve(&server, "main", "ns/renovate-config", json!({"rules": {"indent": 2}})).await;
    serve(&server, "dev", "ns/base", json!({"rules": {"quotes": "single"}})).await;

    let resolved = resolve_against(
        &server,
        r#"{"extends": ["gitlab>ns/renovate-config", "gitlab@dev>ns/base"], "rules": {"maxLen": 100}}"#,
    )
    .await
    .unwrap();

    assert_eq!(
        Value::Object(resolved),
        json!({"rules": {"indent": 2, "quotes": "single", "maxLen": 100}})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn resolves_a_chain_across_projects() {
    let server = MockServer::start().await;
    serve(
        &server,
        "main",
        "org/team",
        json!({"extends": "gitlab@v1>org/root", "schedule": ["weekly"], "labels": {"team": "a"}}),
    )
    .await;
    serve(
        &server,
        "v1",
        "org/root",
        json!({"schedule": ["daily"], "labels": {"org": "x"}, "automerge": false}),
    )
    .await;

    let resolved = resolve_against(&server, r#"{"extends": "gitlab>org/team", "automerge": true}"#)
        .await
        .unwrap();

    assert_eq!(
        Value::Object(resolved),
        json!({
            "schedule": ["weekly"],
            "labels": {"org": "x", "team": "a"},
            "automerge": true
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn circular_chain_stops_after_one_fetch() {
    let server = MockServer::start().await;
    serve(&server, "main", "foo/bar", json!({"extends": ["gitlab>foo/bar"]})).await;

    let err = resolve_against(&server, r#"{"extends": ["gitlab>foo/bar"]}"#)
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::CircularReference { ref reference } if reference == "gitlab>foo/bar")
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_project_surfaces_not_found() {
    let server = MockServer::start().await;

    let err = resolve_against(&server, r#"{"extends": "gitlab>not/exist"}"#)
        .await
        .unwrap_err();

    match err {
        Error::Fetch(fetch) => assert_eq!(fetch, FetchError::not_found("main", "not/exist")),
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_config_never_reaches_gitlab() {
    let server = MockServer::start().await;

    let err = resolve_against(&server, "{ invalid json").await.unwrap_err();

    assert!(matches!(err, Error::InvalidJson { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
