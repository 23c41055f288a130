#![allow(clippy::unwrap_used)]
// Integration tests for `RepoClient` using wiremock.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ccsync_api::{Error, Lookup, RepoClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RepoClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "ghp_test".to_string().into();
    let client =
        RepoClient::from_token(&server.uri(), &token, "main", &TransportConfig::default()).unwrap();
    (server, client)
}

fn encoded(text: &str) -> String {
    STANDARD.encode(text)
}

// ── Repositories ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_repos_sends_token_and_sort() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/netops/repos"))
        .and(query_param("per_page", "100"))
        .and(query_param("sort", "updated"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "name": "templates-repo" }, { "name": "other" }])),
        )
        .mount(&server)
        .await;

    let repos = client.list_repos("netops").await.unwrap();
    assert_eq!(repos, vec!["templates-repo", "other"]);
}

#[tokio::test]
async fn test_list_private_repos() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(query_param("type", "private"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "network-state" }])))
        .mount(&server)
        .await;

    assert_eq!(client.list_private_repos().await.unwrap(), vec!["network-state"]);
}

// ── Contents ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_files_skips_directories() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/templates-repo/contents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "vlan.txt", "type": "file" },
            { "name": "archive", "type": "dir" },
            { "name": "ntp.j2", "type": "file" }
        ])))
        .mount(&server)
        .await;

    let files = client.list_files("netops", "templates-repo").await.unwrap();
    assert_eq!(files, vec!["vlan.txt", "ntp.j2"]);
}

#[tokio::test]
async fn test_get_file_content_decodes_base64() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/templates-repo/contents/vlan.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vlan.txt",
            "path": "vlan.txt",
            "sha": "blob1",
            "encoding": "base64",
            "content": encoded("vlan 10\n name users\n")
        })))
        .mount(&server)
        .await;

    let content = client
        .get_file_content("netops", "templates-repo", "vlan.txt")
        .await
        .unwrap();
    assert_eq!(content, "vlan 10\n name users\n");
}

#[tokio::test]
async fn test_probe_file_absent_on_404() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/network-state/contents/ap_inventory.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let probe = client
        .probe_file("netops", "network-state", "ap_inventory.json")
        .await
        .unwrap();
    assert_eq!(probe, Lookup::Absent);
}

#[tokio::test]
async fn test_probe_file_surfaces_auth_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let result = client
        .probe_file("netops", "network-state", "report.json")
        .await;
    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "Bad credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_probe_and_push_follow_configured_branch() {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "ghp_test".to_string().into();
    let client =
        RepoClient::from_token(&server.uri(), &token, "state-branch", &TransportConfig::default())
            .unwrap();

    // The file only exists on the configured branch
    Mock::given(method("GET"))
        .and(path("/repos/netops/network-state/contents/device_inventory.json"))
        .and(query_param("ref", "state-branch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "device_inventory.json",
            "path": "device_inventory.json",
            "sha": "blob-on-branch",
            "encoding": "base64",
            "content": encoded("[]")
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/netops/network-state/contents/device_inventory.json"))
        .and(body_partial_json(json!({
            "branch": "state-branch",
            "sha": "blob-on-branch"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let probe = client
        .probe_file("netops", "network-state", "device_inventory.json")
        .await
        .unwrap();
    match probe {
        Lookup::Found(file) => assert_eq!(file.sha, "blob-on-branch"),
        Lookup::Absent => panic!("file on the configured branch must be found"),
    }

    client
        .push_file(
            "netops",
            "network-state",
            "device_inventory.json",
            "network state sync",
            "[{}]",
            true,
        )
        .await
        .unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let result = client.list_repos("netops").await;
    assert!(
        matches!(result, Err(Error::RateLimited { .. })),
        "expected RateLimited, got: {result:?}"
    );
}

// ── Push ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_push_new_file_sends_no_sha() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/repos/netops/network-state/contents/site_hierarchy.json"))
        .and(body_partial_json(json!({
            "message": "network state sync",
            "branch": "main",
            "content": encoded("[]")
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "content": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .push_file(
            "netops",
            "network-state",
            "site_hierarchy.json",
            "network state sync",
            "[]",
            false,
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("sha").is_none(), "create must not send a sha: {body}");
}

#[tokio::test]
async fn test_push_update_resolves_sha_first() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/network-state/contents/report.json"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "report.json",
            "path": "report.json",
            "sha": "old-sha",
            "encoding": "base64",
            "content": encoded("[]")
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repos/netops/network-state/contents/report.json"))
        .and(body_partial_json(json!({ "sha": "old-sha" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": {} })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .push_file("netops", "network-state", "report.json", "sync", "[1]", true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_push_stale_sha_is_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/network-state/contents/report.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "report.json",
            "path": "report.json",
            "sha": "old-sha"
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            json!({ "message": "report.json does not match old-sha" }),
        ))
        .mount(&server)
        .await;

    let result = client
        .push_file("netops", "network-state", "report.json", "sync", "[]", true)
        .await;
    assert!(
        matches!(result, Err(Error::Conflict { .. })),
        "expected Conflict, got: {result:?}"
    );
}

// ── Commits ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_commit_listing_and_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/templates-repo/commits"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "sha": "c2" }, { "sha": "c1" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/netops/templates-repo/commits/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "c2",
            "html_url": "https://github.com/netops/templates-repo/commit/c2",
            "commit": {
                "author": { "email": "dev@example.com", "date": "2024-05-01T10:00:00Z" },
                "message": "add vlan 20"
            },
            "files": [{ "filename": "vlan.txt", "patch": "+vlan 20" }]
        })))
        .mount(&server)
        .await;

    let ids = client
        .list_commit_ids("netops", "templates-repo")
        .await
        .unwrap();
    assert_eq!(ids, vec!["c2", "c1"]);

    let info = client
        .get_commit_info("netops", "templates-repo", "c2")
        .await
        .unwrap();
    assert_eq!(info.filename.as_deref(), Some("vlan.txt"));
    assert_eq!(info.author, "dev@example.com");
    assert_eq!(info.date, "2024-05-01T10:00:00Z");
    assert_eq!(info.message, "add vlan 20");
    assert_eq!(info.url, "https://github.com/netops/templates-repo/commit/c2");
    assert_eq!(info.diff.as_deref(), Some("+vlan 20"));
}
