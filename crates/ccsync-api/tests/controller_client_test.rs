#![allow(clippy::unwrap_used)]
// Integration tests for `ControllerClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ccsync_api::controller::{FabricRoles, TaskHandle, TaskPolicy, TemplateSpec};
use ccsync_api::{ControllerClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ControllerClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = ControllerClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn fast_policy(max_attempts: u32) -> TaskPolicy {
    TaskPolicy {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        max_attempts,
        settle_delay: Duration::ZERO,
    }
}

fn spec(name: &str, content: &str) -> TemplateSpec {
    TemplateSpec {
        name: name.into(),
        content: content.into(),
        language: "JINJA".into(),
        device_types: vec!["Routers".into(), "Switches and Hubs".into()],
        software_type: "IOS-XE".into(),
        author: "ccsync".into(),
        description: "Created by ccsync".into(),
    }
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_attaches_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .and(basic_auth("admin", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "tok-123" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site/count"))
        .and(header("X-Auth-Token", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let password: secrecy::SecretString = "secret".to_string().into();
    client.authenticate("admin", &password).await.unwrap();
    assert!(client.is_authenticated());
    assert_eq!(client.site_count().await.unwrap(), 4);
}

#[tokio::test]
async fn test_authenticate_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let password: secrecy::SecretString = "wrong".to_string().into();
    let result = client.authenticate("admin", &password).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.is_authenticated());
}

// ── Projects & templates ────────────────────────────────────────────

#[tokio::test]
async fn test_find_project_and_template() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/template-programmer/project"))
        .and(query_param("name", "TestProject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "name": "TestProject",
            "id": "p-1",
            "templates": [{ "name": "vlan", "id": "t-1", "composite": false }]
        }])))
        .mount(&server)
        .await;

    let project = client.find_project("TestProject").await.unwrap().unwrap();
    assert_eq!(project.id, "p-1");
    assert_eq!(project.find_template("vlan").unwrap().id, "t-1");
    assert!(project.find_template("ntp").is_none());
}

#[tokio::test]
async fn test_find_project_absent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/template-programmer/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.find_project("Missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_template_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/template-programmer/project/p-1/template"))
        .and(body_partial_json(json!({
            "name": "vlan",
            "projectId": "p-1",
            "templateContent": "vlan 10",
            "language": "JINJA",
            "softwareType": "IOS-XE",
            "deviceTypes": [
                { "productFamily": "Routers" },
                { "productFamily": "Switches and Hubs" }
            ]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "response": { "taskId": "task-9", "url": "/api/v1/task/task-9" },
            "version": "1.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = client
        .create_template("p-1", &spec("vlan", "vlan 10"))
        .await
        .unwrap();
    assert_eq!(handle.task_id.as_deref(), Some("task-9"));
}

#[tokio::test]
async fn test_update_and_commit_template() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/dna/intent/api/v1/template-programmer/template"))
        .and(body_partial_json(json!({ "id": "t-1", "templateContent": "vlan 20" })))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "response": { "taskId": "task-2" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/template-programmer/template/version"))
        .and(body_partial_json(
            json!({ "templateId": "t-1", "comments": "committed by ccsync" }),
        ))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "response": { "taskId": "task-3" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_template("t-1", "p-1", &spec("vlan", "vlan 20"))
        .await
        .unwrap();
    client
        .commit_template("t-1", "committed by ccsync")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_template_content() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v2/template-programmer/template"))
        .and(query_param("name", "vlan"))
        .and(query_param("projectId", "p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{ "name": "vlan", "templateContent": "{#\n#}\n!\nvlan 10" }]
        })))
        .mount(&server)
        .await;

    let content = client.get_template_content("p-1", "vlan").await.unwrap();
    assert_eq!(content.as_deref(), Some("{#\n#}\n!\nvlan 10"));
}

// ── Tasks ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wait_for_task_polls_until_finished() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/task/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "isError": false, "progress": "in progress" }
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/task/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "isError": false, "progress": "done", "endTime": 1_700_000_000_000_i64 }
        })))
        .mount(&server)
        .await;

    let handle = TaskHandle {
        task_id: Some("task-1".into()),
        url: None,
    };
    client.wait_for_task(&handle, &fast_policy(5)).await.unwrap();

    let polls = server.received_requests().await.unwrap().len();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn test_wait_for_task_reports_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/task/task-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "isError": true, "failureReason": "Template name already exists" }
        })))
        .mount(&server)
        .await;

    let handle = TaskHandle {
        task_id: Some("task-4".into()),
        url: None,
    };
    match client.wait_for_task(&handle, &fast_policy(3)).await {
        Err(Error::TaskFailed { task_id, reason }) => {
            assert_eq!(task_id, "task-4");
            assert_eq!(reason, "Template name already exists");
        }
        other => panic!("expected TaskFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_for_task_times_out() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/task/task-5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": { "isError": false } })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let handle = TaskHandle {
        task_id: Some("task-5".into()),
        url: None,
    };
    let result = client.wait_for_task(&handle, &fast_policy(3)).await;
    assert!(
        matches!(result, Err(Error::TaskTimeout { attempts: 3, .. })),
        "expected TaskTimeout, got: {result:?}"
    );
}

#[tokio::test]
async fn test_wait_without_task_id_does_not_poll() {
    let (server, client) = setup().await;

    client
        .wait_for_task(&TaskHandle::default(), &fast_policy(3))
        .await
        .unwrap();
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Inventory ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_all_devices_pages_by_offset() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/network-device/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": 501 })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/network-device"))
        .and(query_param("offset", "1"))
        .and(query_param("limit", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{ "id": "d-1", "hostname": "edge-1", "managementIpAddress": "10.0.0.1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/network-device"))
        .and(query_param("offset", "501"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{ "id": "d-2", "hostname": "ap-1", "managementIpAddress": "10.0.0.2",
                           "family": "Unified AP" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_all_devices().await.unwrap();
    let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d-1", "d-2"]);
    assert_eq!(devices[1].family.as_deref(), Some("Unified AP"));
}

#[tokio::test]
async fn test_device_detail_location() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/network-device-detail"))
        .and(query_param("identifier", "uuid"))
        .and(query_param("searchBy", "d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": { "location": "Global/US/Austin/Floor 1" }
        })))
        .mount(&server)
        .await;

    let site = client.device_detail("d-1").await.unwrap();
    assert_eq!(site.as_deref(), Some("Global/US/Austin/Floor 1"));
}

#[tokio::test]
async fn test_fabric_roles_outcomes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/business/sda/device/role"))
        .and(query_param("deviceManagementIpAddress", "10.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "roles": ["EDGENODE", "BORDERNODE"]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/business/sda/device/role"))
        .and(query_param("deviceManagementIpAddress", "10.0.0.2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "failed", "description": "Device not part of any fabric"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/business/sda/device/role"))
        .and(query_param("deviceManagementIpAddress", "10.0.0.3"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert_eq!(
        client.device_fabric_roles("10.0.0.1").await.unwrap(),
        FabricRoles::Member(vec!["EDGENODE".into(), "BORDERNODE".into()])
    );
    assert_eq!(
        client.device_fabric_roles("10.0.0.2").await.unwrap(),
        FabricRoles::Unavailable("Device not part of any fabric".into())
    );
    let auth = client.device_fabric_roles("10.0.0.3").await;
    assert!(
        matches!(auth, Err(Error::Authentication { .. })),
        "auth failures must not be masked, got: {auth:?}"
    );
}

// ── Sites ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sites_and_settings() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .and(query_param("name", "Global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{ "id": "s-global", "name": "Global", "siteNameHierarchy": "Global" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v2/network"))
        .and(query_param("siteId", "s-global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{ "key": "dns.server", "value": [{ "primaryIpAddress": "10.1.1.1" }] }]
        })))
        .mount(&server)
        .await;

    let global = client.site_by_name("Global").await.unwrap().unwrap();
    assert_eq!(global.id, "s-global");

    let settings = client.network_settings("s-global").await.unwrap();
    assert_eq!(settings[0]["key"], "dns.server");
}

#[tokio::test]
async fn test_server_error_propagates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "response": { "errorCode": "NCGR10008", "message": "internal failure" }
        })))
        .mount(&server)
        .await;

    match client.list_sites().await {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal failure");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
