//! Wire-level tests for the HTTP release client
//!
//! Each test stands up a mock backend and checks the exact request the
//! client sends and how responses map onto results and errors.

use helmdeck::api::{ChartValuesQuery, ClientError, HttpReleaseClient, ReconfigureRequest, ReleaseApi};
use helmdeck::models::{ReleaseInfoKind, ReleaseStatus};
use mockito::{Matcher, Server};

const HISTORY: &str = r#"[
  {"name":"argo-cd","namespace":"default","chart":"argo-cd-4.5.0","chart_name":"argo-cd","chart_ver":"4.5.0","app_version":"v2.3.3","revision":1,"status":"superseded","updated":"2024-03-01T10:00:00Z","description":"Install complete"},
  {"name":"argo-cd","namespace":"default","chart":"argo-cd-4.5.0","chart_name":"argo-cd","chart_ver":"4.5.0","app_version":"v2.3.3","revision":3,"status":"deployed","updated":"2024-03-03T10:00:00Z","description":"Upgrade complete","has_tests":true},
  {"name":"argo-cd","namespace":"default","chart":"argo-cd-4.5.0","chart_name":"argo-cd","chart_ver":"4.5.0","app_version":"v2.3.3","revision":2,"status":"superseded","updated":"2024-03-02T10:00:00Z","description":"Upgrade complete"}
]"#;

fn client(server: &Server, context: Option<&str>) -> HttpReleaseClient {
    HttpReleaseClient::new(&server.url(), context.map(str::to_string)).unwrap()
}

fn nginx_request() -> ReconfigureRequest {
    ReconfigureRequest {
        namespace: "web".to_string(),
        release: "nginx".to_string(),
        repository: "bitnami".to_string(),
        chart_name: "nginx".to_string(),
        version: "15.1.0".to_string(),
        user_values: "replicaCount: 2\n".to_string(),
    }
}

#[tokio::test]
async fn test_history_sends_context_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/helm/releases/default/argo-cd/history")
        .match_header("X-Kubecontext", "docker-desktop")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(HISTORY)
        .expect(1)
        .create_async()
        .await;

    let history = client(&server, Some("docker-desktop"))
        .get_history("default", "argo-cd")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].chart_ver, "4.5.0");
    assert_eq!(history[1].has_tests, Some(true));
    assert_eq!(history[0].status, ReleaseStatus::Superseded);
}

#[tokio::test]
async fn test_get_release_picks_highest_revision() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/releases/default/argo-cd/history")
        .with_status(200)
        .with_body(HISTORY)
        .create_async()
        .await;

    let release = client(&server, None)
        .get_release("default", "argo-cd")
        .await
        .unwrap();
    assert_eq!(release.revision, 3);
    assert_eq!(release.status, ReleaseStatus::Deployed);
}

#[tokio::test]
async fn test_list_releases_null_body_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/releases")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let releases = client(&server, None).list_releases().await.unwrap();
    assert!(releases.is_empty());
}

#[tokio::test]
async fn test_rollback_posts_current_revision() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/helm/releases/default/argo-cd/rollback")
        .match_body(Matcher::UrlEncoded("revision".into(), "3".into()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    client(&server, None)
        .rollback("default", "argo-cd", 3)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rollback_of_first_revision_never_reaches_backend() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client(&server, None)
        .rollback("default", "argo-cd", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ValidationRejected(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_reconfigure_sends_multipart_form() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/helm/releases/web/nginx")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="preview"\r\n\r\nfalse\r\n"#.to_string()),
            Matcher::Regex(r#"name="chart"\r\n\r\nbitnami/nginx\r\n"#.to_string()),
            Matcher::Regex(r#"name="version"\r\n\r\n15\.1\.0\r\n"#.to_string()),
            Matcher::Regex(r#"name="values"\r\n\r\nreplicaCount: 2\n"#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"name":"nginx","version":4}"#)
        .expect(1)
        .create_async()
        .await;

    let state = client(&server, None)
        .reconfigure(&nginx_request())
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(state["version"], 4);
}

#[tokio::test]
async fn test_reconfigure_rejection_is_verbatim() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/helm/releases/web/nginx")
        .with_status(422)
        .with_body("values.yaml: replicaCount must be an integer")
        .create_async()
        .await;

    let err = client(&server, None)
        .reconfigure(&nginx_request())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::ValidationRejected("values.yaml: replicaCount must be an integer".into())
    );
    assert_eq!(
        err.reconfigure_message(),
        "values.yaml: replicaCount must be an integer"
    );
}

#[tokio::test]
async fn test_reconfigure_accepts_empty_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/helm/releases/web/nginx")
        .with_status(200)
        .create_async()
        .await;

    let state = client(&server, None)
        .reconfigure(&nginx_request())
        .await
        .unwrap();
    assert!(state.is_null());
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/releases/default/gone/history")
        .with_status(404)
        .with_body("release: not found")
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/helm/releases/default/argo-cd")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("POST", "/api/helm/releases/default/argo-cd/test")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let api = client(&server, None);
    assert!(matches!(
        api.get_history("default", "gone").await,
        Err(ClientError::NotFound(_))
    ));
    assert!(matches!(
        api.uninstall("default", "argo-cd").await,
        Err(ClientError::BackendUnavailable(_))
    ));
    assert!(matches!(
        api.run_tests("default", "argo-cd").await,
        Err(ClientError::Unknown(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Nothing listens on the discard port
    let api = HttpReleaseClient::new("http://127.0.0.1:9", None).unwrap();
    assert!(matches!(
        api.list_releases().await,
        Err(ClientError::BackendUnavailable(_))
    ));
}

#[tokio::test]
async fn test_latest_version_uses_first_match() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/repositories/latestver")
        .match_query(Matcher::UrlEncoded("name".into(), "argo-cd".into()))
        .with_status(200)
        .with_body(
            r#"[{"version":"5.1.0","repository":"argo","isSuggestedRepo":false},
                {"version":"9.9.9","repository":"mirror","isSuggestedRepo":false}]"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/helm/repositories/latestver")
        .match_query(Matcher::UrlEncoded("name".into(), "unknown".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = client(&server, None);
    let latest = api.get_latest_version("argo-cd").await.unwrap().unwrap();
    assert_eq!(latest.version, "5.1.0");
    assert_eq!(latest.repository, "argo");
    assert!(api.get_latest_version("unknown").await.unwrap().is_none());
}

#[tokio::test]
async fn test_versions_and_chart_values_queries() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/repositories/versions")
        .match_query(Matcher::UrlEncoded("name".into(), "nginx".into()))
        .with_status(200)
        .with_body(
            r#"[{"repository":"bitnami","version":"15.1.0"},{"repository":"bitnami","version":"15.0.2"}]"#,
        )
        .create_async()
        .await;
    let values_mock = server
        .mock("GET", "/api/helm/repositories/values")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chart".into(), "bitnami/nginx".into()),
            Matcher::UrlEncoded("version".into(), "15.1.0".into()),
            Matcher::UrlEncoded("namespace".into(), "web".into()),
        ]))
        .with_status(200)
        .with_body("replicaCount: 1\n")
        .expect(1)
        .create_async()
        .await;

    let api = client(&server, None);
    let versions = api.get_versions("nginx").await.unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].to_string(), "bitnami @ 15.1.0");

    let values = api
        .get_chart_values(&ChartValuesQuery {
            namespace: "web".to_string(),
            chart_name: "nginx".to_string(),
            repository: versions[0].repository.clone(),
            version: versions[0].version.clone(),
        })
        .await
        .unwrap();
    values_mock.assert_async().await;
    assert_eq!(values, "replicaCount: 1\n");
}

#[tokio::test]
async fn test_chart_values_require_repository() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client(&server, None)
        .get_chart_values(&ChartValuesQuery {
            namespace: "web".to_string(),
            chart_name: "nginx".to_string(),
            repository: String::new(),
            version: "15.1.0".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ValidationRejected(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_release_info_and_resources_queries() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/helm/releases/default/argo-cd/values")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("revision".into(), "2".into()),
            Matcher::UrlEncoded("userDefined".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body("server:\n  replicas: 2\n")
        .create_async()
        .await;
    server
        .mock("GET", "/api/helm/releases/default/argo-cd/resources")
        .match_query(Matcher::UrlEncoded("health".into(), "true".into()))
        .with_status(200)
        .with_body(
            r#"[{"kind":"Deployment","apiVersion":"apps/v1","metadata":{"name":"argo-cd-server","namespace":"default"}},
                {"kind":"Service","metadata":{"name":"argo-cd-server"}}]"#,
        )
        .create_async()
        .await;

    let api = client(&server, None);
    let values = api
        .get_release_info("default", "argo-cd", ReleaseInfoKind::Values, 2, true)
        .await
        .unwrap();
    assert!(values.contains("replicas: 2"));

    let resources = api.get_resources("default", "argo-cd").await.unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].api_version.as_deref(), Some("apps/v1"));
    assert_eq!(resources[1].name(), "argo-cd-server");
}
