//! Unit tests for the Linkding HTTP client against a mock server.

use linkding_sync::services::linkding_client::LinkdingClient;
use linkding_sync::types::errors::SyncError;
use linkding_sync::types::settings::SyncSettings;
use mockito::{Matcher, Server};
use serde_json::json;

fn settings_for(server: &Server) -> SyncSettings {
    SyncSettings {
        instance_url: server.url(),
        api_key: "secret-token".to_string(),
        fetch_limit: 2,
        fetch_offset: 0,
        ..SyncSettings::default()
    }
}

#[tokio::test]
async fn test_request_carries_auth_and_paging() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/bookmarks/")
        .match_query(Matcher::Exact("limit=2&offset=0".to_string()))
        .match_header("authorization", "Token secret-token")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"count": 1, "results": [{"title": "A", "url": "http://a"}]}).to_string())
        .create_async()
        .await;

    let page = LinkdingClient::new()
        .fetch_bookmarks(&settings_for(&server))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.count, Some(1));
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_search_query_is_sent_as_q() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/bookmarks/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "2".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
            Matcher::UrlEncoded("q".into(), "#rust async".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create_async()
        .await;

    let mut settings = settings_for(&server);
    settings.search_query = "#rust async".to_string();
    let page = LinkdingClient::new().fetch_bookmarks(&settings).await.unwrap();

    mock.assert_async().await;
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bookmarks/")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .create_async()
        .await;

    let err = LinkdingClient::new()
        .fetch_bookmarks(&settings_for(&server))
        .await
        .unwrap_err();

    match err {
        SyncError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid token."));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bookmarks/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = LinkdingClient::new()
        .fetch_bookmarks(&settings_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unexpected_shape_is_empty_page() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/bookmarks/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"["not", "an", "object"]"#)
        .create_async()
        .await;

    let page = LinkdingClient::new()
        .fetch_bookmarks(&settings_for(&server))
        .await
        .unwrap();
    assert!(page.results.is_empty());
    assert_eq!(page.count, None);
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // Bind and drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = SyncSettings {
        instance_url: format!("http://127.0.0.1:{}", port),
        ..SyncSettings::default()
    };

    let err = LinkdingClient::new().fetch_bookmarks(&settings).await.unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
}
