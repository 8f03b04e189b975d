mod harness;

use harness::config::ConfigBuilder;
use harness::mock_backend::MockBackend;
use harness::server::TestServer;
use harness::{FUNCTIONS, VALID_TOKEN};
use serde_json::{Value, json};

async fn start() -> (MockBackend, TestServer) {
    let backend = MockBackend::start().await.unwrap();
    let server = TestServer::start(ConfigBuilder::new(&backend).build()).await.unwrap();
    (backend, server)
}

async fn error_of(resp: reqwest::Response) -> (u16, String) {
    let status = resp.status().as_u16();
    let body: Value = resp.json().await.unwrap();
    (status, body["error"].as_str().unwrap_or_default().to_owned())
}

#[tokio::test]
async fn non_post_methods_are_rejected_before_auth() {
    let (backend, server) = start().await;

    for path in FUNCTIONS {
        for method in [reqwest::Method::GET, reqwest::Method::PUT, reqwest::Method::DELETE] {
            let resp = server.client().request(method.clone(), server.url(path)).send().await.unwrap();

            assert_eq!(error_of(resp).await, (405, "Method not allowed".to_owned()), "{method} {path}");
        }
    }

    assert_eq!(backend.identity_count(), 0);
}

#[tokio::test]
async fn missing_authorization_header() {
    let (backend, server) = start().await;

    for path in FUNCTIONS {
        let resp = server
            .client()
            .post(server.url(path))
            .json(&json!({ "seed": "A magical garden" }))
            .send()
            .await
            .unwrap();

        assert_eq!(error_of(resp).await, (401, "No authorization header".to_owned()), "{path}");
    }

    assert_eq!(backend.identity_count(), 0);
}

#[tokio::test]
async fn empty_bearer_token() {
    let (backend, server) = start().await;

    for header in ["Bearer ", "Bearer", "Basic dXNlcjpwYXNz"] {
        let resp = server
            .client()
            .post(server.url(FUNCTIONS[0]))
            .header("authorization", header)
            .json(&json!({ "seed": "A magical garden" }))
            .send()
            .await
            .unwrap();

        assert_eq!(error_of(resp).await, (401, "No token provided".to_owned()), "{header}");
    }

    assert_eq!(backend.identity_count(), 0);
}

#[tokio::test]
async fn unknown_token_is_invalid_and_reaches_no_provider() {
    let (backend, server) = start().await;

    for path in FUNCTIONS {
        let resp = server
            .client()
            .post(server.url(path))
            .bearer_auth("forged-token")
            .json(&json!({ "seed": "x", "prompt": "x", "audioData": "aGVsbG8=", "text": "x" }))
            .send()
            .await
            .unwrap();

        assert_eq!(error_of(resp).await, (401, "Invalid token".to_owned()), "{path}");
    }

    assert_eq!(backend.identity_count(), 4);
    assert_eq!(backend.provider_calls(), 0);
}

#[tokio::test]
async fn lowercase_scheme_is_accepted() {
    let (backend, server) = start().await;

    let resp = server
        .client()
        .post(server.url(FUNCTIONS[0]))
        .header("authorization", format!("bearer {VALID_TOKEN}"))
        .json(&json!({ "seed": "A magical garden" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(backend.story_count(), 1);
}

#[tokio::test]
async fn custom_prefix_moves_functions() {
    let backend = MockBackend::start().await.unwrap();
    let config = ConfigBuilder::new(&backend).with_path_prefix("/api").build();
    let server = TestServer::start(config).await.unwrap();

    let (status, _) = server.call("/api/generate-story", &json!({ "seed": "Moon boat" })).await;
    assert_eq!(status, 200);

    let resp = server.client().post(server.url(FUNCTIONS[0])).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}
