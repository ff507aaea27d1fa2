mod harness;

use harness::config::ConfigBuilder;
use harness::mock_openai::MockOpenAi;
use harness::server::TestServer;

async fn configure_key(server: &TestServer, key: &str) {
    let resp = server
        .client()
        .post(server.url("/api/config"))
        .json(&serde_json::json!({ "api_key": key }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

async fn complete(server: &TestServer, body: &serde_json::Value) -> reqwest::Response {
    server
        .client()
        .post(server.url("/api/completar-plantilla"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn completes_template_with_stored_credential() {
    let mock = MockOpenAi::start_with("", "ANAMNESIS: dolor torácico").await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();
    configure_key(&server, "sk-stored").await;

    let resp = complete(&server, &serde_json::json!({ "prompt": "Plantilla: ANAMNESIS…" })).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], "ANAMNESIS: dolor torácico");

    assert_eq!(mock.completion_count(), 1);
    assert_eq!(mock.last_authorization().as_deref(), Some("Bearer sk-stored"));
}

#[tokio::test]
async fn sends_the_fixed_two_message_exchange() {
    let mock = MockOpenAi::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();
    configure_key(&server, "sk-stored").await;

    let resp = complete(&server, &serde_json::json!({ "prompt": "rellena la plantilla" })).await;
    assert_eq!(resp.status(), 200);

    assert_eq!(mock.last_model().as_deref(), Some("gpt-3.5-turbo"));

    let messages = mock.last_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].0, "system");
    assert!(messages[0].1.contains("asistente médico"));
    assert_eq!(messages[1].0, "user");
    assert_eq!(messages[1].1, "rellena la plantilla");
}

#[tokio::test]
async fn rejects_empty_prompt() {
    let mock = MockOpenAi::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();
    configure_key(&server, "sk-stored").await;

    let resp = complete(&server, &serde_json::json!({ "prompt": "" })).await;

    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Prompt requerido");
    assert_eq!(mock.completion_count(), 0);
}

#[tokio::test]
async fn rejects_missing_prompt_field() {
    let mock = MockOpenAi::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();

    let resp = complete(&server, &serde_json::json!({})).await;

    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Prompt requerido");
}

#[tokio::test]
async fn rejects_without_any_credential() {
    let mock = MockOpenAi::start().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();

    let resp = complete(&server, &serde_json::json!({ "prompt": "rellena la plantilla" })).await;

    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "API key no configurada");
    assert_eq!(mock.completion_count(), 0);
}

#[tokio::test]
async fn upstream_error_surfaces_status_and_body() {
    let mock = MockOpenAi::start_failing(429, "rate limited").await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(ConfigBuilder::new(&mock.base_url(), dir.path()).build())
        .await
        .unwrap();
    configure_key(&server, "sk-stored").await;

    let resp = complete(&server, &serde_json::json!({ "prompt": "rellena la plantilla" })).await;

    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = resp.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("429"), "error should carry the upstream status: {error}");
    assert!(error.contains("rate limited"), "error should carry the upstream body: {error}");
}
