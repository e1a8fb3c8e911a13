mod common;

use std::time::Duration;

use common::{Backend, FakeState};
use crm_client::{api::ApiClient, common::error::AppError, config::ClientConfig};
use serde_json::Value;

#[tokio::test]
async fn slow_backend_becomes_timeout() {
    let backend = Backend::start(FakeState::default()).await;
    let config = ClientConfig::new(backend.base_url.clone()).with_timeout(Duration::from_millis(200));
    let client = ApiClient::new(&config).expect("client");

    let err = client.get::<Value>("/slow").await.expect_err("must time out");

    assert!(matches!(err, AppError::Timeout));
    assert_eq!(err.user_message(), "Tempo limite excedido ao falar com a API");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // porta 9 (discard) não tem ninguém escutando em localhost
    let config = ClientConfig::new("http://127.0.0.1:9/api").with_timeout(Duration::from_secs(2));
    let client = ApiClient::new(&config).expect("client");

    let err = client.get::<Value>("/pipeline/board").await.expect_err("no server");

    assert!(matches!(err, AppError::Network(_) | AppError::Timeout));
}

#[tokio::test]
async fn error_detail_is_surfaced() {
    let backend = Backend::start(FakeState::default()).await;
    let client = ApiClient::new(&backend.config()).expect("client");

    let err = client
        .get::<Value>("/customers/404")
        .await
        .expect_err("missing customer");

    assert!(matches!(err, AppError::NotFound(ref m) if m == "Cliente não encontrado"));
}
