use axum::extract::Request;
use axum::http::StatusCode;
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::gemini::GeminiProvider;
use super::provider::LlmProvider;
use super::types::GenerateRequest;
use crate::errors::ApiError;

/// Stub Gemini endpoints. Paths contain a literal ':' so the stub
/// dispatches on the URI instead of registered routes.
async fn stub_gemini(request: Request) -> Result<Json<Value>, StatusCode> {
    let path = request.uri().path().to_string();
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let body: Value = serde_json::from_slice(&bytes).map_err(|_| StatusCode::BAD_REQUEST)?;

    if path.ends_with(":batchEmbedContents") {
        let count = body["requests"].as_array().map(|a| a.len()).unwrap_or(0);
        let embeddings: Vec<Value> = (0..count)
            .map(|i| json!({ "values": [1.0, i as f64] }))
            .collect();
        return Ok(Json(json!({ "embeddings": embeddings })));
    }

    if path.ends_with(":generateContent") {
        return Ok(Json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "stubbed answer" }] }
            }]
        })));
    }

    Err(StatusCode::NOT_FOUND)
}

async fn always_unavailable(_request: Request) -> (StatusCode, String) {
    (StatusCode::SERVICE_UNAVAILABLE, "quota exceeded".to_string())
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}", addr)
}

fn provider_for(base_url: String) -> GeminiProvider {
    GeminiProvider::with_base_url(
        base_url,
        "test-key".to_string(),
        "models/gemini-1.5-flash".to_string(),
        "models/embedding-001".to_string(),
    )
}

#[tokio::test]
async fn embed_parses_one_vector_per_input() {
    let base_url = spawn(Router::new().fallback(any(stub_gemini))).await;
    let provider = provider_for(base_url);

    let inputs = vec!["first chunk".to_string(), "second chunk".to_string()];
    let embeddings = provider.embed(&inputs).await.expect("embed");

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0], vec![1.0, 0.0]);
    assert_eq!(embeddings[1], vec![1.0, 1.0]);
}

#[tokio::test]
async fn generate_parses_candidate_text() {
    let base_url = spawn(Router::new().fallback(any(stub_gemini))).await;
    let provider = provider_for(base_url);

    let answer = provider
        .generate(GenerateRequest::new("Query: hi".to_string()))
        .await
        .expect("generate");
    assert_eq!(answer, "stubbed answer");
}

#[tokio::test]
async fn non_success_status_maps_to_provider_error() {
    let base_url = spawn(Router::new().fallback(any(always_unavailable))).await;
    let provider = provider_for(base_url);

    let err = provider
        .embed(&["chunk".to_string()])
        .await
        .expect_err("should fail");
    match err {
        ApiError::Provider(msg) => assert!(msg.contains("quota exceeded")),
        other => panic!("unexpected error variant: {other:?}"),
    }

    let err = provider
        .generate(GenerateRequest::new("hi".to_string()))
        .await
        .expect_err("should fail");
    assert!(matches!(err, ApiError::Provider(_)));
}
