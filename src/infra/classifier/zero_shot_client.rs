// =============================================================================
// ZERO-SHOT CLIENT - Hosted zero-shot classification over HTTP
// =============================================================================
//
// Implements `ContentClassifier` against any endpoint that speaks the
// Hugging Face Inference API zero-shot format (e.g. facebook/bart-large-mnli).
//
// **Request:**
//   POST {endpoint}
//   {"inputs": "...", "parameters": {"candidate_labels": [...], "multi_label": true}}
//
// **Response:**
//   {"sequence": "...", "labels": [...], "scores": [...]}
//
// Labels come back sorted by score, highest first. The shape is checked once
// here, so the policy only ever sees a valid `ClassificationResult`.

use crate::core::moderation::{ClassificationResult, ClassifierError, ContentClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

pub struct ZeroShotClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl ZeroShotClient {
    pub fn new(
        endpoint: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_token,
        })
    }
}

#[async_trait]
impl ContentClassifier for ZeroShotClient {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassificationResult, ClassifierError> {
        let payload = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api { status, body });
        }

        let body: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Decode(e.to_string()))?;

        Ok(ClassificationResult::new(body.labels, body.scores)?)
    }

    fn name(&self) -> &str {
        "zero-shot"
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::InvalidClassification;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    const LABELS: [&str; 4] = ["harassment", "spam", "inappropriate", "safe"];

    /// Start a stub endpoint on an ephemeral port and return its URL.
    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/classify", addr)
    }

    fn client(endpoint: String, token: Option<&str>) -> ZeroShotClient {
        ZeroShotClient::new(
            endpoint,
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_serialization() {
        let payload = ZeroShotRequest {
            inputs: "hello",
            parameters: ZeroShotParameters {
                candidate_labels: &LABELS,
                multi_label: true,
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["inputs"], "hello");
        assert_eq!(
            json["parameters"]["candidate_labels"],
            json!(["harassment", "spam", "inappropriate", "safe"])
        );
        assert_eq!(json["parameters"]["multi_label"], true);
    }

    #[tokio::test]
    async fn test_classify_decodes_response_and_sends_token() {
        let seen: Arc<Mutex<Option<(Value, Option<String>)>>> = Arc::new(Mutex::new(None));
        let seen_by_stub = Arc::clone(&seen);

        let app = Router::new().route(
            "/classify",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = Arc::clone(&seen_by_stub);
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.lock().unwrap() = Some((body, auth));
                    Json(json!({
                        "sequence": "you are the worst",
                        "labels": ["harassment", "inappropriate", "spam", "safe"],
                        "scores": [0.93, 0.41, 0.08, 0.02]
                    }))
                }
            }),
        );

        let endpoint = spawn_stub(app).await;
        let result = client(endpoint, Some("hf_test"))
            .classify("you are the worst", &LABELS, true)
            .await
            .unwrap();

        assert_eq!(
            result.labels(),
            &["harassment", "inappropriate", "spam", "safe"]
        );
        assert_eq!(result.scores(), &[0.93, 0.41, 0.08, 0.02]);

        let (body, auth) = seen.lock().unwrap().take().unwrap();
        assert_eq!(body["inputs"], "you are the worst");
        assert_eq!(body["parameters"]["multi_label"], true);
        assert_eq!(auth.as_deref(), Some("Bearer hf_test"));
    }

    #[tokio::test]
    async fn test_classify_reports_api_error() {
        let app = Router::new().route(
            "/classify",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model is loading") }),
        );

        let endpoint = spawn_stub(app).await;
        let err = client(endpoint, None)
            .classify("anything", &LABELS, true)
            .await
            .unwrap_err();

        match err {
            ClassifierError::Api { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model is loading");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_rejects_misaligned_response() {
        let app = Router::new().route(
            "/classify",
            post(|| async {
                Json(json!({
                    "labels": ["harassment", "spam"],
                    "scores": [0.5]
                }))
            }),
        );

        let endpoint = spawn_stub(app).await;
        let err = client(endpoint, None)
            .classify("anything", &LABELS, true)
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_classify_reports_undecodable_body() {
        // "scores" is missing entirely
        let app = Router::new().route(
            "/classify",
            post(|| async { Json(json!({ "labels": ["spam"] })) }),
        );

        let endpoint = spawn_stub(app).await;
        let err = client(endpoint, None)
            .classify("anything", &LABELS, true)
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_classify_rejects_out_of_range_scores() {
        let app = Router::new().route(
            "/classify",
            post(|| async {
                Json(json!({
                    "labels": ["spam", "safe"],
                    "scores": [1.5, 0.1]
                }))
            }),
        );

        let endpoint = spawn_stub(app).await;
        let err = client(endpoint, None)
            .classify("anything", &LABELS, true)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClassifierError::InvalidResponse(InvalidClassification::ScoreOutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Bind then drop so nothing is listening on the port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}/classify", addr), None)
            .classify("anything", &LABELS, true)
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifierError::Request(_)));
    }
}
