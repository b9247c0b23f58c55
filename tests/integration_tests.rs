// Integration tests for Comment Insights
//
// Both services run in-process against mockito stand-ins for the
// Hugging Face and Gemini APIs.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use comment_insights::config::{ClassifierSettings, GeneratorSettings};
use comment_insights::error::json_config;
use comment_insights::routes::{self, SentimentState, SummaryState};
use comment_insights::services::{GeminiClient, HuggingFaceClient};
use mockito::Matcher;
use serde_json::{json, Value};
use std::sync::Arc;

const SENTIMENT_MODEL: &str = "nlptown/bert-base-multilingual-uncased-sentiment";
const SENTIMENT_PATH: &str = "/models/nlptown/bert-base-multilingual-uncased-sentiment";
const SUMMARY_PATH: &str = "/v1beta/models/gemini-1.5-pro-latest:generateContent";

fn sentiment_state(endpoint: &str) -> SentimentState {
    let settings = ClassifierSettings {
        endpoint: endpoint.to_string(),
        model: SENTIMENT_MODEL.to_string(),
        api_token: Some("hf_test".to_string()),
        timeout_secs: Some(5),
        wait_for_model: true,
    };

    SentimentState {
        classifier: Arc::new(HuggingFaceClient::from_settings(&settings).unwrap()),
    }
}

fn summary_state(endpoint: &str) -> SummaryState {
    let settings = GeneratorSettings {
        endpoint: endpoint.to_string(),
        model: "gemini-1.5-pro-latest".to_string(),
        api_key: Some("test_key".to_string()),
        timeout_secs: Some(5),
    };

    SummaryState {
        generator: Arc::new(GeminiClient::from_settings(&settings).unwrap()),
    }
}

async fn post_sentiment(endpoint: &str, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(sentiment_state(endpoint)))
            .app_data(json_config())
            .configure(routes::configure_sentiment_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/analyze_sentiment")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn post_summary(endpoint: &str, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(summary_state(endpoint)))
            .app_data(json_config())
            .configure(routes::configure_summary_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/summarize")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn test_sentiment_scores_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", SENTIMENT_PATH)
        .match_header("authorization", "Bearer hf_test")
        .match_header("x-wait-for-model", "true")
        .match_body(Matcher::Json(json!({"inputs": "I love this"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[[{"label":"5 stars","score":0.82},{"label":"4 stars","score":0.15},{"label":"1 star","score":0.01}]]"#,
        )
        .create_async()
        .await;

    let (status, body) = post_sentiment(&server.url(), json!({"text": "I love this"})).await;

    assert_eq!(status, StatusCode::OK);
    let score = body["sentiment_score"].as_u64().unwrap();
    assert!((1..=5).contains(&score));
    assert_eq!(score, 5);
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_sentiment_rejects_missing_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", SENTIMENT_PATH)
        .expect(0)
        .create_async()
        .await;

    for body in [json!({"text": ""}), json!({}), json!({"text": null})] {
        let (status, body) = post_sentiment(&server.url(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No text provided"}));
    }

    mock.assert_async().await;
}

#[actix_web::test]
async fn test_sentiment_upstream_error_is_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", SENTIMENT_PATH)
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Model nlptown/bert-base-multilingual-uncased-sentiment is currently loading","estimated_time":20.0}"#)
        .create_async()
        .await;

    let (status, body) = post_sentiment(&server.url(), json!({"text": "meh"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Inference API error: Model nlptown/bert-base-multilingual-uncased-sentiment is currently loading"
    );
}

#[actix_web::test]
async fn test_sentiment_unexpected_label_is_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", SENTIMENT_PATH)
        .with_status(200)
        .with_body(r#"[[{"label":"POSITIVE","score":0.99}]]"#)
        .create_async()
        .await;

    let (status, body) = post_sentiment(&server.url(), json!({"text": "fine"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unexpected sentiment label: \"POSITIVE\"");
}

#[actix_web::test]
async fn test_sentiment_unreachable_upstream_is_500() {
    let (status, body) = post_sentiment("http://127.0.0.1:1", json!({"text": "hello"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("HTTP request failed"));
}

/// Posts a raw body to either endpoint; both upstreams must stay untouched
async fn post_raw(uri: &str, content_type: &str, payload: &'static str) -> (StatusCode, Value) {
    let mut server = mockito::Server::new_async().await;
    let sentiment_mock = server.mock("POST", SENTIMENT_PATH).expect(0).create_async().await;
    let summary_mock = server.mock("POST", SUMMARY_PATH).expect(0).create_async().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(sentiment_state(&server.url())))
            .app_data(web::Data::new(summary_state(&server.url())))
            .app_data(json_config())
            .configure(routes::sentiment::configure)
            .configure(routes::summary::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", content_type))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body_json(resp).await;

    sentiment_mock.assert_async().await;
    summary_mock.assert_async().await;
    (status, body)
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap()
}

#[actix_web::test]
async fn test_malformed_json_is_500() {
    for uri in ["/analyze_sentiment", "/summarize"] {
        let (status, body) = post_raw(uri, "application/json", "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_message(&body).starts_with("Json deserialize error"));
    }
}

#[actix_web::test]
async fn test_wrong_field_type_is_500() {
    let (status, body) = post_raw("/analyze_sentiment", "application/json", r#"{"text": 5}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("invalid type: integer `5`"));

    let (status, body) = post_raw("/summarize", "application/json", r#"{"messages": ["a", 1]}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("invalid type: integer `1`"));
}

#[actix_web::test]
async fn test_non_object_body_is_500() {
    for uri in ["/analyze_sentiment", "/summarize"] {
        let (status, body) = post_raw(uri, "application/json", r#"["x"]"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_message(&body).starts_with("Json deserialize error"));
    }
}

#[actix_web::test]
async fn test_wrong_content_type_is_500() {
    let cases = [
        ("/analyze_sentiment", r#"{"text": "I love this"}"#),
        ("/summarize", r#"{"messages": ["a", "b"]}"#),
    ];

    for (uri, payload) in cases {
        let (status, body) = post_raw(uri, "text/plain", payload).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Content type error"}));
    }
}

#[actix_web::test]
async fn test_summary_returns_generated_text() {
    let mut server = mockito::Server::new_async().await;
    let expected_prompt = "Summarize the following conversation in user perspective for example \
        some users says like this while some says like that \n\na b\n\nFormat it like: plain text";
    let mock = server
        .mock("POST", SUMMARY_PATH)
        .match_header("x-goog-api-key", "test_key")
        .match_body(Matcher::Json(json!({
            "contents": [{"parts": [{"text": expected_prompt}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Some users say a, while others say b."}]},"finishReason":"STOP"}]}"#,
        )
        .create_async()
        .await;

    let (status, body) = post_summary(&server.url(), json!({"messages": ["a", "b"]})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Some users say a, while others say b.");
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_summary_rejects_missing_messages() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", SUMMARY_PATH)
        .expect(0)
        .create_async()
        .await;

    for body in [json!({"messages": []}), json!({}), json!({"messages": null})] {
        let (status, body) = post_summary(&server.url(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No messages provided"}));
    }

    mock.assert_async().await;
}

#[actix_web::test]
async fn test_summary_upstream_error_is_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", SUMMARY_PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#)
        .create_async()
        .await;

    let (status, body) = post_summary(&server.url(), json!({"messages": ["x"]})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Gemini API error: API key not valid. Please pass a valid API key. (INVALID_ARGUMENT)"
    );
}

#[actix_web::test]
async fn test_summary_blocked_prompt_is_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", SUMMARY_PATH)
        .with_status(200)
        .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .create_async()
        .await;

    let (status, body) = post_summary(&server.url(), json!({"messages": ["x"]})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Response was blocked: SAFETY");
}

#[actix_web::test]
async fn test_health_endpoints() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(summary_state("http://127.0.0.1:1")))
            .configure(routes::configure_summary_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "summary");
}
