use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use veritas_analysis::{CompletionSettings, StatementAnalyzer};
use veritas_llm::mock::StaticLlmClient;
use veritas_server::{ALLOWED_HEADERS, ANALYZE_PATH, AppState, error::ErrorBody, router};

fn app_with(llm: Arc<StaticLlmClient>) -> Router {
    let analyzer = StatementAnalyzer::new(llm, CompletionSettings::default());
    router(Arc::new(AppState { analyzer }))
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn rick_scott_request() -> String {
    json!({
        "statement": "We need Medicare to negotiate drug prices",
        "speaker": "Senator Rick Scott",
        "date": "2024-03-15"
    })
    .to_string()
}

fn mocked_completion(has_contradictions: bool, level: &str) -> String {
    json!({
        "intentSummary": "Pro-consumer framing",
        "contradictions": [],
        "overallAssessment": {
            "hasContradictions": has_contradictions,
            "confidenceLevel": level,
            "confidencePercentage": 55,
            "summary": "Limited record"
        },
        "supportingEvidence": [
            {
                "title": "Vote",
                "description": "Roll call",
                "url": "https://www.senate.gov/legislative/LIS/roll_call_votes/vote1172/vote_117_2_00325.htm",
                "source": "Senate.gov"
            },
            {
                "title": "Forum",
                "description": "Transcript",
                "url": "https://example-townhall-transcript.com/2021/immigration-forum",
                "source": "Blog"
            }
        ],
        "methodology": "Record comparison"
    })
    .to_string()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn preflight_is_empty_with_cors_headers() {
    let llm = Arc::new(StaticLlmClient::replying("{}"));
    let app = app_with(llm.clone());

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        ALLOWED_HEADERS
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn well_formed_completion_is_echoed_with_urls_sanitized() {
    let llm = Arc::new(StaticLlmClient::replying(format!(
        "```json\n{}\n```",
        mocked_completion(true, "high")
    )));
    let resp = app_with(llm.clone())
        .oneshot(post("/", rick_scott_request()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

    let body = json_body(resp).await;
    assert_eq!(body["overallAssessment"]["hasContradictions"], json!(true));
    assert_eq!(body["overallAssessment"]["confidenceLevel"], json!("high"));
    assert_eq!(
        body["supportingEvidence"][0]["url"],
        json!("https://www.senate.gov/legislative/LIS/roll_call_votes/vote1172/vote_117_2_00325.htm")
    );
    assert_eq!(body["supportingEvidence"][1]["url"], Value::Null);
    assert_eq!(body["supportingEvidence"][1]["source"], json!("Blog"));
    assert_eq!(llm.calls(), 1);

    let prompt = llm.last_call().unwrap().prompt;
    assert!(prompt.contains("SPEAKER: Senator Rick Scott"));
}

#[tokio::test]
async fn assessment_values_are_not_rewritten() {
    let llm = Arc::new(StaticLlmClient::replying(mocked_completion(false, "medium")));
    let resp = app_with(llm)
        .oneshot(post(ANALYZE_PATH, rick_scott_request()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["overallAssessment"]["hasContradictions"], json!(false));
    assert_eq!(body["overallAssessment"]["confidenceLevel"], json!("medium"));
    assert_eq!(body["overallAssessment"]["confidencePercentage"], json!(55));
}

#[tokio::test]
async fn off_schema_completion_is_returned_as_written() {
    let completion = json!({
        "intentSummary": "Pro-consumer framing",
        "contradictions": [{
            "type": "voting_record",
            "severity": "High",
            "title": "IRA vote",
            "description": "Voted no",
            "evidence": "Roll call 325"
        }],
        "overallAssessment": {
            "hasContradictions": true,
            "confidenceLevel": "high",
            "confidencePercentage": 85.0,
            "summary": "Record conflicts"
        },
        "methodology": "Record comparison",
        "caveats": ["Limited to federal votes"]
    });
    let llm = Arc::new(StaticLlmClient::replying(completion.to_string()));
    let resp = app_with(llm)
        .oneshot(post("/", rick_scott_request()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, completion);
}

#[tokio::test]
async fn unparseable_completion_returns_fallback_with_success_status() {
    let llm = Arc::new(StaticLlmClient::replying("I could not find anything."));
    let resp = app_with(llm)
        .oneshot(post("/", rick_scott_request()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["contradictions"].as_array().unwrap().len(), 1);
    assert_eq!(body["contradictions"][0]["type"], json!("analysis_error"));
    assert_eq!(body["overallAssessment"]["confidencePercentage"], json!(0));
    assert_eq!(body["overallAssessment"]["confidenceLevel"], json!("low"));
    assert_eq!(body["supportingEvidence"], json!([]));
}

#[tokio::test]
async fn external_failure_is_a_500_with_message() {
    let llm = Arc::new(StaticLlmClient::failing("OpenAI API error: 502"));
    let resp = app_with(llm.clone())
        .oneshot(post("/", rick_scott_request()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let body: ErrorBody = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(body.error, "Analysis failed");
    assert!(body.message.contains("OpenAI API error: 502"));
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn unreadable_body_is_a_500_without_calling_out() {
    let llm = Arc::new(StaticLlmClient::replying("{}"));
    let resp = app_with(llm.clone())
        .oneshot(post("/", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(resp).await;
    assert_eq!(body["error"], json!("Analysis failed"));
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn missing_fields_are_passed_through_as_empty_text() {
    let llm = Arc::new(StaticLlmClient::replying(mocked_completion(false, "low")));
    let resp = app_with(llm.clone())
        .oneshot(post("/", json!({ "statement": "Taxes are too high" }).to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let prompt = llm.last_call().unwrap().prompt;
    assert!(prompt.contains("STATEMENT: \"Taxes are too high\"\nSPEAKER: \nDATE: \n"));
}

#[tokio::test]
async fn health_reports_ok() {
    let llm = Arc::new(StaticLlmClient::replying("{}"));
    let resp = app_with(llm)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], json!("ok"));
}
