use std::sync::Arc;

use scheduleBot::error::GenerationServiceError;
use scheduleBot::handlers::http::routes;
use scheduleBot::service::assistant::Assistant;
use scheduleBot::service::generation_service::TextGenerator;
use scheduleBot::service::prompt::PromptTemplates;
use scheduleBot::service::query_interpreter::QueryInterpreter;
use scheduleBot::service::response_composer::ResponseComposer;
use scheduleBot::service::schedule_store::ScheduleStore;
use serde_json::Value;
use warp::http::StatusCode;

struct FakeGenerator;

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str, _model: &str) -> Result<String, GenerationServiceError> {
        Ok("You have Algorithms at 9:00 in B12.".to_string())
    }
}

fn assistant() -> Arc<Assistant> {
    let store = ScheduleStore::from_json(
        r#"[{"day": "Monday", "subject": "Algorithms", "start_time": "9:00", "end_time": "10:30", "room": "B12"}]"#,
    )
    .unwrap();
    let composer = ResponseComposer::new(
        Arc::new(FakeGenerator),
        PromptTemplates::default(),
        "llama3".to_string(),
    );
    Arc::new(Assistant::new(Arc::new(store), QueryInterpreter::default(), composer))
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let res = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes(assistant()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body().as_ref(), b"ok");
}

#[tokio::test]
async fn ask_returns_answer_with_request_id() {
    let res = warp::test::request()
        .method("POST")
        .path("/ask")
        .json(&serde_json::json!({ "question": "What do I have on Monday?" }))
        .reply(&routes(assistant()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["day"], "Monday");
    assert_eq!(body["headline"], "Monday");
    assert!(body["full_date"].is_null());
    assert_eq!(body["answer"], "You have Algorithms at 9:00 in B12.");
    assert!(uuid::Uuid::parse_str(body["request_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn empty_question_is_a_json_bad_request() {
    let res = warp::test::request()
        .method("POST")
        .path("/ask")
        .json(&serde_json::json!({ "question": "" }))
        .reply(&routes(assistant()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res.body())["error"], "Please enter a question.");
}

#[tokio::test]
async fn malformed_body_is_a_json_bad_request() {
    for payload in ["not json", "{}"] {
        let res = warp::test::request()
            .method("POST")
            .path("/ask")
            .header("content-type", "application/json")
            .body(payload)
            .reply(&routes(assistant()))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = body_json(res.body());
        assert!(body["error"].as_str().unwrap().contains("deserialize"), "{payload}");
    }
}

#[tokio::test]
async fn schedule_segment_is_percent_decoded() {
    let res = warp::test::request()
        .method("GET")
        .path("/schedule/Mon%64ay")
        .reply(&routes(assistant()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["day"], "Monday");
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["message"], "- **Algorithms** from *9:00* to *10:30* in `B12`");
}

#[tokio::test]
async fn day_without_classes_reports_no_events() {
    let res = warp::test::request()
        .method("GET")
        .path("/schedule/sunday")
        .reply(&routes(assistant()))
        .await;

    let body = body_json(res.body());
    assert!(body["entries"].as_array().unwrap().is_empty());
    assert_eq!(body["message"], "No subjects scheduled for Sunday.");
}

#[tokio::test]
async fn unknown_path_is_a_json_not_found() {
    let res = warp::test::request()
        .method("GET")
        .path("/calendar")
        .reply(&routes(assistant()))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res.body())["error"], "not found");
}
