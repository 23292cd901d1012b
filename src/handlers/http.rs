use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, UnsupportedMediaType};
use warp::{Filter, Rejection, Reply};

use crate::error::AssistantError;
use crate::models::calendar_entry::CalendarEntry;
use crate::service::assistant::{Answer, Assistant};
use crate::service::schedule_store::ScheduleStore;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    request_id: String,
    #[serde(flatten)]
    answer: Answer,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub day: String,
    pub entries: Vec<CalendarEntry>,
    pub message: String,
}

pub async fn answer_question(
    assistant: &Assistant,
    request: AskRequest,
) -> (StatusCode, serde_json::Value) {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("ask", request_id = %request_id);
    match assistant.ask(&request.question).instrument(span).await {
        Ok(answer) => match serde_json::to_value(AskResponse {
            request_id: request_id.clone(),
            answer,
        }) {
            Ok(body) => (StatusCode::OK, body),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "request_id": request_id, "error": err.to_string() }),
            ),
        },
        Err(err @ AssistantError::EmptyQuestion) => (
            StatusCode::BAD_REQUEST,
            json!({ "request_id": request_id, "error": err.to_string() }),
        ),
        Err(err @ AssistantError::Generation(_)) => (
            StatusCode::BAD_GATEWAY,
            json!({ "request_id": request_id, "error": err.to_string() }),
        ),
    }
}

pub fn schedule_for_day(store: &ScheduleStore, day: &str) -> ScheduleResponse {
    let schedule = store.entries_for_day(day);
    ScheduleResponse {
        day: schedule.day().to_string(),
        entries: schedule.entries().to_vec(),
        message: schedule.to_string(),
    }
}

fn with_assistant(
    assistant: Arc<Assistant>,
) -> impl Filter<Extract = (Arc<Assistant>,), Error = Infallible> + Clone {
    warp::any().map(move || assistant.clone())
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

async fn handle_ask(request: AskRequest, assistant: Arc<Assistant>) -> Result<impl Reply, Infallible> {
    let (status, body) = answer_question(&assistant, request).await;
    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

// Path segments arrive percent-encoded.
async fn handle_schedule(day: String, assistant: Arc<Assistant>) -> Result<impl Reply, Infallible> {
    match urlencoding::decode(&day) {
        Ok(day) => Ok(warp::reply::with_status(
            warp::reply::json(&schedule_for_day(assistant.store(), &day)),
            StatusCode::OK,
        )),
        Err(_) => Ok(error_reply(StatusCode::BAD_REQUEST, "day is not valid UTF-8")),
    }
}

/// Every rejection becomes a JSON `{ "error": … }` body.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "not found"));
    }
    if let Some(cause) = err.find::<BodyDeserializeError>() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, &cause.to_string()));
    }
    if let Some(cause) = err.find::<UnsupportedMediaType>() {
        return Ok(error_reply(StatusCode::UNSUPPORTED_MEDIA_TYPE, &cause.to_string()));
    }
    if err.find::<MethodNotAllowed>().is_some() {
        return Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"));
    }
    warn!(rejection = ?err, "unhandled rejection");
    Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, "internal error"))
}

pub fn routes(assistant: Arc<Assistant>) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "ok");

    let ask = warp::path("ask")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_assistant(assistant.clone()))
        .and_then(handle_ask);

    let schedule = warp::path!("schedule" / String)
        .and(warp::get())
        .and(with_assistant(assistant))
        .and_then(handle_schedule);

    health.or(ask).or(schedule).recover(handle_rejection)
}
