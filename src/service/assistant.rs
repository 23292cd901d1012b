use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::AssistantError;
use crate::models::query::InterpretedQuery;
use crate::service::query_interpreter::QueryInterpreter;
use crate::service::response_composer::ResponseComposer;
use crate::service::schedule_store::ScheduleStore;

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub headline: String,
    pub day: String,
    pub full_date: Option<String>,
    pub answer: String,
}

impl Answer {
    fn new(query: &InterpretedQuery, answer: String) -> Self {
        Self {
            headline: query.headline(),
            day: query.day_name().to_string(),
            full_date: query.resolved_date.map(|_| query.full_date_text()),
            answer,
        }
    }
}

/// Question in, answer out. Each call stands alone.
pub struct Assistant {
    store: Arc<ScheduleStore>,
    interpreter: QueryInterpreter,
    composer: ResponseComposer,
}

impl Assistant {
    pub fn new(store: Arc<ScheduleStore>, interpreter: QueryInterpreter, composer: ResponseComposer) -> Self {
        Self {
            store,
            interpreter,
            composer,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn resolve_at(&self, question: &str, now: DateTime<Utc>) -> InterpretedQuery {
        self.interpreter.interpret_at(question, &self.store, now)
    }

    /// The prompt `ask_at` would send, without calling the model.
    pub fn preview_prompt_at(&self, question: &str, now: DateTime<Utc>) -> Result<String, AssistantError> {
        let question = non_empty(question)?;
        let query = self.resolve_at(question, now);
        Ok(self.composer.render_prompt(question, &query)?)
    }

    pub async fn ask(&self, question: &str) -> Result<Answer, AssistantError> {
        self.ask_at(question, Utc::now()).await
    }

    pub async fn ask_at(&self, question: &str, now: DateTime<Utc>) -> Result<Answer, AssistantError> {
        let question = non_empty(question)?;
        let query = self.resolve_at(question, now);
        info!(
            day = query.day_name(),
            entries = query.matching_entries.entries().len(),
            "answering question"
        );
        let answer = self.composer.compose(question, &query).await?;
        Ok(Answer::new(&query, answer))
    }
}

fn non_empty(question: &str) -> Result<&str, AssistantError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AssistantError::EmptyQuestion);
    }
    Ok(question)
}
