use std::sync::Arc;

use tracing::warn;

use crate::error::GenerationServiceError;
use crate::models::query::InterpretedQuery;
use crate::service::generation_service::TextGenerator;
use crate::service::prompt::{PromptContext, PromptTemplates};

pub struct ResponseComposer {
    generator: Arc<dyn TextGenerator>,
    templates: PromptTemplates,
    model: String,
}

impl ResponseComposer {
    pub fn new(generator: Arc<dyn TextGenerator>, templates: PromptTemplates, model: String) -> Self {
        Self {
            generator,
            templates,
            model,
        }
    }

    pub fn render_prompt(
        &self,
        user_text: &str,
        query: &InterpretedQuery,
    ) -> Result<String, GenerationServiceError> {
        let full_date = query.full_date_text();
        let calendar_events = query.matching_entries.to_string();
        let context = PromptContext {
            user_input: user_text,
            full_date: &full_date,
            day: query.day_name(),
            calendar_events: &calendar_events,
        };
        Ok(self.templates.render(&context)?)
    }

    /// One generation call per question; the model's text is returned as is.
    pub async fn compose(
        &self,
        user_text: &str,
        query: &InterpretedQuery,
    ) -> Result<String, GenerationServiceError> {
        let prompt = self.render_prompt(user_text, query)?;
        self.generator
            .generate(&prompt, &self.model)
            .await
            .inspect_err(|err| warn!(error = %err, model = %self.model, "generation failed"))
    }
}
