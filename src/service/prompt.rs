use std::fs;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::TemplateError;

const ANSWER_TEMPLATE_NAME: &str = "schedule_answer";

pub const DEFAULT_ANSWER_TEMPLATE: &str = r#"
You are a calendar assistant.

Respond clearly and truthfully based on the user's question and the schedule provided.

If a full calendar date is given (like July 13), tell the user what day of the week it is.
Do not invent subjects, times or rooms. Only use the schedule data given.

User's question: "{{user_input}}"

Date interpreted: {{full_date}}
Day: {{day}}
Schedule for {{day}}:
{{calendar_events}}

Now answer the user's question clearly using the info above.
"#;

#[derive(Debug, Serialize)]
pub struct PromptContext<'a> {
    pub user_input: &'a str,
    pub full_date: &'a str,
    pub day: &'a str,
    pub calendar_events: &'a str,
}

/// Strict-mode registry holding the answer template. Values are inserted
/// verbatim since the output is plain text for the model, not HTML.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    registry: Handlebars<'static>,
}

impl PromptTemplates {
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(ANSWER_TEMPLATE_NAME, template)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    pub fn from_file(path: &str) -> Result<Self, TemplateError> {
        let template = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::new(&template)
    }

    pub fn render(&self, context: &PromptContext<'_>) -> Result<String, TemplateError> {
        let rendered = self
            .registry
            .render(ANSWER_TEMPLATE_NAME, context)
            .map_err(Box::new)?;
        Ok(rendered)
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_TEMPLATE).expect("default prompt template is valid")
    }
}
