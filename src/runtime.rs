use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::clients::ollama_client::OllamaClient;
use crate::config::Settings;
use crate::handlers::http;
use crate::models::query::day_name;
use crate::service::assistant::Assistant;
use crate::service::generation_service::{OllamaService, TextGenerator};
use crate::service::prompt::{DEFAULT_ANSWER_TEMPLATE, PromptTemplates};
use crate::service::query_interpreter::QueryInterpreter;
use crate::service::response_composer::ResponseComposer;
use crate::service::schedule_store::ScheduleStore;

/// Loads the schedule and prompt and wires the Ollama backend. Any failure
/// here is fatal at startup.
pub fn build_assistant(settings: &Settings) -> Result<Assistant> {
    let client = OllamaClient::new(&settings.ollama_host, settings.generation_timeout)
        .context("Unable to build the generation client")?;
    build_assistant_with(settings, Arc::new(OllamaService::new(client)))
}

pub fn build_assistant_with(settings: &Settings, generator: Arc<dyn TextGenerator>) -> Result<Assistant> {
    let store = ScheduleStore::load(&settings.schedule_file).context("Unable to load the class schedule")?;
    let days: Vec<&str> = store.days().into_iter().map(day_name).collect();
    info!(entries = store.len(), days = ?days, "schedule ready");

    let templates = match &settings.prompt_template_file {
        Some(path) => PromptTemplates::from_file(path).context("Unable to load the prompt template")?,
        None => PromptTemplates::new(DEFAULT_ANSWER_TEMPLATE).context("Unable to register the built-in prompt template")?,
    };

    let composer = ResponseComposer::new(generator, templates, settings.model.clone());
    Ok(Assistant::new(
        Arc::new(store),
        QueryInterpreter::new(settings.timezone),
        composer,
    ))
}

pub async fn run_api(assistant: Arc<Assistant>, settings: &Settings) {
    info!(
        addr = %settings.bind_addr,
        model = %settings.model,
        host = %settings.ollama_host,
        "starting schedule api"
    );
    warp::serve(http::routes(assistant)).run(settings.bind_addr).await;
}
