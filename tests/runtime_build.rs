use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use scheduleBot::config::Settings;
use scheduleBot::error::GenerationServiceError;
use scheduleBot::runtime::build_assistant_with;
use scheduleBot::service::generation_service::TextGenerator;

#[derive(Default)]
struct EchoGenerator {
    models: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationServiceError> {
        self.models.lock().unwrap().push(model.to_string());
        Ok(prompt.to_string())
    }
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("schedulebot_{}_{}", name, uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}

fn settings(values: &[(&str, String)]) -> Settings {
    let values: HashMap<String, String> = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Settings::from_props(|k| values.get(k).cloned()).unwrap()
}

#[tokio::test]
async fn configured_model_template_and_timezone_are_used() {
    let schedule = temp_file(
        "schedule.json",
        r#"[{"day": "Wednesday", "subject": "Databases", "start_time": "13:00", "end_time": "14:30", "room": "Lab 3"}]"#,
    );
    let template = temp_file("prompt.hbs", "{{day}}|{{full_date}}|{{calendar_events}}");
    let settings = settings(&[
        ("SCHEDULE_FILE", schedule.display().to_string()),
        ("PROMPT_TEMPLATE_FILE", template.display().to_string()),
        ("OLLAMA_MODEL", "mistral".to_string()),
        ("TIMEZONE", "America/New_York".to_string()),
    ]);
    let generator = Arc::new(EchoGenerator::default());

    let assistant = build_assistant_with(&settings, generator.clone()).unwrap();
    // Thursday in UTC, still Wednesday evening in New York.
    let now = Utc.with_ymd_and_hms(2025, 3, 6, 2, 0, 0).unwrap();
    let answer = assistant.ask_at("what's left today?", now).await.unwrap();

    std::fs::remove_file(&schedule).ok();
    std::fs::remove_file(&template).ok();

    assert_eq!(
        answer.answer,
        "Wednesday|March 05, 2025|- **Databases** from *13:00* to *14:30* in `Lab 3`"
    );
    assert_eq!(*generator.models.lock().unwrap(), vec!["mistral".to_string()]);
}

#[test]
fn missing_schedule_is_fatal() {
    let missing = std::env::temp_dir().join(format!("schedulebot_missing_{}.json", uuid::Uuid::new_v4()));
    let settings = settings(&[("SCHEDULE_FILE", missing.display().to_string())]);

    let err = build_assistant_with(&settings, Arc::new(EchoGenerator::default()))
        .err()
        .expect("missing schedule must fail");
    assert!(format!("{err:#}").contains("Unable to load the class schedule"));
}

#[test]
fn broken_template_is_fatal() {
    let schedule = temp_file("schedule.json", "[]");
    let template = temp_file("prompt.hbs", "{{#each}}");
    let settings = settings(&[
        ("SCHEDULE_FILE", schedule.display().to_string()),
        ("PROMPT_TEMPLATE_FILE", template.display().to_string()),
    ]);

    let result = build_assistant_with(&settings, Arc::new(EchoGenerator::default()));
    std::fs::remove_file(&schedule).ok();
    std::fs::remove_file(&template).ok();

    let err = result.err().expect("broken template must fail");
    assert!(format!("{err:#}").contains("Unable to load the prompt template"));
}

#[tokio::test]
async fn builtin_template_is_used_without_a_template_file() {
    let schedule = temp_file(
        "schedule.json",
        r#"[{"day": "Friday", "subject": "Software Engineering", "start_time": "9:00", "end_time": "12:00", "room": "Lab 1"}]"#,
    );
    let settings = settings(&[("SCHEDULE_FILE", schedule.display().to_string())]);

    let assistant = build_assistant_with(&settings, Arc::new(EchoGenerator::default())).unwrap();
    let answer = assistant.ask("friday?").await.unwrap();
    std::fs::remove_file(&schedule).ok();

    assert!(answer.answer.contains("You are a calendar assistant."));
    assert!(answer.answer.contains("Schedule for Friday:\n- **Software Engineering**"));
}
