use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};

use crate::error::AssistantError;
use crate::service::assistant::{Answer, Assistant};

const ABOUT: &str = "Answers questions about your weekly class schedule using a local model.";

const LONG_ABOUT: &str = "Answers questions about your weekly class schedule using a local model.

Understands which day you mean from a weekday name (\"What subject do I have on Wednesday?\"),
a month and day (\"Where is my class on July 13?\", \"What day is it on June 30?\"),
or defaults to today. Class times and rooms come only from the schedule file.";

#[derive(Parser)]
#[command(name = "scheduleBot", about = ABOUT, long_about = LONG_ABOUT)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question. Prompts for it when omitted.
    Ask {
        question: Option<String>,
        /// Print the prompt sent to the model before the answer.
        #[arg(long)]
        show_prompt: bool,
    },
    /// Keep asking questions until Esc or Ctrl-C. Questions are independent.
    Chat {},
    /// Show which day a question resolves to, without calling the model.
    Resolve { question: String },
    /// List the classes for a weekday.
    Schedule { day: String },
}

pub async fn cli(assistant: Assistant) -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Ask {
            question,
            show_prompt,
        } => {
            let question = match question {
                Some(question) => question,
                None => specify_question()?,
            };
            if show_prompt {
                match assistant.preview_prompt_at(&question, Utc::now()) {
                    Ok(prompt) => println!("{}\n---", prompt.trim()),
                    Err(AssistantError::EmptyQuestion) => {
                        println!("{}", AssistantError::EmptyQuestion);
                        return Ok(());
                    }
                    Err(err) => return Err(err).context("Failed to render prompt"),
                }
            }
            match assistant.ask(&question).await {
                Ok(answer) => print_answer(&answer),
                Err(AssistantError::EmptyQuestion) => println!("{}", AssistantError::EmptyQuestion),
                Err(err) => return Err(err).context("Failed to answer question"),
            }
        }
        Commands::Chat {} => chat(&assistant).await?,
        Commands::Resolve { question } => {
            let query = assistant.resolve_at(&question, Utc::now());
            println!("Day: {}", query.day_name());
            println!("Date: {}", query.full_date_text());
            println!("Schedule for {}:\n{}", query.day_name(), query.matching_entries);
        }
        Commands::Schedule { day } => {
            println!("{}", assistant.store().entries_for_day(&day));
        }
    }
    Ok(())
}

async fn chat(assistant: &Assistant) -> Result<()> {
    loop {
        let question = match Text::new("How can I help you?").prompt() {
            Ok(question) => question,
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        match assistant.ask(&question).await {
            Ok(answer) => print_answer(&answer),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}

fn print_answer(answer: &Answer) {
    println!("Date: {}\n", answer.headline);
    println!("{}", answer.answer);
}

fn specify_question() -> Result<String> {
    Ok(Text::new("How can I help you?").prompt()?)
}
