//! One-shot consultation: register, ask once, print the answer.

use super::{parse_birth_date, print_answer, print_welcome};
use chrono::NaiveDate;
use clap::Args;
use zodiac_consult::service_from_config;
use zodiac_core::{AppConfig, AppError, AppResult};

/// Ask one question for a birth date
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Vec<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_birth_date)]
    pub birth_date: NaiveDate,

    /// Name used in the greeting
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let question = self.question.join(" ");
        if question.trim().is_empty() {
            return Err(AppError::Config("question is required".to_string()));
        }

        let mut service = service_from_config(config).await?;
        let profile = service.register_user(self.birth_date, self.name.clone())?;
        if !self.json {
            print_welcome(&profile, false)?;
        }

        let answer = service.ask_question(&question).await?;
        print_answer(&answer, self.json)
    }
}
