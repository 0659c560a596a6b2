//! Command handlers for the zodiac CLI.

pub mod ask;
pub mod consult;
pub mod sign;
pub mod signs;

pub use ask::AskCommand;
pub use consult::ConsultCommand;
pub use sign::SignCommand;
pub use signs::SignsCommand;

use chrono::NaiveDate;
use zodiac_consult::{ConsultationAnswer, UserProfile};
use zodiac_core::AppResult;

/// clap value parser for `YYYY-MM-DD` dates.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD", value))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_welcome(profile: &UserProfile, json: bool) -> AppResult<()> {
    if json {
        return print_json(&serde_json::json!({
            "message": profile.welcome_message(),
            "zodiacSign": profile.category,
            "birthDate": profile.birth_date.format("%Y-%m-%d").to_string(),
        }));
    }

    println!("{}", profile.welcome_message());
    println!("Your sign: {}", profile.category);
    Ok(())
}

pub fn print_answer(answer: &ConsultationAnswer, json: bool) -> AppResult<()> {
    if json {
        return print_json(answer);
    }

    println!("\n{}\n", answer.answer_text.trim());
    tracing::debug!("Answer drew on {} excerpts", answer.source_excerpts.len());
    Ok(())
}
