//! Interactive consultation loop.

use super::{parse_birth_date, print_answer, print_json, print_welcome};
use chrono::NaiveDate;
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use zodiac_consult::{service_from_config, ConsultationService};
use zodiac_core::{AppConfig, AppError, AppResult};

const HELP: &str = "Commands: /profile, /register <YYYY-MM-DD> [name], /help, /quit";

/// Start an interactive consultation
#[derive(Args, Debug)]
pub struct ConsultCommand {
    /// Birth date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_birth_date)]
    pub birth_date: NaiveDate,

    /// Name used in the greeting
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output answers as JSON
    #[arg(long)]
    pub json: bool,
}

enum Input {
    Quit,
    Help,
    Profile,
    Register(NaiveDate, Option<String>),
    Question(String),
    Empty,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    if !line.starts_with('/') {
        return Ok(Input::Question(line.to_string()));
    }

    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("/quit") | Some("/exit") => Ok(Input::Quit),
        Some("/help") => Ok(Input::Help),
        Some("/profile") => Ok(Input::Profile),
        Some("/register") => {
            let date = parts
                .next()
                .ok_or_else(|| "birth_date (YYYY-MM-DD) is required".to_string())?;
            let date = parse_birth_date(date)?;
            let name = parts.collect::<Vec<_>>().join(" ");
            Ok(Input::Register(
                date,
                Some(name).filter(|n| !n.is_empty()),
            ))
        }
        Some(other) => Err(format!("Unknown command {}. {}", other, HELP)),
        None => Ok(Input::Empty),
    }
}

impl ConsultCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut service = service_from_config(config).await?;
        let profile = service.register_user(self.birth_date, self.name.clone())?;
        print_welcome(&profile, self.json)?;
        if !self.json {
            println!("{}", HELP);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if !self.json {
                print!("> ");
                std::io::stdout().flush()?;
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match parse_input(&line) {
                Ok(Input::Quit) => break,
                Ok(Input::Empty) => continue,
                Ok(Input::Help) => println!("{}", HELP),
                Ok(Input::Profile) => self.show_profile(&service)?,
                Ok(Input::Register(date, name)) => {
                    let result = service.register_user(date, name);
                    report(result.and_then(|p| print_welcome(&p, self.json)))?;
                }
                Ok(Input::Question(question)) => {
                    let result = service.ask_question(&question).await;
                    report(result.and_then(|a| print_answer(&a, self.json)))?;
                }
                Err(message) => eprintln!("{}", message),
            }
        }

        tracing::info!("Consultation ended");
        Ok(())
    }

    fn show_profile(&self, service: &ConsultationService) -> AppResult<()> {
        match service.user_info() {
            Some(profile) if self.json => print_json(&profile),
            Some(profile) => {
                println!(
                    "{} - born {}, {}",
                    profile.display_name(),
                    profile.birth_date.format("%Y-%m-%d"),
                    profile.category
                );
                Ok(())
            }
            None => {
                eprintln!("{}", AppError::NoUserRegistered);
                Ok(())
            }
        }
    }
}

/// Print recoverable errors and keep the loop going; stop on the rest.
fn report(result: AppResult<()>) -> AppResult<()> {
    match result {
        Err(e) if e.is_recoverable() => {
            tracing::warn!("{}", e);
            eprintln!("Error: {}", e);
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_commands() {
        assert!(matches!(parse_input("  "), Ok(Input::Empty)));
        assert!(matches!(parse_input("/quit"), Ok(Input::Quit)));
        assert!(matches!(parse_input("/profile"), Ok(Input::Profile)));
        assert!(matches!(
            parse_input("Will I travel soon?"),
            Ok(Input::Question(q)) if q == "Will I travel soon?"
        ));
    }

    #[test]
    fn test_parse_register() {
        match parse_input("/register 1990-01-19 Mary Ann") {
            Ok(Input::Register(date, name)) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(1990, 1, 19).unwrap());
                assert_eq!(name.as_deref(), Some("Mary Ann"));
            }
            _ => panic!("expected register"),
        }

        assert!(matches!(
            parse_input("/register 1990-01-19"),
            Ok(Input::Register(_, None))
        ));
        assert!(parse_input("/register").is_err());
        assert!(parse_input("/register 19-01-1990").is_err());
        assert!(parse_input("/dance").is_err());
    }

    #[test]
    fn test_report_keeps_recoverable_errors() {
        assert!(report(Err(AppError::NoUserRegistered)).is_ok());
        assert!(report(Err(AppError::Generation("timeout".to_string()))).is_ok());
        assert!(report(Err(AppError::UnresolvedCategory { month: 1, day: 1 })).is_err());
    }
}
