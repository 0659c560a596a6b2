//! Classify a birth date without loading the reference document.

use super::{parse_birth_date, print_json};
use chrono::NaiveDate;
use clap::Args;
use zodiac_consult::classifier_from_config;
use zodiac_core::{AppConfig, AppResult};

/// Show the sign for a birth date
#[derive(Args, Debug)]
pub struct SignCommand {
    /// Birth date (YYYY-MM-DD)
    #[arg(value_parser = parse_birth_date)]
    pub date: NaiveDate,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SignCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let classifier = classifier_from_config(config)?;
        let category = classifier.classify_date(self.date)?;

        if self.json {
            print_json(&serde_json::json!({
                "birthDate": self.date.format("%Y-%m-%d").to_string(),
                "zodiacSign": category,
            }))
        } else {
            println!("{}", category);
            Ok(())
        }
    }
}
