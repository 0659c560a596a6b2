//! List the sign table.

use super::print_json;
use clap::Args;
use zodiac_consult::load_table;
use zodiac_core::{AppConfig, AppResult};

/// List signs and their date ranges
#[derive(Args, Debug)]
pub struct SignsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SignsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let table = load_table(config)?;

        if self.json {
            let rows: Vec<_> = table
                .ranges()
                .iter()
                .map(|range| {
                    serde_json::json!({
                        "zodiac": range.category,
                        "dateBegin": range.start.to_string(),
                        "dateEnd": range.end.to_string(),
                    })
                })
                .collect();
            return print_json(&rows);
        }

        let width = table
            .ranges()
            .iter()
            .map(|r| r.category.len())
            .max()
            .unwrap_or(0);
        for range in table.ranges() {
            println!(
                "{:<width$}  {} - {}",
                range.category,
                range.start,
                range.end,
                width = width
            );
        }
        Ok(())
    }
}
