//! Birth date to sign classification.

use crate::ranges::{DateRangeTable, MonthDay};
use chrono::{Datelike, NaiveDate};
use zodiac_core::{AppError, AppResult};

/// Maps calendar dates to categories. Pure, no I/O after construction.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    table: DateRangeTable,
}

impl CategoryClassifier {
    pub fn new(table: DateRangeTable) -> Self {
        Self { table }
    }

    /// Classifier over the built-in table.
    pub fn standard() -> AppResult<Self> {
        Ok(Self::new(DateRangeTable::standard()?))
    }

    pub fn table(&self) -> &DateRangeTable {
        &self.table
    }

    /// Category for a month (1-12) and day of month. Feb 29 is accepted.
    pub fn classify(&self, month: u32, day: u32) -> AppResult<&str> {
        let date = MonthDay::new(month, day)?;

        self.table
            .find(date)
            .map(|range| range.category.as_str())
            .ok_or(AppError::UnresolvedCategory { month, day })
    }

    pub fn classify_date(&self, date: NaiveDate) -> AppResult<&str> {
        self.classify(date.month(), date.day())
    }
}
