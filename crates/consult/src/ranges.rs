//! Sign date ranges and the table that holds them.
//!
//! A range runs forward through the calendar from `start` to `end`, both
//! inclusive. When `start` comes after `end` the range wraps from December
//! into January.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::Path;
use zodiac_core::{AppError, AppResult};

/// Number of signs a table must define.
pub const CATEGORY_COUNT: usize = 12;

/// Leap year used to validate month/day pairs and walk the calendar.
pub(crate) const REFERENCE_LEAP_YEAR: i32 = 2024;

/// A day of the year, ordered month first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// A month/day pair that exists in a leap year (Feb 29 included).
    pub fn new(month: u32, day: u32) -> AppResult<Self> {
        NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, day)
            .map(|_| Self { month, day })
            .ok_or(AppError::InvalidDate { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = MONTH_ABBREVIATIONS
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        write!(f, "{} {}", name, self.day)
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Map a three-letter month abbreviation to 1..=12. Case-sensitive.
pub fn month_from_abbreviation(abbreviation: &str) -> Option<u32> {
    match abbreviation {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// Parse a boundary such as "Mar 21" or "Dec 22,".
pub fn parse_boundary(raw: &str) -> AppResult<MonthDay> {
    let malformed = || AppError::MalformedRange(raw.to_string());

    let cleaned = raw.replace(',', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let [month, day] = tokens.as_slice() else {
        return Err(malformed());
    };

    let month = month_from_abbreviation(month).ok_or_else(malformed)?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    MonthDay::new(month, day).map_err(|_| malformed())
}

/// One sign and the days it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub category: String,
    pub start: MonthDay,
    pub end: MonthDay,
}

impl DateRange {
    pub fn parse(category: &str, start: &str, end: &str) -> AppResult<Self> {
        Ok(Self {
            category: category.to_string(),
            start: parse_boundary(start)?,
            end: parse_boundary(end)?,
        })
    }

    /// Whether the range crosses the December/January boundary.
    pub fn is_wrapping(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: MonthDay) -> bool {
        if self.is_wrapping() {
            date >= self.start || date <= self.end
        } else {
            self.start <= date && date <= self.end
        }
    }
}

/// The standard tropical zodiac.
const STANDARD_ROWS: [(&str, &str, &str); CATEGORY_COUNT] = [
    ("Aries", "Mar 21", "Apr 19"),
    ("Taurus", "Apr 20", "May 20"),
    ("Gemini", "May 21", "Jun 20"),
    ("Cancer", "Jun 21", "Jul 22"),
    ("Leo", "Jul 23", "Aug 22"),
    ("Virgo", "Aug 23", "Sep 22"),
    ("Libra", "Sep 23", "Oct 22"),
    ("Scorpio", "Oct 23", "Nov 21"),
    ("Sagittarius", "Nov 22", "Dec 21"),
    ("Capricorn", "Dec 22", "Jan 19"),
    ("Aquarius", "Jan 20", "Feb 18"),
    ("Pisces", "Feb 19", "Mar 20"),
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date begin")]
    begin: String,
    #[serde(rename = "Date End")]
    end: String,
    #[serde(rename = "Zodiac")]
    zodiac: String,
}

/// Twelve ranges that partition the year, checked on construction.
#[derive(Debug, Clone)]
pub struct DateRangeTable {
    ranges: Vec<DateRange>,
}

impl DateRangeTable {
    /// The built-in twelve-sign table.
    pub fn standard() -> AppResult<Self> {
        Self::from_rows(STANDARD_ROWS)
    }

    /// Build a table from `(category, start, end)` rows.
    pub fn from_rows<I, S>(rows: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let ranges = rows
            .into_iter()
            .map(|(category, start, end)| {
                DateRange::parse(category.as_ref(), start.as_ref(), end.as_ref())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Self::from_ranges(ranges)
    }

    pub fn from_ranges(ranges: Vec<DateRange>) -> AppResult<Self> {
        if ranges.len() != CATEGORY_COUNT {
            return Err(AppError::RangeCount(ranges.len()));
        }
        let table = Self { ranges };
        table.verify_partition()?;
        Ok(table)
    }

    /// Load a CSV table with the columns `Date begin`, `Date End`, `Zodiac`.
    pub fn from_csv_path(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open sign table {:?}: {}", path, e))
        })?;
        tracing::debug!("Loading sign table from {:?}", path);
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<CsvRow>() {
            let row = record
                .map_err(|e| AppError::Config(format!("Invalid sign table row: {}", e)))?;
            rows.push((row.zodiac, row.begin, row.end));
        }

        Self::from_rows(rows)
    }

    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    /// The range containing `date`, if any.
    pub fn find(&self, date: MonthDay) -> Option<&DateRange> {
        self.ranges.iter().find(|range| range.contains(date))
    }

    /// Every day of a leap year must fall in exactly one range.
    fn verify_partition(&self) -> AppResult<()> {
        let mut day = NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, 1, 1);

        while let Some(date) = day.filter(|d| d.year() == REFERENCE_LEAP_YEAR) {
            let month_day = MonthDay {
                month: date.month(),
                day: date.day(),
            };

            let mut matching = self.ranges.iter().filter(|r| r.contains(month_day));
            match (matching.next(), matching.next()) {
                (None, _) => {
                    return Err(AppError::UnresolvedCategory {
                        month: month_day.month,
                        day: month_day.day,
                    })
                }
                (Some(first), Some(second)) => {
                    return Err(AppError::OverlappingRanges {
                        month: month_day.month,
                        day: month_day.day,
                        first: first.category.clone(),
                        second: second.category.clone(),
                    })
                }
                (Some(_), None) => {}
            }

            day = date.succ_opt();
        }

        tracing::debug!("Sign table verified: {} ranges", self.ranges.len());
        Ok(())
    }
}
