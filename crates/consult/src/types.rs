//! Consultation data model.

use chrono::NaiveDate;
use serde::Serialize;

/// The registered user. Replaced, never mutated, on re-registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub birth_date: NaiveDate,
    pub category: String,
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(birth_date: NaiveDate, category: impl Into<String>, name: Option<String>) -> Self {
        Self {
            birth_date,
            category: category.into(),
            name,
        }
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Friend")
    }

    pub fn welcome_message(&self) -> String {
        format!("Welcome {}!", self.display_name())
    }
}

/// One question, scoped to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationQuery {
    pub category: String,
    pub raw_question: String,
}

/// The answer payload for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationAnswer {
    pub answer_text: String,
    pub category: String,
    /// Retrieved passages, verbatim and in retrieval order
    pub source_excerpts: Vec<String>,
    pub original_question: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 8, 1).unwrap()
    }

    #[test]
    fn test_welcome_message() {
        let named = UserProfile::new(date(), "Leo", Some("Ana".to_string()));
        assert_eq!(named.welcome_message(), "Welcome Ana!");

        let anonymous = UserProfile::new(date(), "Leo", None);
        assert_eq!(anonymous.welcome_message(), "Welcome Friend!");

        let blank = UserProfile::new(date(), "Leo", Some("  ".to_string()));
        assert_eq!(blank.display_name(), "Friend");
    }

    #[test]
    fn test_answer_serializes_camel_case() {
        let answer = ConsultationAnswer {
            answer_text: "Shine.".to_string(),
            category: "Leo".to_string(),
            source_excerpts: vec!["Leo is a fire sign.".to_string()],
            original_question: "What now?".to_string(),
        };

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["answerText"], "Shine.");
        assert_eq!(json["sourceExcerpts"][0], "Leo is a fire sign.");
        assert_eq!(json["originalQuestion"], "What now?");
    }

    #[test]
    fn test_profile_serializes_iso_date() {
        let profile = UserProfile::new(date(), "Leo", None);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["birthDate"], "1990-08-01");
        assert!(json["name"].is_null());
    }
}
