//! Zodiac consultation.
//!
//! Classifies a birth date into its sign, then answers questions for that
//! sign over the reference document:
//! - [`ranges`]: sign date ranges, including ranges that wrap the new year
//! - [`classifier`]: date to sign
//! - [`orchestrator`]: retrieval plus generation with one weak-answer retry
//! - [`session`]: the single registered user
//! - [`service`] and [`bootstrap`]: wiring for the CLI

pub mod bootstrap;
pub mod classifier;
pub mod orchestrator;
pub mod ranges;
pub mod service;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main types
pub use bootstrap::{classifier_from_config, load_table, service_from_config};
pub use classifier::CategoryClassifier;
pub use orchestrator::{
    is_weak_answer, ConsultPrompts, ConsultationOrchestrator, RetrievalScope, Scope,
    RETRIEVAL_TOP_K, WEAK_ANSWER_MIN_CHARS,
};
pub use ranges::{DateRange, DateRangeTable, MonthDay};
pub use service::ConsultationService;
pub use session::SessionState;
pub use types::{ConsultationAnswer, ConsultationQuery, UserProfile};
