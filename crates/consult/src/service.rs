//! Registration and question answering for the single active user.

use crate::classifier::CategoryClassifier;
use crate::orchestrator::ConsultationOrchestrator;
use crate::session::SessionState;
use crate::types::{ConsultationAnswer, UserProfile};
use chrono::NaiveDate;
use tracing::info;
use zodiac_core::AppResult;

/// Classifier, orchestrator and session wired together.
pub struct ConsultationService {
    classifier: CategoryClassifier,
    orchestrator: ConsultationOrchestrator,
    session: SessionState,
}

impl ConsultationService {
    pub fn new(
        classifier: CategoryClassifier,
        orchestrator: ConsultationOrchestrator,
        session: SessionState,
    ) -> Self {
        Self {
            classifier,
            orchestrator,
            session,
        }
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    pub fn orchestrator(&self) -> &ConsultationOrchestrator {
        &self.orchestrator
    }

    /// Classify the birth date, scope retrieval to the sign and store the
    /// profile. On failure the previous registration stays in place.
    pub fn register_user(
        &mut self,
        birth_date: NaiveDate,
        name: Option<String>,
    ) -> AppResult<UserProfile> {
        let category = self.classifier.classify_date(birth_date)?.to_string();
        self.orchestrator.bind(&category)?;

        let profile = UserProfile::new(birth_date, category, name);
        self.session.register(profile.clone());

        info!("Registered user born {} as {}", birth_date, profile.category);
        Ok(profile)
    }

    /// Answer a question for the registered user.
    pub async fn ask_question(&self, question: &str) -> AppResult<ConsultationAnswer> {
        let profile = self.session.current()?;
        info!("Consultation question for {}", profile.category);
        self.orchestrator.answer(question).await
    }

    pub fn user_info(&self) -> Option<UserProfile> {
        self.session.current().ok()
    }
}
