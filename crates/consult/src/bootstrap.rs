//! Build the consultation service from configuration.

use crate::classifier::CategoryClassifier;
use crate::orchestrator::{ConsultPrompts, ConsultationOrchestrator};
use crate::ranges::DateRangeTable;
use crate::service::ConsultationService;
use crate::session::SessionState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use zodiac_core::{AppConfig, AppResult};
use zodiac_knowledge::{create_provider, ChunkingConfig, EmbeddedDocumentIndex};
use zodiac_llm::{create_client, GenerationSettings, LlmAnswerGenerator};

/// Sign table from `signs.table` when configured, else the built-in one.
pub fn load_table(config: &AppConfig) -> AppResult<DateRangeTable> {
    match config.signs_table_path() {
        Some(path) => DateRangeTable::from_csv_path(&path),
        None => DateRangeTable::standard(),
    }
}

pub fn classifier_from_config(config: &AppConfig) -> AppResult<CategoryClassifier> {
    Ok(CategoryClassifier::new(load_table(config)?))
}

/// Ingest the reference document and wire every collaborator.
pub async fn service_from_config(config: &AppConfig) -> AppResult<ConsultationService> {
    config.validate()?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let classifier = classifier_from_config(config)?;

    let embeddings = create_provider(&config.knowledge.embedding, Some(timeout))?;
    let mut index = EmbeddedDocumentIndex::new(embeddings);
    let chunking = ChunkingConfig {
        chunk_size: config.knowledge.chunk_size,
        chunk_overlap: config.knowledge.chunk_overlap,
    };
    index
        .ingest_file(&config.document_path(), &chunking)
        .await?;

    let client = create_client(&config.provider, config.endpoint.as_deref(), Some(timeout))?;
    let generator = LlmAnswerGenerator::new(
        client,
        GenerationSettings {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        },
    );

    let prompts = ConsultPrompts::load(&config.workspace)?;
    let orchestrator =
        ConsultationOrchestrator::new(Arc::new(index), Arc::new(generator), prompts);

    info!(
        "System ready (provider: {}, model: {})",
        config.provider, config.model
    );

    Ok(ConsultationService::new(
        classifier,
        orchestrator,
        SessionState::new(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(workspace: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.workspace = workspace.to_path_buf();
        config
    }

    #[test]
    fn test_builtin_table_by_default() {
        let temp = TempDir::new().unwrap();
        let classifier = classifier_from_config(&config_in(temp.path())).unwrap();
        assert_eq!(classifier.classify(7, 23).unwrap(), "Leo");
    }

    #[test]
    fn test_csv_table_from_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("signs.csv"),
            "Date begin,Date End,Zodiac\n\
             Mar 21,Apr 19,Ram\n\
             Apr 20,May 20,Bull\n\
             May 21,Jun 20,Twins\n\
             Jun 21,Jul 22,Crab\n\
             Jul 23,Aug 22,Lion\n\
             Aug 23,Sep 22,Maiden\n\
             Sep 23,Oct 22,Scales\n\
             Oct 23,Nov 21,Scorpion\n\
             Nov 22,Dec 21,Archer\n\
             Dec 22,Jan 19,Sea-Goat\n\
             Jan 20,Feb 18,Water-Bearer\n\
             Feb 19,Mar 20,Fish\n",
        )
        .unwrap();

        let mut config = config_in(temp.path());
        config.signs_table = Some("signs.csv".into());

        let classifier = classifier_from_config(&config).unwrap();
        assert_eq!(classifier.classify(12, 25).unwrap(), "Sea-Goat");
        assert_eq!(classifier.classify(7, 23).unwrap(), "Lion");
        assert_eq!(classifier.classify(2, 29).unwrap(), "Fish");
    }

    #[test]
    fn test_csv_table_with_too_few_rows_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("signs.csv"),
            "Date begin,Date End,Zodiac\n\
             Jan 1,Jun 30,First Half\n\
             Jul 1,Dec 31,Second Half\n",
        )
        .unwrap();

        let mut config = config_in(temp.path());
        config.signs_table = Some("signs.csv".into());

        let result = classifier_from_config(&config);
        assert!(matches!(result, Err(zodiac_core::AppError::RangeCount(2))));
    }

    #[tokio::test]
    async fn test_missing_document_fails_startup() {
        let temp = TempDir::new().unwrap();
        let result = service_from_config(&config_in(temp.path())).await;
        assert!(result.is_err());
    }
}
