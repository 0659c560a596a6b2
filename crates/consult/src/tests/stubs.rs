//! Recording stand-ins for the document index and the answer generator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use zodiac_core::{AppError, AppResult};
use zodiac_knowledge::DocumentIndex;
use zodiac_llm::AnswerGenerator;

/// Returns fixed passages and records every search.
pub struct RecordingIndex {
    ready: AtomicBool,
    pub passages: Vec<String>,
    pub fail_with: Option<String>,
    pub searches: Mutex<Vec<(String, usize)>>,
}

impl RecordingIndex {
    pub fn ready_with(passages: &[&str]) -> Self {
        Self {
            ready: AtomicBool::new(true),
            passages: passages.iter().map(|p| p.to_string()).collect(),
            fail_with: None,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn not_ready() -> Self {
        let index = Self::ready_with(&[]);
        index.set_ready(false);
        index
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::ready_with(&[])
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn searches(&self) -> Vec<(String, usize)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentIndex for RecordingIndex {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn search(&self, query: &str, k: usize) -> AppResult<Vec<String>> {
        self.searches.lock().unwrap().push((query.to_string(), k));
        if let Some(message) = &self.fail_with {
            return Err(AppError::IndexUnavailable(message.clone()));
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// Replies with scripted answers in order and records every prompt.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<AppResult<String>>>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, context: &[String]) -> AppResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), context.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Generation("no scripted reply left".to_string())))
    }
}
