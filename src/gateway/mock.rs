//! Deterministic translator for tests and dry runs
//!
//! Translates `text` into `"{code}:{text}"`. Individual language codes can be
//! made to fail, and each call can be held back for a configurable number of
//! scheduler turns so that completion order differs from issue order.

use crate::gateway::{GatewayError, GatewayResult, Translator};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Echoing translator with scripted failures and delays
#[derive(Debug, Default)]
pub struct MockTranslator {
    failing_codes: HashSet<String>,
    failing_texts: HashSet<String>,
    /// Yields before answering, keyed by `(text, code)`
    delays: HashMap<(String, String), usize>,
    calls: AtomicUsize,
    completions: Mutex<Vec<(String, String)>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request for `code` fails
    pub fn failing_code(mut self, code: &str) -> Self {
        self.failing_codes.insert(code.to_string());
        self
    }

    /// Every request for `text` fails
    pub fn failing_text(mut self, text: &str) -> Self {
        self.failing_texts.insert(text.to_string());
        self
    }

    /// Holds the `(text, code)` request back for `turns` scheduler yields
    pub fn delay(mut self, text: &str, code: &str, turns: usize) -> Self {
        self.delays
            .insert((text.to_string(), code.to_string()), turns);
        self
    }

    /// Number of translate calls made
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(text, code)` pairs in the order they completed
    pub fn completion_order(&self) -> Vec<(String, String)> {
        self.completions
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_code: &str) -> GatewayResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let turns = self
            .delays
            .get(&(text.to_string(), target_code.to_string()))
            .copied()
            .unwrap_or(0);
        for _ in 0..turns {
            tokio::task::yield_now().await;
        }

        if let Ok(mut completions) = self.completions.lock() {
            completions.push((text.to_string(), target_code.to_string()));
        }

        if self.failing_codes.contains(target_code) || self.failing_texts.contains(text) {
            return Err(GatewayError::Network(format!(
                "mock failure for '{}' -> {}",
                text, target_code
            )));
        }

        Ok(format!("{}:{}", target_code, text))
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
