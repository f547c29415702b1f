//! Scripted search backend for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::search::KnowledgeSearch;

/// A search backend that serves a fixed result set and records queries.
pub struct StaticSearch {
    results: Vec<String>,
    /// All queries passed to `search` (for test assertions).
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    /// Backend that never matches anything.
    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }

    /// Backend that returns these blocks for every query.
    pub fn with_results(results: Vec<String>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries seen so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeSearch for StaticSearch {
    async fn search(&self, query: &str, limit: usize) -> Vec<String> {
        self.queries.lock().unwrap().push(query.to_string());
        self.results.iter().take(limit).cloned().collect()
    }

    fn backend(&self) -> &str {
        "static"
    }
}
