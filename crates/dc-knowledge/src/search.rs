//! Retrieval abstraction over the knowledge base.

use async_trait::async_trait;

use crate::base::KnowledgeBase;

/// Retrieval backend behind the quick-fix branch.
///
/// Implementations return labeled solution blocks (`### KEY\n...`) most
/// relevant to the query, at most `limit`, in backend order. An empty vec
/// means nothing matched; what to do about that is the caller's call.
#[async_trait]
pub trait KnowledgeSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Vec<String>;

    /// Short backend label for logs.
    fn backend(&self) -> &str;
}

/// Keyword-matching search over an in-memory [`KnowledgeBase`].
pub struct KeywordSearch {
    base: KnowledgeBase,
}

impl KeywordSearch {
    pub fn new(base: KnowledgeBase) -> Self {
        Self { base }
    }

    /// Search over the builtin IT support table.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin())
    }
}

#[async_trait]
impl KnowledgeSearch for KeywordSearch {
    async fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let blocks = self.base.lookup(query, limit);
        tracing::debug!(matches = blocks.len(), limit, "knowledge base lookup");
        blocks
    }

    fn backend(&self) -> &str {
        "keyword"
    }
}
