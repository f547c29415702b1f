//! Bounded per-session conversation history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dc_llm::Role;

/// Default cap on remembered exchanges per session.
pub const DEFAULT_MAX_TURNS: usize = 5;

/// One remembered message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Sliding window of recent turns, keyed by session id.
///
/// Each session holds at most `2 * max_turns` messages (a turn is a
/// user/assistant pair); the oldest are dropped first. Not synchronized;
/// callers that share one across tasks put it behind a lock.
#[derive(Debug)]
pub struct ConversationMemory {
    max_turns: usize,
    sessions: HashMap<String, Vec<ConversationTurn>>,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns,
            sessions: HashMap::new(),
        }
    }

    /// Append a message to `session_id`, evicting beyond the cap.
    pub fn record(&mut self, session_id: &str, role: Role, content: impl Into<String>) {
        let turns = self.sessions.entry(session_id.to_string()).or_default();
        turns.push(ConversationTurn {
            role,
            content: content.into(),
        });

        let cap = self.max_turns * 2;
        if turns.len() > cap {
            let excess = turns.len() - cap;
            turns.drain(..excess);
        }
    }

    /// Messages for a session, oldest first. Unknown sessions are empty.
    pub fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.sessions.get(session_id).cloned().unwrap_or_default()
    }

    /// Forget one session.
    pub fn clear(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Number of sessions currently held.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}
