//! Keyword-matched knowledge base.

use std::path::Path;

use serde::Deserialize;

use crate::error::{KnowledgeError, KnowledgeResult};

/// Context line handed to the model when no entry matches a question.
pub const GENERAL_GUIDANCE: &str = "No specific KB entry found - provide general guidance.";

/// One knowledge base entry: trigger keywords plus the canned solution.
#[derive(Debug, Clone, Deserialize)]
pub struct KbEntry {
    pub keywords: Vec<String>,
    pub solution: String,
}

/// In-memory knowledge base with deterministic entry order.
///
/// Matching is case-folded substring search of each keyword against the
/// question. `lookup` returns blocks in table order, so the builtin table
/// (or the loaded file) fully determines the output for a given question.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, KbEntry)>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an entry under `key`, folding its keywords to lowercase.
    /// Replaces an existing entry with the same key, keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, mut entry: KbEntry) {
        let key = key.into();
        for kw in &mut entry.keywords {
            *kw = kw.to_lowercase();
        }
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = entry;
        } else {
            self.entries.push((key, entry));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labeled solution blocks (`### KEY\n<solution>`) for entries whose
    /// keywords appear in `question`, in table order, capped at `limit`.
    pub fn lookup(&self, question: &str, limit: usize) -> Vec<String> {
        let folded = question.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, entry)| {
                entry
                    .keywords
                    .iter()
                    .any(|kw| folded.contains(kw.as_str()))
            })
            .take(limit)
            .map(|(key, entry)| format!("### {}\n{}", key.to_uppercase(), entry.solution))
            .collect()
    }

    /// The builtin IT support table: the four issue families the desk
    /// sees most, with their canned fixes.
    pub fn builtin() -> Self {
        let mut base = Self::new();
        base.insert(
            "password_reset",
            KbEntry {
                keywords: vec![
                    "password".into(),
                    "reset".into(),
                    "locked".into(),
                    "can't login".into(),
                ],
                solution: "Go to https://passwordreset.microsoftonline.com\n\
                           1. Enter work email\n\
                           2. Complete verification\n\
                           3. Create new password (12+ chars, mixed case, numbers, special chars)"
                    .into(),
            },
        );
        base.insert(
            "vpn_issues",
            KbEntry {
                keywords: vec!["vpn".into(), "remote".into(), "connection".into()],
                solution: "VPN Troubleshooting:\n\
                           1. Check internet connection\n\
                           2. Restart VPN client\n\
                           3. Clear credentials and re-enter\n\
                           4. Run: ipconfig /flushdns (Windows) or sudo dscacheutil -flushcache (Mac)"
                    .into(),
            },
        );
        base.insert(
            "teams_audio",
            KbEntry {
                keywords: vec![
                    "teams".into(),
                    "audio".into(),
                    "microphone".into(),
                    "can't hear".into(),
                ],
                solution: "Teams Audio Fix:\n\
                           1. Settings → Devices → Test audio\n\
                           2. Check correct device selected\n\
                           3. Windows Settings → Privacy → Allow microphone access\n\
                           4. Clear cache: %appdata%\\Microsoft\\Teams\\Cache"
                    .into(),
            },
        );
        base.insert(
            "slow_computer",
            KbEntry {
                keywords: vec!["slow".into(), "performance".into(), "freezing".into()],
                solution: "Performance Fix:\n\
                           1. Restart computer\n\
                           2. Check Windows Updates\n\
                           3. Run Disk Cleanup (cleanmgr)\n\
                           4. Task Manager → Disable startup programs"
                    .into(),
            },
        );
        base
    }

    /// Load a knowledge base from TOML text (array-of-tables `[[entry]]`
    /// format, which preserves file order).
    pub fn from_toml_str(text: &str) -> KnowledgeResult<Self> {
        let file: KbFile =
            toml::from_str(text).map_err(|e| KnowledgeError::Parse(e.to_string()))?;
        let mut base = Self::new();
        for entry in file.entries {
            base.insert(
                entry.category,
                KbEntry {
                    keywords: entry.keywords,
                    solution: entry.solution,
                },
            );
        }
        Ok(base)
    }

    /// Load a knowledge base from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> KnowledgeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| KnowledgeError::Io(e.to_string()))?;
        Self::from_toml_str(&text)
    }
}

#[derive(Debug, Deserialize)]
struct KbFile {
    #[serde(default, rename = "entry")]
    entries: Vec<KbFileEntry>,
}

#[derive(Debug, Deserialize)]
struct KbFileEntry {
    category: String,
    keywords: Vec<String>,
    solution: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_entries() {
        let base = KnowledgeBase::builtin();
        assert_eq!(base.len(), 4);
    }

    #[test]
    fn lookup_matches_are_case_folded() {
        let base = KnowledgeBase::builtin();
        for question in ["VPN won't connect", "vpn won't connect", "Vpn broken"] {
            let blocks = base.lookup(question, 2);
            assert_eq!(blocks.len(), 1, "question: {question}");
            assert!(blocks[0].starts_with("### VPN_ISSUES\n"));
        }
    }

    #[test]
    fn lookup_block_contains_solution_text() {
        let base = KnowledgeBase::builtin();
        let blocks = base.lookup("my password expired", 2);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("passwordreset.microsoftonline.com"));
    }

    #[test]
    fn lookup_caps_at_limit_in_table_order() {
        let base = KnowledgeBase::builtin();
        // Hits password_reset ("password"), vpn_issues ("vpn") and
        // teams_audio ("teams"); only the first two survive the cap.
        let blocks = base.lookup("password problems over vpn when joining teams", 2);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("### PASSWORD_RESET\n"));
        assert!(blocks[1].starts_with("### VPN_ISSUES\n"));
    }

    #[test]
    fn lookup_no_match_returns_empty() {
        let base = KnowledgeBase::builtin();
        assert!(base.lookup("my standing desk is stuck", 2).is_empty());
    }

    #[test]
    fn multi_word_keywords_match_as_substrings() {
        let base = KnowledgeBase::builtin();
        let blocks = base.lookup("I can't login to anything", 2);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("### PASSWORD_RESET\n"));
    }

    #[test]
    fn insert_folds_keywords() {
        let mut base = KnowledgeBase::new();
        base.insert(
            "printer",
            KbEntry {
                keywords: vec!["PRINTER".into()],
                solution: "Power cycle the printer.".into(),
            },
        );
        assert_eq!(base.lookup("the printer is jammed", 2).len(), 1);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut base = KnowledgeBase::builtin();
        base.insert(
            "password_reset",
            KbEntry {
                keywords: vec!["password".into()],
                solution: "Use the new self-service portal.".into(),
            },
        );
        assert_eq!(base.len(), 4);
        let blocks = base.lookup("password help", 2);
        assert!(blocks[0].contains("self-service portal"));
    }

    #[test]
    fn from_toml_preserves_file_order() {
        let text = r#"
            [[entry]]
            category = "wifi"
            keywords = ["wifi", "wireless"]
            solution = "Toggle airplane mode off and on."

            [[entry]]
            category = "badge"
            keywords = ["badge", "door"]
            solution = "Visit the security desk on floor 1."
        "#;
        let base = KnowledgeBase::from_toml_str(text).unwrap();
        assert_eq!(base.len(), 2);
        let blocks = base.lookup("wifi badge trouble", 2);
        assert!(blocks[0].starts_with("### WIFI\n"));
        assert!(blocks[1].starts_with("### BADGE\n"));
    }

    #[test]
    fn from_toml_rejects_missing_solution() {
        let text = r#"
            [[entry]]
            category = "wifi"
            keywords = ["wifi"]
        "#;
        assert!(matches!(
            KnowledgeBase::from_toml_str(text),
            Err(KnowledgeError::Parse(_))
        ));
    }

    #[test]
    fn from_toml_empty_file_is_empty_base() {
        let base = KnowledgeBase::from_toml_str("").unwrap();
        assert!(base.is_empty());
    }
}
