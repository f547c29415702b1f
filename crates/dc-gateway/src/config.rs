//! Gateway configuration, loadable from TOML or environment.

use serde::Deserialize;

use dc_chain::DEFAULT_MAX_TURNS;
use dc_llm::LlmConfig;
use dc_tickets::QuickbaseConfig;

/// Top-level configuration for the support gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Chat-completion endpoint settings.
    pub llm: LlmConfig,
    /// Ticket store settings.
    pub quickbase: QuickbaseConfig,
    /// Optional TOML knowledge base; the builtin table when absent.
    #[serde(default)]
    pub knowledge_file: Option<String>,
    /// Conversation turns remembered per session.
    #[serde(default = "default_memory_turns")]
    pub memory_turns: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_memory_turns() -> usize {
    DEFAULT_MAX_TURNS
}

impl GatewayConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Build from environment variables (`GPT5_*`, `QB_*`,
    /// `KNOWLEDGE_FILE`). Host, port and memory size use defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: default_host(),
            port: default_port(),
            llm: LlmConfig::from_env()?,
            quickbase: QuickbaseConfig::from_env()?,
            knowledge_file: std::env::var("KNOWLEDGE_FILE").ok(),
            memory_turns: default_memory_turns(),
        })
    }
}
