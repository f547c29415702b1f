use anyhow::Context;
use serde::Deserialize;

/// QuickBase connection configuration, loadable from TOML or environment.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickbaseConfig {
    /// Realm hostname (e.g., "corp.quickbase.com").
    pub realm: String,
    /// User token for the `Authorization: QB-USER-TOKEN` header.
    pub user_token: String,
    /// Application ID the tickets table lives in.
    pub app_id: String,
    /// Table ID of the tickets table.
    pub table_id: String,
    /// REST API base URL (overridden in tests).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.quickbase.com/v1".into()
}

fn default_timeout_secs() -> u64 {
    15
}

impl QuickbaseConfig {
    /// Build from `QB_*` environment variables. All four identifiers are
    /// required; there is no sane default for any of them.
    pub fn from_env() -> anyhow::Result<Self> {
        let realm = std::env::var("QB_REALM").context("QB_REALM is not set")?;
        let user_token = std::env::var("QB_USER_TOKEN").context("QB_USER_TOKEN is not set")?;
        let app_id = std::env::var("QB_APP_ID").context("QB_APP_ID is not set")?;
        let table_id =
            std::env::var("QB_TICKETS_TABLE_ID").context("QB_TICKETS_TABLE_ID is not set")?;
        Ok(Self {
            realm,
            user_token,
            app_id,
            table_id,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        })
    }
}
