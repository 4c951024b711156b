//! Database configuration.

use serde::{Deserialize, Serialize};

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Prefix shared by every table of the learning platform schema.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Whether the configured table prefix is safe to splice into SQL text.
    ///
    /// Table names cannot be bound as parameters, so the prefix is restricted
    /// to ASCII alphanumerics and underscores.
    pub fn has_valid_prefix(&self) -> bool {
        self.table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

fn default_table_prefix() -> String {
    "mdl_".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
