use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transport::mock::DEFAULT_MOCK_DELAY_MS;

pub mod loader;
pub mod validator;

pub use loader::{expand_env_vars, parse_config};
pub use validator::validate_config;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    pub base_url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_mock_delay_ms() -> u64 {
    DEFAULT_MOCK_DELAY_MS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
    Mock {
        #[serde(default = "default_mock_delay_ms")]
        delay_ms: u64,
    },
    Http(HttpTransportConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub transport: TransportConfig,
}

impl Config {
    /// Defaults used when no configuration file is supplied.
    pub fn builtin() -> Self {
        Config {
            transport: TransportConfig::Mock {
                delay_ms: DEFAULT_MOCK_DELAY_MS,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
