use std::{fs, path::Path};

use crate::error::{AppError, Context, Result};

use super::{validator, Config, TransportConfig};

impl Config {
    /// Read, expand, and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        parse_config(&json)
            .with_context(|| format!("failed to load config JSON at {}", path.display()))
            .map_err(AppError::from)
    }
}

/// Parse configuration text, resolving `${VAR}` placeholders in HTTP header values.
pub fn parse_config(json: &str) -> Result<Config> {
    let mut config: Config = serde_json::from_str(json)?;

    if let TransportConfig::Http(http) = &mut config.transport {
        for value in http.headers.values_mut() {
            *value = expand_env_vars(value)?;
        }
    }

    validator::validate_config(&config)?;
    Ok(config)
}

/// Replace each `${NAME}` in a header value with the environment variable `NAME`.
pub fn expand_env_vars(value: &str) -> Result<String> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        expanded.push_str(&rest[..open]);
        let tail = &rest[open + 2..];
        let close = tail.find('}').ok_or_else(|| {
            AppError::message(format!("unterminated `${{` placeholder in `{value}`"))
        })?;

        let name = &tail[..close];
        if name.is_empty() {
            return Err(AppError::message(format!(
                "empty `${{}}` placeholder in `{value}`"
            )));
        }
        let resolved = std::env::var(name)
            .with_context(|| format!("header placeholder `{name}` names an unset variable"))?;
        expanded.push_str(&resolved);
        rest = &tail[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}
