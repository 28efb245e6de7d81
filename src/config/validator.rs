use crate::error::{AppError, Result};

use super::{Config, HttpTransportConfig, TransportConfig};

/// Validate a configuration and surface every problem in one message.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    match &config.transport {
        TransportConfig::Mock { .. } => {}
        TransportConfig::Http(http) => validate_http(http, &mut issues),
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_http(http: &HttpTransportConfig, issues: &mut Vec<String>) {
    let base_url = http.base_url.trim();
    if base_url.is_empty() {
        issues.push("transport.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        issues.push(format!(
            "transport.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if http.timeout_secs == 0 {
        issues.push("transport.timeout_secs must be greater than zero".to_string());
    }
}
