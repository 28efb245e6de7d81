use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tokio::time::Duration;

use crate::cache::BondRecord;
use crate::config::HttpTransportConfig;
use crate::error::{AppError, Context, Result};

use super::BondTransport;

/// Posts the ISIN list to `{base_url}/bonds/{date}` and decodes the JSON array it gets back.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(config: &HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: build_headers(&config.headers)?,
        })
    }

    pub fn endpoint(&self, date: &str) -> String {
        format!("{}/bonds/{}", self.base_url, date)
    }
}

#[async_trait]
impl BondTransport for HttpTransport {
    async fn fetch(&self, date: &str, isins: &[String]) -> Result<Vec<BondRecord>> {
        let url = self.endpoint(date);
        debug!("POST {} with {} isin(s)", url, isins.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(isins)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::transport(format!(
                "Request for bonds on {} failed with status {}",
                date,
                response.status()
            )));
        }

        let text = response.text().await?;
        let bonds: Vec<BondRecord> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to decode bonds response for {}", date))?;
        Ok(bonds)
    }
}

fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    headers
        .iter()
        .map(|(raw_name, raw_value)| {
            let name = HeaderName::from_bytes(raw_name.as_bytes())
                .with_context(|| format!("Invalid header name: {raw_name}"))?;
            let value = HeaderValue::from_str(raw_value)
                .with_context(|| format!("Invalid header value for {raw_name}"))?;
            Ok::<_, AppError>((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> HttpTransportConfig {
        HttpTransportConfig {
            base_url: base_url.to_string(),
            headers: HashMap::from([("X-Client".to_string(), "bond-cache".to_string())]),
            timeout_secs: 5,
        }
    }

    fn isins(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn builds_endpoint_without_double_slash() {
        let transport = HttpTransport::new(&config("http://localhost:8080/")).unwrap();
        assert_eq!(
            transport.endpoint("20180120"),
            "http://localhost:8080/bonds/20180120"
        );
    }

    #[test]
    fn rejects_invalid_header_name() {
        let mut cfg = config("http://localhost:8080");
        cfg.headers
            .insert("bad header".to_string(), "value".to_string());

        let err = HttpTransport::new(&cfg).err().expect("construction should fail");
        assert!(
            err.to_string().contains("Invalid header name"),
            "unexpected error message: {err}"
        );
    }

    #[tokio::test]
    async fn posts_isins_to_the_dated_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bonds/20180120"))
            .and(header("X-Client", "bond-cache"))
            .and(body_json(json!(["XS0971721963", "RU000A0JU4L3"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "isin": "XS0971721963", "data": { "prop": 12.5 } },
                { "isin": "RU000A0JU4L3", "data": {} }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri())).unwrap();
        let bonds = transport
            .fetch("20180120", &isins(&["XS0971721963", "RU000A0JU4L3"]))
            .await
            .expect("fetch succeeds");

        assert_eq!(bonds.len(), 2);
        assert_eq!(bonds[0].isin, "XS0971721963");
        assert_eq!(bonds[0].data["prop"], json!(12.5));
        assert!(bonds[1].data.is_empty());
    }

    #[tokio::test]
    async fn server_error_maps_to_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bonds/20180120"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri())).unwrap();
        let err = transport
            .fetch("20180120", &isins(&["XS0971721963"]))
            .await
            .expect_err("fetch should fail");

        assert!(matches!(err, AppError::Transport(_)), "unexpected error: {err}");
        assert!(err.to_string().contains("500"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn malformed_body_fails_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bonds/20180120"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "isin": "XS0971721963" }])),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&config(&server.uri())).unwrap();
        let err = transport
            .fetch("20180120", &isins(&["XS0971721963"]))
            .await
            .expect_err("decoding should fail");

        assert!(
            err.to_string().contains("Failed to decode bonds response"),
            "unexpected error message: {err}"
        );
    }
}
