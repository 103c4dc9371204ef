//! HTTP transport backed by reqwest

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::version::error::FetchError;
use crate::version::transport::Transport;

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str) -> Result<String, FetchError> {
        debug!("Fetching {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("{} returned status {}", endpoint, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Failed to fetch data")
                    .to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use rstest::rstest;

    #[tokio::test]
    async fn get_returns_body_on_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/owner/lib/releases")
            .match_header("user-agent", "preupver")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "2.3.0"}]"#)
            .create_async()
            .await;

        let transport = HttpTransport::default();
        let body = transport
            .get(&format!("{}/repos/owner/lib/releases", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, r#"[{"name": "2.3.0"}]"#);
    }

    #[rstest]
    #[case(404, "Not Found")]
    #[case(429, "Too Many Requests")]
    #[case(500, "Internal Server Error")]
    #[tokio::test]
    async fn get_returns_status_error_for_non_success(
        #[case] status: usize,
        #[case] reason: &str,
    ) {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/releases")
            .with_status(status)
            .with_body(r#"{"message": "nope"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::default();
        let result = transport.get(&format!("{}/releases", server.url())).await;

        mock.assert_async().await;
        match result {
            Err(FetchError::Status {
                status: got,
                reason: got_reason,
            }) => {
                assert_eq!(got as usize, status);
                assert_eq!(got_reason, reason);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_returns_network_error_when_unreachable() {
        let transport = HttpTransport::new(&HttpConfig {
            timeout_ms: 1_000,
            user_agent: "preupver".to_string(),
        });

        // Port 9 (discard) on localhost is not expected to accept HTTP
        let result = transport.get("http://127.0.0.1:9/releases").await;

        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
