use std::time::Duration;

use reqwest::Client;

use super::{DeliveryError, DeliveryReport, DeliverySink};
use crate::config::RunConfiguration;

/// POSTs the document to the remote import endpoint with HTTP Basic auth.
///
/// Exactly one request per delivery; no retries. A non-2xx answer is logged
/// and, unless `fail_on_error_status` is set, still counts as delivered.
pub struct HttpSink {
    client: Client,
    url: String,
    login: String,
    password: String,
    fail_on_error_status: bool,
}

impl HttpSink {
    pub fn new(
        url: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
            login: login.into(),
            password: password.into(),
            fail_on_error_status: false,
        })
    }

    pub fn from_config(config: &RunConfiguration) -> Result<Self, DeliveryError> {
        Ok(Self::new(
            config.request_url.clone(),
            config.login.clone(),
            config.password.clone(),
            config.request_timeout(),
        )?
        .fail_on_error_status(config.fail_on_http_error))
    }

    pub fn fail_on_error_status(mut self, fail: bool) -> Self {
        self.fail_on_error_status = fail;
        self
    }
}

#[async_trait::async_trait]
impl DeliverySink for HttpSink {
    fn describe(&self) -> String {
        format!("POST {}", self.url)
    }

    async fn deliver(&self, payload: &[u8]) -> Result<DeliveryReport, DeliveryError> {
        tracing::info!(url = %self.url, bytes = payload.len(), "sending request to remote");

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.login, Some(&self.password))
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|source| DeliveryError::Network {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        tracing::info!(status = %status, "request sent");

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                url = %self.url,
                "remote answered with a non-success status"
            );
            if self.fail_on_error_status {
                return Err(DeliveryError::RejectedStatus {
                    url: self.url.clone(),
                    status: status.as_u16(),
                });
            }
        }

        Ok(DeliveryReport::Posted {
            status: status.as_u16(),
        })
    }
}
