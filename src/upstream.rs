use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::usage::types::{Message, Report};
use crate::usage::{ReportLookup, ReportOutcome};

const MESSAGES_PATH: &str = "messages/current-period";
const REPORTS_PATH: &str = "reports";

/// Failures talking to the upstream billing API. A missing report is
/// not represented here; that is [`ReportOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("messages API returned status {0}")]
    MessagesStatus(StatusCode),

    #[error("report API returned status {status} for report {id}")]
    ReportStatus { id: u64, status: StatusCode },

    #[error("request to {endpoint} endpoint failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid payload from {endpoint} endpoint: {detail}")]
    InvalidPayload {
        endpoint: &'static str,
        detail: String,
    },
}

/// Envelope around the message listing response.
#[derive(Deserialize)]
struct MessagesEnvelope {
    messages: Vec<Message>,
}

/// Client for the two upstream billing endpoints.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every message in the current billing period. Any failure
    /// here is fatal to the usage request.
    pub async fn current_period_messages(&self) -> Result<Vec<Message>, UpstreamError> {
        let url = format!("{}/{}", self.base_url, MESSAGES_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint: "messages", source })?;

        if !response.status().is_success() {
            return Err(UpstreamError::MessagesStatus(response.status()));
        }

        let envelope: MessagesEnvelope =
            response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidPayload {
                    endpoint: "messages",
                    detail: e.to_string(),
                })?;

        Ok(envelope.messages)
    }
}

#[async_trait]
impl ReportLookup for UpstreamClient {
    async fn lookup(&self, report_id: u64) -> Result<ReportOutcome, UpstreamError> {
        let url = format!("{}/{}/{}", self.base_url, REPORTS_PATH, report_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint: "reports", source })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ReportOutcome::NotFound);
        }
        if !response.status().is_success() {
            return Err(UpstreamError::ReportStatus {
                id: report_id,
                status: response.status(),
            });
        }

        let report: Report = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidPayload {
                endpoint: "reports",
                detail: e.to_string(),
            })?;

        tracing::debug!(report_id = report.id, name = %report.name, "fetched report");
        Ok(ReportOutcome::Found(report))
    }
}
