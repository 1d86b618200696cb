use serde::Serialize;

use crate::usage::types::{ChartBucket, UsageRecord, UsageResult};

/// Body of a successful `GET /usage` response.
#[derive(Serialize)]
pub struct UsageResponse {
    pub usage: Vec<UsageRecord>,
    pub total_credits: f64,
    pub chart_data: Vec<ChartBucket>,
}

impl From<UsageResult> for UsageResponse {
    fn from(result: UsageResult) -> Self {
        Self {
            usage: result.records,
            total_credits: result.total_credits,
            chart_data: result.chart,
        }
    }
}

/// Liveness probe body.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
