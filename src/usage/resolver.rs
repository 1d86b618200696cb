use async_trait::async_trait;
use futures_util::future::join_all;

use crate::upstream::UpstreamError;

use super::round2;
use super::scoring::calculate_message_credits;
use super::types::{Message, Report, UsageRecord};

/// Outcome of a report lookup. A missing report is an expected branch
/// that triggers text-scoring fallback, not an error.
#[derive(Debug, Clone)]
pub enum ReportOutcome {
    Found(Report),
    NotFound,
}

/// Source of report cost data, implemented by the upstream client and
/// by stubs in tests.
#[async_trait]
pub trait ReportLookup: Send + Sync {
    async fn lookup(&self, report_id: u64) -> Result<ReportOutcome, UpstreamError>;
}

/// Resolve the credit cost for a single message.
///
/// A found report's fixed cost wins over text scoring. A missing report
/// falls back to scoring, and so does a failed lookup: the failure is
/// scoped to this message and logged instead of failing the request.
pub async fn resolve_message<L>(message: &Message, lookup: &L) -> UsageRecord
where
    L: ReportLookup + ?Sized,
{
    let (credits, report_name) = match message.report_id {
        Some(report_id) => match lookup.lookup(report_id).await {
            Ok(ReportOutcome::Found(report)) => (report.credit_cost, Some(report.name)),
            Ok(ReportOutcome::NotFound) => {
                tracing::warn!(
                    report_id,
                    message_id = message.id,
                    "report not found, scoring message text"
                );
                (calculate_message_credits(&message.text), None)
            }
            Err(err) => {
                tracing::warn!(
                    report_id,
                    message_id = message.id,
                    error = %err,
                    "report lookup failed, scoring message text"
                );
                (calculate_message_credits(&message.text), None)
            }
        },
        None => (calculate_message_credits(&message.text), None),
    };

    UsageRecord {
        id: message.id,
        timestamp: message.timestamp,
        report_name,
        credits: round2(credits),
    }
}

/// Resolve all messages concurrently. Lookups are independent, so they
/// fan out; `join_all` keeps the results in input order.
pub async fn resolve_all<L>(messages: &[Message], lookup: &L) -> Vec<UsageRecord>
where
    L: ReportLookup + ?Sized,
{
    join_all(messages.iter().map(|message| resolve_message(message, lookup))).await
}
