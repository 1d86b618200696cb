use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::round2;
use super::types::{ChartBucket, UsageRecord, UsageResult};

const BUCKET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Bucket records by calendar day and compute the period total.
///
/// Grouping keys on the naive date of each timestamp; the time of day
/// is discarded and no timezone conversion happens. Keeping the map
/// keyed by `NaiveDate` sorts buckets by real calendar date, not by the
/// rendered DD/MM/YYYY string. Record order is left untouched.
pub fn aggregate(records: Vec<UsageRecord>) -> UsageResult {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut total = 0.0;

    for record in &records {
        *daily.entry(record.timestamp.date()).or_insert(0.0) += record.credits;
        total += record.credits;
    }

    let chart = daily
        .into_iter()
        .map(|(date, credits)| ChartBucket {
            date: date.format(BUCKET_DATE_FORMAT).to_string(),
            credits: round2(credits),
        })
        .collect();

    UsageResult {
        records,
        total_credits: round2(total),
        chart,
    }
}
