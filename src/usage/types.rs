use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A message from the upstream current-period listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub report_id: Option<u64>,
}

/// An upstream report carrying a fixed credit cost that overrides
/// text-based scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub id: u64,
    pub name: String,
    pub credit_cost: f64,
}

/// One resolved usage entry; same id as the source message.
#[derive(Debug, Clone, Serialize)]
pub struct UsageRecord {
    pub id: u64,
    pub timestamp: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_name: Option<String>,
    pub credits: f64,
}

/// Credits summed over one calendar day. `date` is DD/MM/YYYY.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    pub date: String,
    pub credits: f64,
}

/// Aggregation output for a billing period. `records` keeps the
/// original message order; `chart` is sorted by calendar date.
#[derive(Debug, Clone)]
pub struct UsageResult {
    pub records: Vec<UsageRecord>,
    pub total_credits: f64,
    pub chart: Vec<ChartBucket>,
}

/// Parse an upstream timestamp. Accepts RFC 3339 as well as naive
/// ISO-8601 with a `T` or space separator and optional fractional
/// seconds. Offsets are dropped; date grouping uses naive components.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    Err(format!("unrecognized timestamp {raw:?}"))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let dt = parse_timestamp("2024-04-29T02:08:29.375Z").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
        assert_eq!(dt.hour(), 2);
    }

    #[test]
    fn test_parse_naive_timestamp_with_t_separator() {
        let dt = parse_timestamp("2024-04-29T02:08:29.375000").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
    }

    #[test]
    fn test_parse_naive_timestamp_with_space_separator() {
        let dt = parse_timestamp("2024-04-29 02:08:29").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("29/04/2024").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_message_deserializes_without_report_id() {
        let message: Message = serde_json::from_str(
            r#"{"id": 1, "text": "Hello", "timestamp": "2024-04-29T02:08:29.375Z"}"#,
        )
        .unwrap();
        assert_eq!(message.id, 1);
        assert_eq!(message.report_id, None);
    }

    #[test]
    fn test_message_deserializes_null_report_id() {
        let message: Message = serde_json::from_str(
            r#"{"id": 2, "text": "x", "timestamp": "2024-04-29T02:08:29Z", "report_id": null}"#,
        )
        .unwrap();
        assert_eq!(message.report_id, None);
    }

    #[test]
    fn test_usage_record_omits_missing_report_name() {
        let record = UsageRecord {
            id: 7,
            timestamp: parse_timestamp("2024-04-29T02:08:29Z").unwrap(),
            report_name: None,
            credits: 1.45,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("report_name").is_none());
        assert_eq!(json["credits"], 1.45);
    }
}
