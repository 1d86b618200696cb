mod aggregate;
mod resolver;
pub mod scoring;
pub mod types;

pub use aggregate::aggregate;
pub use resolver::{resolve_all, resolve_message, ReportLookup, ReportOutcome};
pub use scoring::calculate_message_credits;

/// Round to two decimal places, halves away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
