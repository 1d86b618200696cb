use clap::Parser;

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://owpublic.blob.core.windows.net/tech-task";

/// Runtime configuration, resolved from CLI flags with environment
/// fallbacks. Passed explicitly into the components that need it; there
/// are no process-wide singletons.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "credit-usage",
    version,
    about = "Per-message credit usage reporting service"
)]
pub struct Config {
    /// Port to bind the HTTP server on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the upstream billing API
    #[arg(long, env = "UPSTREAM_BASE_URL", default_value = DEFAULT_UPSTREAM_BASE_URL)]
    pub upstream_base_url: String,

    /// Timeout for upstream requests, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 15)]
    pub upstream_timeout_secs: u64,
}
