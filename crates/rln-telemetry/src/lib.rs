//! # RLN Telemetry
//!
//! Logging and metrics shared by every relay subsystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rln_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Subsystems now log through `tracing` and count through `metrics`
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `rln-relay` | Service name in logs |
//! | `RLN_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `RLN_JSON_LOGS` | `false` | JSON output (defaults on inside containers) |
//! | `RLN_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, EPHEMERAL_CACHE_ENTRIES, IDENTITIES_BANNED,
    MESSAGES_VALIDATED, PROOF_REJECTIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the logging subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
