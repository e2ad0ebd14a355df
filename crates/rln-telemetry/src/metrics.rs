//! Prometheus metrics for the RLN relay.
//!
//! All metrics follow the naming convention: `rln_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Terminal outcome of every validated message
    pub static ref MESSAGES_VALIDATED: CounterVec = CounterVec::new(
        Opts::new("rln_messages_validated_total", "Messages by terminal validation outcome"),
        &["outcome"]  // accepted, invalid_proof, banned, duplicate, error
    ).expect("metric creation failed");

    /// Identities newly banned after secret recovery
    pub static ref IDENTITIES_BANNED: IntCounter = IntCounter::new(
        "rln_identities_banned_total",
        "Identities banned for exceeding their rate limit"
    ).expect("metric creation failed");

    /// Proof verification rejections
    pub static ref PROOF_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("rln_proof_rejections_total", "Proof rejections by reason"),
        &["reason"]
    ).expect("metric creation failed");

    /// Entries currently held by the ephemeral message cache
    pub static ref EPHEMERAL_CACHE_ENTRIES: IntGauge = IntGauge::new(
        "rln_ephemeral_cache_entries",
        "Messages held in the ephemeral collision cache"
    ).expect("metric creation failed");
}

/// Register all metrics with [`REGISTRY`].
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(MESSAGES_VALIDATED.clone()),
        Box::new(IDENTITIES_BANNED.clone()),
        Box::new(PROOF_REJECTIONS.clone()),
        Box::new(EPHEMERAL_CACHE_ENTRIES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
