//! # Relay Container
//!
//! Wires the four relay subsystems together over a set of storage ports.
//!
//! ```text
//! Level 0: Proof Verification (SNARK verifier, clock)
//! Level 1: Collision Detection (ephemeral cache, history)
//! Level 2: Revocation (membership, external groups, notices)
//! Level 3: Message Validation (orchestrates 0-2)
//! ```
//!
//! The ephemeral cache is shared by every request the container serves and
//! swept by a background task that lives as long as the container.

use crate::config::ValidationConfig;
use crate::domain::ValidationError;
use crate::ports::outbound::{MessageStore, RelaySink, RoomDirectory};
use crate::service::MessageValidationService;
use rln_01_proof_verification::{ProofVerificationService, SnarkVerifier, TimeSource};
use rln_02_collision_detection::{
    spawn_sweeper, CollisionDetector, EphemeralMessageCache, MessageHistory,
};
use rln_03_revocation::{
    ExternalGroupClient, HttpExternalGroupClient, MembershipStore, RevocationHandler,
    SystemNoticeSink,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

/// Outbound adapters the container is built from.
pub struct RelayPorts {
    pub snark: Arc<dyn SnarkVerifier>,
    pub clock: Arc<dyn TimeSource>,
    pub history: Arc<dyn MessageHistory>,
    pub membership: Arc<dyn MembershipStore>,
    pub notices: Arc<dyn SystemNoticeSink>,
    pub store: Arc<dyn MessageStore>,
    pub rooms: Arc<dyn RoomDirectory>,
    pub relay: Arc<dyn RelaySink>,
    /// `None` builds the HTTP client from configuration.
    pub external_groups: Option<Arc<dyn ExternalGroupClient>>,
}

/// Running relay core.
pub struct RelayContainer {
    /// Entry point for inbound messages.
    pub validation: Arc<MessageValidationService>,

    /// Cache shared by all collision checks.
    pub cache: Arc<EphemeralMessageCache>,

    /// Configuration the container was built with.
    pub config: ValidationConfig,

    sweeper: JoinHandle<()>,
}

impl RelayContainer {
    /// Build every subsystem and start the cache sweeper.
    ///
    /// Must be called inside a Tokio runtime.
    #[instrument(name = "relay_init", skip_all)]
    pub fn start(config: ValidationConfig, ports: RelayPorts) -> Result<Self, ValidationError> {
        info!(
            epoch_error_range = config.verifier.epoch_error_range,
            merkle_depth = config.verifier.merkle_depth,
            "Initializing relay subsystems"
        );

        rln_telemetry::register_metrics().map_err(|e| ValidationError::Startup(e.to_string()))?;

        let verifier = Arc::new(ProofVerificationService::new(
            ports.snark,
            Arc::clone(&ports.clock),
            config.verifier.clone(),
        ));

        let cache = Arc::new(EphemeralMessageCache::new(config.verifier.epoch_error_range));
        let detector = Arc::new(CollisionDetector::new(Arc::clone(&cache), ports.history));

        let external_groups = match ports.external_groups {
            Some(client) => client,
            None => Arc::new(
                HttpExternalGroupClient::new(config.external_group_timeout)
                    .map_err(|e| ValidationError::Startup(e.to_string()))?,
            ),
        };
        let revocation = Arc::new(RevocationHandler::new(
            ports.membership,
            external_groups,
            ports.notices,
        ));

        let validation = Arc::new(MessageValidationService::new(
            verifier,
            detector,
            revocation,
            ports.store,
            ports.rooms,
            ports.relay,
        ));

        let sweeper = spawn_sweeper(Arc::clone(&cache), config.cache_sweep_interval, ports.clock);
        info!(
            sweep_interval_ms = config.cache_sweep_interval.as_millis() as u64,
            "Relay subsystems initialized"
        );

        Ok(Self {
            validation,
            cache,
            config,
            sweeper,
        })
    }

    /// Stop the background sweeper.
    pub fn shutdown(self) {
        self.sweeper.abort();
        info!("Relay container stopped");
    }
}

impl Drop for RelayContainer {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}
