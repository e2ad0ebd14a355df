//! # RLN Relay Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Test prover, circuit oracle, relay harness
//! ├── exploits/         # Spam and forgery attempts against the relay
//! └── integration/      # End-to-end pipeline scenarios
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p rln-tests
//!
//! # By category
//! cargo test -p rln-tests integration::
//! cargo test -p rln-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p rln-tests
//! ```

pub mod fixtures;
