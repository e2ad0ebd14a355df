//! # Adapters
//!
//! - `http`: reqwest client for the external group service

pub mod http;

pub use http::HttpExternalGroupClient;
