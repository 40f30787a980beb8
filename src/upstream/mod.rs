//! Downstream query service integration.
//!
//! # Data Flow
//! ```text
//! QueryRequest
//!     → client.rs (serialize, POST, read body)
//!     → QueryResponse | UpstreamError
//! ```

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
