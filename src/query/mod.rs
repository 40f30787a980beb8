//! Query payloads exchanged with callers and the downstream service.

pub mod types;

pub use types::{QueryRequest, QueryResponse};
