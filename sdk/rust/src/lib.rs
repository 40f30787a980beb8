//! Typed client for the query gateway.

pub mod client;

pub use client::{GatewayClient, QueryRequest, QueryResponse, SdkError};
