//! Query gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod resilience;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use query::{QueryRequest, QueryResponse};
