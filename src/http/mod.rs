//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, access log, body limit)
//!     → handler.rs (decode QueryRequest)
//!     → upstream client (forward, decode QueryResponse)
//!     → error.rs (map failures to status + {"error": ...})
//!     → Send to client
//! ```

pub mod error;
pub mod handler;
pub mod request;
pub mod server;

pub use error::GatewayError;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
