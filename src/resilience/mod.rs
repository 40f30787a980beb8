//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound query call:
//!     → timeouts.rs (connect/request deadlines, if configured)
//!     → On connection failure: retries.rs (retry with backoff, if enabled)
//! ```
//!
//! # Design Decisions
//! - Both timeouts and retries are opt-in; defaults wait indefinitely and
//!   make exactly one attempt
//! - Retries never repeat a request the downstream may have received

pub mod retries;
pub mod timeouts;

pub use retries::RetryPolicy;
pub use timeouts::UpstreamTimeouts;
