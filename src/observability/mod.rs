//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing macros with structured fields (function, listener_rule, rule)
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr; stdout is reserved for command output
//! - RUST_LOG overrides the configured level

pub mod logging;
