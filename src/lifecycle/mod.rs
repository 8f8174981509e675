//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (hooks.rs):
//!     provider check → usage + deploy lifecycle events + hook names
//!
//! Deploy (hooks.rs, runner.rs):
//!     load service + template
//!     → before:deploy:deploy → transform::apply
//!     → write output (only on success)
//!
//! Signals (signals.rs):
//!     SIGINT → stop watch mode
//! ```
//!
//! # Design Decisions
//! - Fail fast: a wrong provider stops registration, nothing else runs
//! - The host adapter only locates inputs and invokes the hook once
//! - Any hook error is fatal; a partially mutated template is never written

pub mod hooks;
pub mod runner;
pub mod signals;

pub use hooks::{AlbApiKeyPlugin, PluginCommands, PluginError, BEFORE_DEPLOY_HOOK};
pub use runner::{apply_files, plan_files, RunError};
