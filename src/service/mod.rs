//! Service definition subsystem.
//!
//! # Data Flow
//! ```text
//! serverless.yml / serverless.json
//!     → loader.rs (parse YAML or JSON by extension)
//!     → definition.rs (ServiceDefinition: provider + ordered functions)
//!     → transform::enumerator (alb sections read leniently, per event)
//! ```
//!
//! # Design Decisions
//! - Function order is the declaration order in the file (IndexMap)
//! - Events stay loosely typed until the enumerator reads their `alb` section,
//!   so one malformed event never rejects the whole service
//! - Only the fields this crate acts on are modelled; everything else is ignored

pub mod definition;
pub mod loader;

pub use definition::{
    AlbConditions, AlbEventDefinition, FunctionDefinition, OneOrMany, ProviderDefinition,
    ServiceDefinition,
};
pub use loader::{load_service, parse_json, parse_yaml, ServiceError};
