//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! toolkit.toml (optional)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → validation.rs (semantic checks)
//!     → ToolkitConfig (validated, immutable)
//!     → shared via Arc with every action
//! ```
//!
//! All fields have defaults so an empty file is a valid configuration.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AmountsConfig, ApiConfig, ChainConfig, ContractsConfig, DelayConfig, FilesConfig,
    ObservabilityConfig, RetryConfig, RunConfig, ToolkitConfig,
};
