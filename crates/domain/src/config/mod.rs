//! Configuration module for the SPF flattener
//!
//! - `root`: Main configuration and CLI overrides
//! - `resolver`: DNS server and transport settings
//! - `expansion`: Include/redirect expansion bounds
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod expansion;
pub mod logging;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use expansion::ExpansionConfig;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
