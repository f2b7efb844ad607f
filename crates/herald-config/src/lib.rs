//! Configuration for herald service announcement.
//!
//! Herald binds a process to at most two discovery backends: a pool it joins
//! for request routing, and a declaration registry it publishes its service
//! description to. This crate decides which backends those are.
//!
//! Three selector cells are read from flags with environment fallbacks:
//!
//! | Cell | Flag | Environment |
//! |---|---|---|
//! | pool | `--herald-p` | `HERALD_POOL` |
//! | declare | `--herald-d` | `HERALD_DECLARE` |
//! | both | `--herald` | `HERALD` |
//!
//! A specific selector always wins over the combined one, for both roles.
//! The [`Resolver`] evaluates the selection once and caches it.

mod agent;
pub mod arguments;
mod defaults;
mod error;
mod logging;
mod resolver;
mod selectors;

pub use agent::HeraldConfig;
pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SERVICE_FILE, default_log_filter, default_log_format,
    default_service_file,
};
pub use error::ConfigError;
pub use logging::{LogFormat, LogFormatParseError};
pub use resolver::{ProcessSelectors, Resolver, SelectorSource};
pub use selectors::{
    BOTH_ENV, BOTH_FLAG, DECLARE_ENV, DECLARE_FLAG, POOL_ENV, POOL_FLAG, ResolvedSelection,
    SELECTOR_FLAGS, Selectors,
};
