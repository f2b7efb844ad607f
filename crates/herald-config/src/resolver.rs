//! Memoised resolution of backend selectors.
//!
//! A [`Resolver`] loads [`Selectors`] from a [`SelectorSource`] the first time
//! it is asked, applies the precedence rules, and caches the outcome for the
//! rest of its lifetime. Later calls never consult flags or the environment
//! again, so the selection stays stable even if the environment changes after
//! startup.

use std::ffi::OsString;

use clap::Parser;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::arguments::selector_arguments;
use crate::error::ConfigError;
use crate::selectors::{ResolvedSelection, Selectors};

const RESOLVER_TARGET: &str = "herald_config::resolver";

/// Trait abstracting where selectors are read from.
pub trait SelectorSource {
    /// Loads the raw selector cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the underlying arguments are
    /// malformed.
    fn load(&self) -> Result<Selectors, ConfigError>;
}

/// Already-parsed selectors, typically flattened into a host's own parser.
impl SelectorSource for Selectors {
    fn load(&self) -> Result<Selectors, ConfigError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Parser)]
#[command(disable_help_flag = true, args_override_self = true)]
struct SelectorCli {
    #[command(flatten)]
    selectors: Selectors,
}

impl Selectors {
    /// Parses selectors from a full argument list, ignoring non-herald flags.
    ///
    /// The first item is treated as the program name. Cells whose flag is
    /// absent fall back to their environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when a selector flag is malformed, for
    /// example when it lacks a value.
    pub fn load_from_iter<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let filtered = selector_arguments(args);
        let cli = SelectorCli::try_parse_from(filtered)?;
        Ok(cli.selectors)
    }
}

/// Reads selectors from the running process's arguments and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSelectors;

impl SelectorSource for ProcessSelectors {
    fn load(&self) -> Result<Selectors, ConfigError> {
        Selectors::load_from_iter(std::env::args_os())
    }
}

/// Resolves selectors once and caches the outcome.
#[derive(Debug)]
pub struct Resolver<S = ProcessSelectors> {
    source: S,
    resolved: OnceCell<Result<ResolvedSelection, ConfigError>>,
}

impl Default for Resolver<ProcessSelectors> {
    fn default() -> Self {
        Self::new(ProcessSelectors)
    }
}

impl<S> Resolver<S> {
    /// Creates a resolver over the supplied source. Nothing is read yet.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            resolved: OnceCell::new(),
        }
    }

    /// Returns `true` once the first resolution has happened.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<S: SelectorSource> Resolver<S> {
    /// Returns the effective selection, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] produced by the first load. Failures are
    /// cached like successes.
    pub fn resolve(&self) -> Result<&ResolvedSelection, ConfigError> {
        let outcome = self.resolved.get_or_init(|| {
            let loaded = self.source.load().map(|selectors| selectors.resolve());
            match &loaded {
                Ok(selection) => debug!(
                    target: RESOLVER_TARGET,
                    pool = selection.pool().unwrap_or_default(),
                    declaration = selection.declaration().unwrap_or_default(),
                    "resolved herald selectors"
                ),
                Err(error) => debug!(
                    target: RESOLVER_TARGET,
                    error = %error,
                    "failed to load herald selectors"
                ),
            }
            loaded
        });
        outcome.as_ref().map_err(ConfigError::clone)
    }
}
