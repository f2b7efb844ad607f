//! Backend selectors and the precedence rules that combine them.
//!
//! Three independent cells name the backends a process should use: a pool
//! selector, a declaration selector, and a combined selector that applies to
//! both roles. Each cell is populated from its flag, falling back to its
//! environment variable when the flag is absent.

use clap::Args;

/// Long flag naming the pool backend.
pub const POOL_FLAG: &str = "herald-p";
/// Long flag naming the declaration backend.
pub const DECLARE_FLAG: &str = "herald-d";
/// Long flag naming one backend for both roles.
pub const BOTH_FLAG: &str = "herald";

/// Environment fallback for [`POOL_FLAG`].
pub const POOL_ENV: &str = "HERALD_POOL";
/// Environment fallback for [`DECLARE_FLAG`].
pub const DECLARE_ENV: &str = "HERALD_DECLARE";
/// Environment fallback for [`BOTH_FLAG`].
pub const BOTH_ENV: &str = "HERALD";

/// Flags recognised as herald selectors, without their leading dashes.
pub const SELECTOR_FLAGS: [&str; 3] = [POOL_FLAG, DECLARE_FLAG, BOTH_FLAG];

/// Raw selector cells as supplied by flags or the environment.
///
/// Hosts that own a command line flatten this struct into their parser with
/// `#[command(flatten)]`; clap then applies the environment fallback for any
/// flag the operator omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct Selectors {
    /// Herald to microservice pool.
    #[arg(long = POOL_FLAG, env = POOL_ENV, value_name = "NAME")]
    pub pool: Option<String>,
    /// Herald to microservice declaration.
    #[arg(long = DECLARE_FLAG, env = DECLARE_ENV, value_name = "NAME")]
    pub declare: Option<String>,
    /// Herald to handle both declaration and pooling.
    #[arg(long = BOTH_FLAG, env = BOTH_ENV, value_name = "NAME")]
    pub both: Option<String>,
}

impl Selectors {
    /// Builds selectors from explicit values.
    #[must_use]
    pub fn new(pool: Option<&str>, declare: Option<&str>, both: Option<&str>) -> Self {
        Self {
            pool: pool.map(str::to_owned),
            declare: declare.map(str::to_owned),
            both: both.map(str::to_owned),
        }
    }

    /// Applies the precedence rules and yields the effective backend names.
    ///
    /// A non-empty pool or declaration selector disables the combined
    /// selector for both roles, even when only one of the two is set.
    /// Otherwise the combined selector names the backend for both roles.
    #[must_use]
    pub fn resolve(&self) -> ResolvedSelection {
        let pool = non_empty(self.pool.as_deref());
        let declare = non_empty(self.declare.as_deref());
        if pool.is_some() || declare.is_some() {
            return ResolvedSelection::new(pool.unwrap_or_default(), declare.unwrap_or_default());
        }

        let both = self.both.as_deref().unwrap_or_default();
        ResolvedSelection::new(both, both)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Effective backend names for the pool and declaration roles.
///
/// An empty name means the role is disabled for this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSelection {
    pool: String,
    declaration: String,
}

impl ResolvedSelection {
    /// Builds a selection from the two effective names.
    #[must_use]
    pub fn new(pool: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            declaration: declaration.into(),
        }
    }

    /// Pool backend name, or `None` when pooling is disabled.
    #[must_use]
    pub fn pool(&self) -> Option<&str> {
        non_empty(Some(self.pool.as_str()))
    }

    /// Declaration backend name, or `None` when declaration is disabled.
    #[must_use]
    pub fn declaration(&self) -> Option<&str> {
        non_empty(Some(self.declaration.as_str()))
    }

    /// Returns `true` when both roles are disabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty() && self.declaration.is_empty()
    }
}
