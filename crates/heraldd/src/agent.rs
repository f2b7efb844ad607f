//! The agent's announce-and-wait loop.

use tracing::{info, warn};

use herald::{Herald, JsonFileIdentity, Registry, ServiceIdentity};
use herald_config::{ConfigError, HeraldConfig, Resolver, SelectorSource};

use crate::error::AgentError;
use crate::shutdown::{ShutdownSignal, SystemShutdownSignal};
use crate::telemetry;

pub(crate) const AGENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::agent");

/// Source of the agent configuration.
pub trait ConfigLoader: Send + Sync {
    /// Loads the agent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration cannot be parsed.
    fn load(&self) -> Result<HeraldConfig, ConfigError>;
}

/// Loader that reads the process arguments and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<HeraldConfig, ConfigError> {
        HeraldConfig::load()
    }
}

/// Loader that hands out a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: HeraldConfig,
}

impl StaticConfigLoader {
    /// Wraps an already assembled configuration.
    #[must_use]
    pub const fn new(config: HeraldConfig) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<HeraldConfig, ConfigError> {
        Ok(self.config.clone())
    }
}

/// Registers every plugin that ships with the agent.
pub fn register_bundled(registry: &Registry) {
    herald_plugin_memory::register(registry);
}

/// Runs the agent with the production collaborators.
///
/// # Errors
///
/// See [`run_with`].
pub fn run() -> Result<(), AgentError> {
    run_with(&SystemConfigLoader, &SystemShutdownSignal::new())
}

/// Runs the agent with injected configuration and shutdown sources.
///
/// # Errors
///
/// Returns [`AgentError`] when configuration, telemetry, binding, any
/// lifecycle step, or the shutdown wait fails.
pub fn run_with(
    loader: &dyn ConfigLoader,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), AgentError> {
    let config = loader.load()?;
    telemetry::initialise(&config)?;

    let registry = Registry::new();
    register_bundled(&registry);
    info!(
        target: AGENT_TARGET,
        pools = ?registry.pool_names(),
        declarations = ?registry.declaration_names(),
        "bundled plugins registered"
    );

    let resolver = Resolver::new(config.selectors().clone());
    let identity = JsonFileIdentity::new(config.service_file());
    announce(&registry, &resolver, &identity, shutdown).map(|_| ())
}

/// Announces the service, waits for shutdown, then leaves the pool.
///
/// The pool is left even when waiting fails; the wait error takes
/// precedence over a failure to leave. On success the coordinator is
/// returned so callers can inspect what was bound.
///
/// # Errors
///
/// Returns [`AgentError::Bind`] when the backends or identity cannot be
/// bound, [`AgentError::Lifecycle`] when a backend call fails, and
/// [`AgentError::Shutdown`] when waiting fails.
pub fn announce<S>(
    registry: &Registry,
    resolver: &Resolver<S>,
    identity: &dyn ServiceIdentity,
    shutdown: &dyn ShutdownSignal,
) -> Result<Herald, AgentError>
where
    S: SelectorSource,
{
    let herald = Herald::this(registry, resolver, identity)?;
    if herald.pool().is_none() && herald.declaration().is_none() {
        warn!(
            target: AGENT_TARGET,
            "no backends selected; the service will not be announced"
        );
    }

    herald.init()?;
    herald.declare()?;
    herald.start_pool()?;
    info!(
        target: AGENT_TARGET,
        service = %herald.service().key(),
        "service announced; waiting for shutdown"
    );

    let waited = shutdown.wait();
    let left = herald.stop_pool();
    waited?;
    left?;
    info!(target: AGENT_TARGET, service = %herald.service().key(), "service withdrawn");
    Ok(herald)
}
