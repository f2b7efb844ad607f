//! Sidecar agent for herald.
//!
//! `heraldd` announces a microservice on behalf of a process that cannot
//! link herald itself. On start it loads [`herald_config::HeraldConfig`],
//! installs structured telemetry, registers the bundled plugins, and binds a
//! [`herald::Herald`] for the service described by the configured JSON file.
//! It then initialises the backends, declares the service, joins the pool,
//! and waits for a termination signal before leaving the pool again.
//!
//! Only the in-memory loopback plugin ships with the agent. Deployments that
//! need a real discovery system build their own agent on top of
//! [`announce`] with additional plugins registered.

mod agent;
mod error;
mod shutdown;
mod telemetry;

pub use agent::{
    ConfigLoader, StaticConfigLoader, SystemConfigLoader, announce, register_bundled, run,
    run_with,
};
pub use error::AgentError;
pub use shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};
pub use telemetry::{TelemetryError, TelemetryHandle, initialise as initialise_telemetry};

#[cfg(test)]
mod tests;
