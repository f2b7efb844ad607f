//! The herald coordinator.
//!
//! A [`Herald`] holds at most one pool backend, at most one declaration
//! backend, and the descriptor of the local service. Each lifecycle method
//! forwards to the bound backend for its role. Unbound roles turn `init`,
//! `declare`, `start_pool` and `stop_pool` into successful no-ops so calling
//! code does not need to branch on configuration; `get` has no such
//! interpretation and fails instead.
//!
//! Backend errors are returned exactly as the backend produced them. Nothing
//! is retried.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use herald_config::{Resolver, SelectorSource};

use crate::backend::{Declaration, Operation, Pool, Role};
use crate::error::{BackendError, BindError, HeraldError};
use crate::registry::Registry;
use crate::service::{ServiceDescriptor, ServiceIdentity};

const LIFECYCLE_TARGET: &str = "herald::lifecycle";

/// Coordinator binding the local service to its discovery backends.
#[derive(Clone)]
pub struct Herald {
    pool: Option<Arc<dyn Pool>>,
    declaration: Option<Arc<dyn Declaration>>,
    service: Arc<ServiceDescriptor>,
}

impl fmt::Debug for Herald {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Herald")
            .field("pool", &self.pool.is_some())
            .field("declaration", &self.declaration.is_some())
            .field("service", &self.service)
            .finish()
    }
}

impl Herald {
    /// Creates a coordinator with no backends bound.
    ///
    /// Backends can then be attached programmatically with
    /// [`Herald::with_pool`] and [`Herald::with_declaration`].
    #[must_use]
    pub const fn new(service: Arc<ServiceDescriptor>) -> Self {
        Self {
            pool: None,
            declaration: None,
            service,
        }
    }

    /// Binds a coordinator for the running service by backend name.
    ///
    /// The resolver supplies the effective pool and declaration names; each
    /// non-empty name is looked up in `registry`. The service descriptor is
    /// taken from `identity`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] carrying the first failure in this order:
    /// selector configuration, unknown pool name, unknown declaration name,
    /// then the identity provider's failure. When a descriptor was obtained
    /// the error also carries the partially bound coordinator.
    pub fn this<S>(
        registry: &Registry,
        resolver: &Resolver<S>,
        identity: &dyn ServiceIdentity,
    ) -> Result<Self, BindError>
    where
        S: SelectorSource,
    {
        let selection = resolver
            .resolve()
            .map_err(|source| BindError::new(source.into(), None))?;

        let mut first_error: Option<HeraldError> = None;

        let pool = selection.pool().and_then(|name| {
            let found = registry.pool(name);
            if found.is_none() {
                error!(
                    target: LIFECYCLE_TARGET,
                    role = %Role::Pool,
                    backend = name,
                    "unrecognized pooling mechanism"
                );
                first_error = Some(HeraldError::UnrecognizedPool {
                    name: name.to_owned(),
                });
            }
            found
        });

        let declaration = selection.declaration().and_then(|name| {
            let found = registry.declaration(name);
            if found.is_none() {
                error!(
                    target: LIFECYCLE_TARGET,
                    role = %Role::Declaration,
                    backend = name,
                    "unrecognized declaration mechanism"
                );
                if first_error.is_none() {
                    first_error = Some(HeraldError::UnrecognizedDeclaration {
                        name: name.to_owned(),
                    });
                }
            }
            found
        });

        let service = match identity.describe() {
            Ok(service) => Arc::new(service),
            Err(source) => {
                let cause = first_error.unwrap_or_else(|| HeraldError::Identity(source));
                return Err(BindError::new(cause, None));
            }
        };

        let herald = Self {
            pool,
            declaration,
            service,
        };

        match first_error {
            Some(cause) => Err(BindError::new(cause, Some(herald))),
            None => {
                info!(
                    target: LIFECYCLE_TARGET,
                    pool = selection.pool().unwrap_or_default(),
                    declaration = selection.declaration().unwrap_or_default(),
                    service = %herald.service.key(),
                    "herald bound"
                );
                Ok(herald)
            }
        }
    }

    /// Attaches a pool backend, replacing any already bound.
    #[must_use]
    pub fn with_pool(mut self, pool: Arc<dyn Pool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Attaches a declaration backend, replacing any already bound.
    #[must_use]
    pub fn with_declaration(mut self, declaration: Arc<dyn Declaration>) -> Self {
        self.declaration = Some(declaration);
        self
    }

    /// Binds or unbinds the pool backend.
    pub fn set_pool(&mut self, pool: Option<Arc<dyn Pool>>) {
        self.pool = pool;
    }

    /// Binds or unbinds the declaration backend.
    pub fn set_declaration(&mut self, declaration: Option<Arc<dyn Declaration>>) {
        self.declaration = declaration;
    }

    /// The bound pool backend, if any.
    #[must_use]
    pub const fn pool(&self) -> Option<&Arc<dyn Pool>> {
        self.pool.as_ref()
    }

    /// The bound declaration backend, if any.
    #[must_use]
    pub const fn declaration(&self) -> Option<&Arc<dyn Declaration>> {
        self.declaration.as_ref()
    }

    /// Descriptor of the local service.
    #[must_use]
    pub fn service(&self) -> &ServiceDescriptor {
        &self.service
    }

    /// Initialises the bound backends, pool first.
    ///
    /// A pool failure is returned immediately and the declaration backend is
    /// left uninitialised. A backend bound to both roles receives both
    /// `Pool::init` and `Declaration::init`; it must tolerate the second.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Backend`] with the first backend failure.
    pub fn init(&self) -> Result<(), HeraldError> {
        if let Some(pool) = &self.pool {
            forward(Role::Pool, Operation::Init, || pool.init())?;
        }

        if let Some(declaration) = &self.declaration {
            forward(Role::Declaration, Operation::Init, || declaration.init())?;
        }

        Ok(())
    }

    /// Publishes the local service through the declaration backend.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Backend`] when the backend fails.
    pub fn declare(&self) -> Result<(), HeraldError> {
        match &self.declaration {
            Some(declaration) => forward(Role::Declaration, Operation::Declare, || {
                declaration.declare(&self.service)
            }),
            None => Ok(()),
        }
    }

    /// Joins the routing pool.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Backend`] when the backend fails.
    pub fn start_pool(&self) -> Result<(), HeraldError> {
        match &self.pool {
            Some(pool) => forward(Role::Pool, Operation::Start, || pool.start(&self.service)),
            None => Ok(()),
        }
    }

    /// Leaves the routing pool.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Backend`] when the backend fails.
    pub fn stop_pool(&self) -> Result<(), HeraldError> {
        match &self.pool {
            Some(pool) => forward(Role::Pool, Operation::Stop, || pool.stop(&self.service)),
            None => Ok(()),
        }
    }

    /// Fills `target` with a foreign service's published description.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::NoDeclaration`] when no declaration backend is
    /// bound, or [`HeraldError::Backend`] when the lookup fails.
    pub fn get(&self, target: &mut ServiceDescriptor) -> Result<(), HeraldError> {
        let Some(declaration) = &self.declaration else {
            return Err(HeraldError::NoDeclaration);
        };
        forward(Role::Declaration, Operation::Get, || declaration.get(target))
    }
}

fn forward<F>(role: Role, operation: Operation, call: F) -> Result<(), HeraldError>
where
    F: FnOnce() -> Result<(), BackendError>,
{
    debug!(
        target: LIFECYCLE_TARGET,
        role = %role,
        operation = %operation,
        "forwarding to backend"
    );
    call().map_err(|failure| {
        error!(
            target: LIFECYCLE_TARGET,
            role = %role,
            operation = %operation,
            error = %failure,
            "backend call failed"
        );
        HeraldError::Backend(failure)
    })
}
