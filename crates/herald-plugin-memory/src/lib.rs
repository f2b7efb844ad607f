//! In-process loopback backend for herald.
//!
//! [`MemoryBackend`] implements both the pool and the declaration role by
//! keeping service descriptors in memory. It is useful for local
//! development, for single-process deployments that only need a herald to be
//! present, and as a reference for writing real plugins.
//!
//! Calling [`register`] makes one shared backend available under the name
//! `memory` in both registry namespaces.


use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use herald::{BackendError, Declaration, Pool, Registry, ServiceDescriptor};
use tracing::debug;

/// Name under which [`register`] installs the backend.
pub const NAME: &str = "memory";

const MEMORY_TARGET: &str = "herald_plugin_memory";

type Table = RwLock<BTreeMap<String, ServiceDescriptor>>;

/// Pool and declaration backend that stores descriptors in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    initialised: AtomicBool,
    pooled: Table,
    declared: Table,
}

impl MemoryBackend {
    /// Creates an uninitialised backend with no entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once either role has been initialised.
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.initialised.load(Ordering::Acquire)
    }

    /// Services currently in the pool, ordered by key.
    #[must_use]
    pub fn pooled(&self) -> Vec<ServiceDescriptor> {
        snapshot(&self.pooled)
    }

    /// Services currently declared, ordered by key.
    #[must_use]
    pub fn declared(&self) -> Vec<ServiceDescriptor> {
        snapshot(&self.declared)
    }

    fn initialise(&self) {
        if !self.initialised.swap(true, Ordering::AcqRel) {
            debug!(target: MEMORY_TARGET, "memory backend initialised");
        }
    }

    fn ensure_initialised(&self, operation: &str) -> Result<(), BackendError> {
        if self.is_initialised() {
            return Ok(());
        }
        Err(BackendError::new(format!(
            "memory backend used for {operation} before init"
        )))
    }
}

fn snapshot(table: &Table) -> Vec<ServiceDescriptor> {
    table
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .values()
        .cloned()
        .collect()
}

fn store(table: &Table, service: &ServiceDescriptor) {
    table
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(service.key(), service.clone());
}

impl Pool for MemoryBackend {
    fn init(&self) -> Result<(), BackendError> {
        self.initialise();
        Ok(())
    }

    fn start(&self, service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.ensure_initialised("start")?;
        store(&self.pooled, service);
        debug!(target: MEMORY_TARGET, service = %service.key(), "service pooled");
        Ok(())
    }

    fn stop(&self, service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.ensure_initialised("stop")?;
        let removed = self
            .pooled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&service.key());
        debug!(
            target: MEMORY_TARGET,
            service = %service.key(),
            was_pooled = removed.is_some(),
            "service unpooled"
        );
        Ok(())
    }
}

impl Declaration for MemoryBackend {
    fn init(&self) -> Result<(), BackendError> {
        self.initialise();
        Ok(())
    }

    fn declare(&self, service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.ensure_initialised("declare")?;
        store(&self.declared, service);
        debug!(target: MEMORY_TARGET, service = %service.key(), "service declared");
        Ok(())
    }

    fn get(&self, target: &mut ServiceDescriptor) -> Result<(), BackendError> {
        self.ensure_initialised("get")?;
        let key = target.key();
        let declared = self.declared.read().unwrap_or_else(PoisonError::into_inner);
        let Some(found) = declared.get(&key) else {
            return Err(BackendError::new(format!("no service declared as {key}")));
        };
        target.clone_from(found);
        Ok(())
    }
}

/// Registers a shared [`MemoryBackend`] under [`NAME`] for both roles.
///
/// Returns the backend so the caller can inspect what it has recorded.
pub fn register(registry: &Registry) -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    registry.add_pool(NAME, backend.clone());
    registry.add_declaration(NAME, backend.clone());
    backend
}
