//! Name-keyed registry of backend implementations.
//!
//! Plugins register their backends by name during process start, before any
//! coordinator is bound. Pool and declaration names live in separate
//! namespaces, so a plugin may register the same name in both. The registry
//! only grows: registering a name again replaces the earlier implementation
//! (last writer wins) and there is no removal.
//!
//! Registration may happen from several initialisation paths at once; both
//! tables are guarded by read/write locks.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::backend::{Declaration, Pool, Role};

const REGISTRY_TARGET: &str = "herald::registry";

struct Table<T: ?Sized> {
    role: Role,
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T: ?Sized> Table<T> {
    fn new(role: Role) -> Self {
        Self {
            role,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, name: String, backend: Arc<T>) {
        if name.is_empty() {
            warn!(
                target: REGISTRY_TARGET,
                role = %self.role,
                "ignoring backend registered without a name"
            );
            return;
        }

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.insert(name.clone(), backend).is_some() {
            warn!(
                target: REGISTRY_TARGET,
                role = %self.role,
                backend = %name,
                "backend re-registered; replacing earlier implementation"
            );
        } else {
            debug!(
                target: REGISTRY_TARGET,
                role = %self.role,
                backend = %name,
                "backend registered"
            );
        }
    }

    fn get(&self, name: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(Arc::clone)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }
}

/// Registry of pool and declaration backends, keyed by name.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use herald::Registry;
///
/// let registry = Registry::new();
/// registry.add_pool("etcd", Arc::new(EtcdPool::default()));
/// assert!(registry.pool("etcd").is_some());
/// ```
pub struct Registry {
    pools: Table<dyn Pool>,
    declarations: Table<dyn Declaration>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            pools: Table::new(Role::Pool),
            declarations: Table::new(Role::Declaration),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("pools", &self.pools.names())
            .field("declarations", &self.declarations.names())
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool backend under `name`, replacing any earlier one.
    ///
    /// Empty names are ignored, since an empty selection means the role is
    /// disabled.
    pub fn add_pool(&self, name: impl Into<String>, pool: Arc<dyn Pool>) {
        self.pools.insert(name.into(), pool);
    }

    /// Registers a declaration backend under `name`, replacing any earlier
    /// one.
    ///
    /// Empty names are ignored, since an empty selection means the role is
    /// disabled.
    pub fn add_declaration(&self, name: impl Into<String>, declaration: Arc<dyn Declaration>) {
        self.declarations.insert(name.into(), declaration);
    }

    /// Registers several pool backends.
    pub fn add_pools<I, N>(&self, pools: I)
    where
        I: IntoIterator<Item = (N, Arc<dyn Pool>)>,
        N: Into<String>,
    {
        for (name, pool) in pools {
            self.add_pool(name, pool);
        }
    }

    /// Registers several declaration backends.
    pub fn add_declarations<I, N>(&self, declarations: I)
    where
        I: IntoIterator<Item = (N, Arc<dyn Declaration>)>,
        N: Into<String>,
    {
        for (name, declaration) in declarations {
            self.add_declaration(name, declaration);
        }
    }

    /// Looks up a pool backend by name.
    #[must_use]
    pub fn pool(&self, name: &str) -> Option<Arc<dyn Pool>> {
        self.pools.get(name)
    }

    /// Looks up a declaration backend by name.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<Arc<dyn Declaration>> {
        self.declarations.get(name)
    }

    /// Registered pool names, sorted.
    #[must_use]
    pub fn pool_names(&self) -> Vec<String> {
        self.pools.names()
    }

    /// Registered declaration names, sorted.
    #[must_use]
    pub fn declaration_names(&self) -> Vec<String> {
        self.declarations.names()
    }
}
