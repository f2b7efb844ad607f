//! Crate-level test doubles and integration tests.

use std::sync::{Arc, Mutex};

use mockall::mock;

use crate::backend::{Declaration, Pool};
use crate::error::BackendError;
use crate::service::{ServiceDescriptor, StaticIdentity};


mock! {
    pub PoolBackend {}
    impl Pool for PoolBackend {
        fn init(&self) -> Result<(), BackendError>;
        fn start(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;
        fn stop(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;
    }
}

mock! {
    pub DeclarationBackend {}
    impl Declaration for DeclarationBackend {
        fn init(&self) -> Result<(), BackendError>;
        fn declare(&self, service: &ServiceDescriptor) -> Result<(), BackendError>;
        fn get(&self, target: &mut ServiceDescriptor) -> Result<(), BackendError>;
    }
}

/// Backend implementing both roles that records every call it receives.
#[derive(Clone, Debug, Default)]
pub(crate) struct StubBackend {
    label: String,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub(crate) fn failing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fail: true,
            ..Self::default()
        }
    }

    /// Shares the call log with another stub so interleaving can be asserted.
    pub(crate) fn sharing_log(mut self, other: &Self) -> Self {
        self.calls = Arc::clone(&other.calls);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("stub call log poisoned").clone()
    }

    fn record(&self, operation: &str) -> Result<(), BackendError> {
        self.calls
            .lock()
            .expect("stub call log poisoned")
            .push(format!("{}:{operation}", self.label));
        if self.fail {
            return Err(BackendError::new(format!("{} {operation} failed", self.label)));
        }
        Ok(())
    }
}

impl Pool for StubBackend {
    fn init(&self) -> Result<(), BackendError> {
        self.record("init")
    }

    fn start(&self, _service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.record("start")
    }

    fn stop(&self, _service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.record("stop")
    }
}

impl Declaration for StubBackend {
    fn init(&self) -> Result<(), BackendError> {
        self.record("init")
    }

    fn declare(&self, _service: &ServiceDescriptor) -> Result<(), BackendError> {
        self.record("declare")
    }

    fn get(&self, target: &mut ServiceDescriptor) -> Result<(), BackendError> {
        self.record("get")?;
        target.host = format!("{}.service.local", self.label);
        Ok(())
    }
}

pub(crate) fn sample_service() -> ServiceDescriptor {
    ServiceDescriptor::new("billing", "invoices", "1.2.0").with_address("10.0.0.4", 8443)
}

pub(crate) fn sample_identity() -> StaticIdentity {
    StaticIdentity::new(sample_service())
}
