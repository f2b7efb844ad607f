//! Unit tests for the agent loop.

use std::io;
use std::io::Write;
use std::sync::Arc;

use mockall::mock;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use herald::{HeraldError, Registry, ServiceDescriptor, StaticIdentity};
use herald_config::{HeraldConfig, Resolver, Selectors};
use herald_plugin_memory::{MemoryBackend, NAME};

use crate::{AgentError, ShutdownError, ShutdownSignal, StaticConfigLoader, announce, run_with};

mock! {
    pub Shutdown {}
    impl ShutdownSignal for Shutdown {
        fn wait(&self) -> Result<(), ShutdownError>;
    }
}

/// Shutdown source that runs a check while the service is announced.
struct Inspect<F>(F);

impl<F> ShutdownSignal for Inspect<F>
where
    F: Fn() + Send + Sync,
{
    fn wait(&self) -> Result<(), ShutdownError> {
        (self.0)();
        Ok(())
    }
}

fn immediate() -> MockShutdown {
    let mut shutdown = MockShutdown::new();
    shutdown.expect_wait().times(1).returning(|| Ok(()));
    shutdown
}

fn service() -> ServiceDescriptor {
    ServiceDescriptor::new("billing", "invoices", "2.0.0").with_address("127.0.0.1", 9000)
}

struct Memory {
    registry: Registry,
    backend: Arc<MemoryBackend>,
}

#[fixture]
fn memory() -> Memory {
    let registry = Registry::new();
    let backend = herald_plugin_memory::register(&registry);
    Memory { registry, backend }
}

fn selecting(name: &str) -> Resolver<Selectors> {
    Resolver::new(Selectors::new(None, None, Some(name)))
}

fn service_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create service file");
    let body = serde_json::to_string(&service()).expect("serialise service");
    file.write_all(body.as_bytes()).expect("write service file");
    file
}

fn config_for(file: &NamedTempFile, both: Option<&str>) -> HeraldConfig {
    let path = file.path().to_str().expect("utf-8 temp path");
    HeraldConfig {
        log_filter: "off".to_owned(),
        service_file: path.into(),
        selectors: Selectors::new(None, None, both),
        ..HeraldConfig::default()
    }
}

#[rstest]
fn announces_until_shutdown(memory: Memory) {
    let backend = Arc::clone(&memory.backend);
    let shutdown = Inspect(move || {
        assert_eq!(backend.pooled(), vec![service()]);
        assert_eq!(backend.declared(), vec![service()]);
    });

    let herald = announce(
        &memory.registry,
        &selecting(NAME),
        &StaticIdentity::new(service()),
        &shutdown,
    )
    .expect("announce");

    assert!(herald.pool().is_some());
    assert!(memory.backend.pooled().is_empty());
    assert_eq!(memory.backend.declared(), vec![service()]);
}

#[rstest]
fn unknown_backend_fails_to_bind(memory: Memory) {
    let mut shutdown = MockShutdown::new();
    shutdown.expect_wait().never();

    let error = announce(
        &memory.registry,
        &selecting("etcd"),
        &StaticIdentity::new(service()),
        &shutdown,
    )
    .expect_err("etcd is not bundled");

    let AgentError::Bind(bind) = &error else {
        panic!("expected bind error, got {error:?}");
    };
    assert!(matches!(bind.error(), HeraldError::UnrecognizedPool { name } if name == "etcd"));
    assert!(!memory.backend.is_initialised());
    assert_eq!(error.exit_code(), 1);
}

#[rstest]
fn nothing_selected_still_waits(memory: Memory) {
    let herald = announce(
        &memory.registry,
        &Resolver::new(Selectors::default()),
        &StaticIdentity::new(service()),
        &immediate(),
    )
    .expect("announce without backends");

    assert!(herald.pool().is_none());
    assert!(herald.declaration().is_none());
    assert!(!memory.backend.is_initialised());
}

#[rstest]
fn pool_is_left_when_waiting_fails(memory: Memory) {
    let mut shutdown = MockShutdown::new();
    shutdown.expect_wait().times(1).returning(|| {
        Err(ShutdownError::Install {
            source: io::Error::other("signals unavailable"),
        })
    });

    let error = announce(
        &memory.registry,
        &selecting(NAME),
        &StaticIdentity::new(service()),
        &shutdown,
    )
    .expect_err("wait fails");

    assert!(matches!(error, AgentError::Shutdown { .. }));
    assert!(memory.backend.pooled().is_empty());
}

#[test]
fn run_with_reads_the_service_file() {
    let file = service_file();
    let loader = StaticConfigLoader::new(config_for(&file, Some(NAME)));

    run_with(&loader, &immediate()).expect("agent run");
}

#[test]
fn run_with_reports_a_missing_service_file() {
    let file = service_file();
    let mut config = config_for(&file, Some(NAME));
    config.service_file = file.path().with_extension("missing").to_str().expect("utf-8").into();
    let mut shutdown = MockShutdown::new();
    shutdown.expect_wait().never();

    let error = run_with(&StaticConfigLoader::new(config), &shutdown).expect_err("no file");

    let AgentError::Bind(bind) = &error else {
        panic!("expected bind error, got {error:?}");
    };
    assert!(matches!(bind.error(), HeraldError::Identity(_)));
    assert!(bind.partial().is_none());
}

#[rstest]
#[case(&["heraldd", "--log-format", "yaml"], 2)]
#[case(&["heraldd", "--help"], 0)]
fn configuration_errors_follow_clap_exit_codes(#[case] args: &[&str], #[case] expected: u8) {
    let error = HeraldConfig::load_from_iter(args.iter().map(Into::into))
        .map_err(AgentError::from)
        .expect_err("configuration should not load");
    assert_eq!(error.exit_code(), expected);
}
