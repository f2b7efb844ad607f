use camino::Utf8PathBuf;

/// Default log filter expression used by the agent.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default location of the JSON service definition.
pub const DEFAULT_SERVICE_FILE: &str = "service.json";

/// Default log filter expression used by the agent.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the agent.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Default path of the service definition read at startup.
#[must_use]
pub fn default_service_file() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_SERVICE_FILE)
}
