//! Output format of the agent's log stream.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the agent renders its events on stderr.
///
/// Selected with `--log-format` or `HERALD_LOG_FORMAT`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, for sidecars whose stderr is shipped to a
    /// log collector.
    #[default]
    Json,
    /// Terse single-line text for running the agent by hand.
    Compact,
}

/// Error returned when `--log-format` names an unknown format.
pub type LogFormatParseError = strum::ParseError;
