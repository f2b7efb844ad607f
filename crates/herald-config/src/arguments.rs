//! Extraction of herald selector flags from a host process argument list.
//!
//! Host processes own their command line and usually define flags herald
//! knows nothing about. The helpers here pick out only the selector flags so
//! they can be parsed without tripping over unrelated arguments. Both the
//! single-dash spelling (`-herald-p etcd`) and the double-dash spelling
//! (`--herald-p=etcd`) are accepted; everything after `--` is ignored.

use std::ffi::{OsStr, OsString};

use crate::selectors::SELECTOR_FLAGS;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagAction {
    Include { flag: OsString, needs_value: bool },
    Skip,
}

fn process_selector_flag(argument: &OsStr) -> FlagAction {
    let Some(text) = argument.to_str() else {
        return FlagAction::Skip;
    };
    let Some(body) = text.strip_prefix("--").or_else(|| text.strip_prefix('-')) else {
        return FlagAction::Skip;
    };

    let mut parts = body.splitn(2, '=');
    let name = parts.next().unwrap_or_default();
    let has_inline_value = parts.next().is_some();

    if SELECTOR_FLAGS.contains(&name) {
        return FlagAction::Include {
            flag: OsString::from(format!("--{body}")),
            needs_value: !has_inline_value,
        };
    }

    FlagAction::Skip
}

fn is_selector_flag(argument: &OsStr) -> bool {
    matches!(process_selector_flag(argument), FlagAction::Include { .. })
}

/// Filters `args` down to the program name followed by herald selector flags.
///
/// Flags are normalised to their double-dash spelling. A selector flag given
/// without an inline value consumes the following argument as its value,
/// unless that argument is itself a selector flag. In that case the first
/// one is taken to be a host flag's value and dropped.
#[must_use]
pub fn selector_arguments<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut remaining = args.into_iter().peekable();
    let mut filtered = Vec::new();
    let Some(program) = remaining.next() else {
        return filtered;
    };
    filtered.push(program);

    while let Some(argument) = remaining.next() {
        if argument == "--" {
            break;
        }
        let FlagAction::Include { flag, needs_value } = process_selector_flag(&argument) else {
            continue;
        };
        if !needs_value {
            filtered.push(flag);
            continue;
        }
        if remaining.peek().is_some_and(|next| is_selector_flag(next)) {
            continue;
        }
        filtered.push(flag);
        if let Some(value) = remaining.next() {
            filtered.push(value);
        }
    }

    filtered
}
