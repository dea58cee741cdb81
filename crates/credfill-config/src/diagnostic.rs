// SPDX-FileCopyrightText: 2026 Credfill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for rejected configuration.
//!
//! Figment errors are flattened into [`ConfigError`]s. Unknown keys carry a
//! label pointing into the offending TOML file and a "did you mean" hint.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(credfill::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), known))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted by the section the unknown key appeared in.
        known: Vec<String>,
        #[label("not a credfill setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value could not be read as the type its key requires.
    #[error("invalid type for key `{key}`: found {found}")]
    #[diagnostic(code(credfill::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    /// Parsed fine but breaks a semantic constraint.
    #[error("validation error: {message}")]
    #[diagnostic(code(credfill::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(credfill::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, known: &[String]) -> String {
    let known = known.join(", ");
    match suggestion {
        Some(key) => format!("did you mean `{key}`? Known keys here: {known}"),
        None => format!("known keys here: {known}"),
    }
}

/// Flatten a figment error chain into diagnostics.
///
/// `toml_sources` holds `(path, contents)` pairs used to label unknown keys.
/// When the error carries no file path (inline strings, defaults) a lone
/// entry is searched instead.
pub fn figment_to_config_errors(
    err: FigmentError,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(key, expected) => {
                let (span, src) = label_unknown_key(&error, key, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: key.clone(),
                    suggestion: suggest_key(key, expected),
                    known: expected.iter().map(|k| k.to_string()).collect(),
                    span,
                    src,
                }
            }
            Kind::InvalidType(found, expected) | Kind::InvalidValue(found, expected) => {
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    found: found.to_string(),
                    expected: expected.clone(),
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

fn label_unknown_key(
    error: &FigmentError,
    key: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let (name, content) = match error.metadata.as_ref().and_then(|m| m.source.as_ref()) {
        Some(figment::Source::File(path)) => {
            let path = path.display().to_string();
            toml_sources.iter().find(|(p, _)| *p == path)?
        }
        _ => match toml_sources {
            [only] => only,
            _ => return None,
        },
    };

    let offset = find_key_offset(content, error.path.first().map(String::as_str), key)?;
    Some((
        SourceSpan::new(offset.into(), key.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `key` inside the `[section]` table of `content`, or among
/// the top-level keys when `section` is `None`.
///
/// Only the lines between the matching header and the next header are
/// searched, so a same-named key in another table is never picked.
pub fn find_key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            current = Some(header.trim());
            continue;
        }
        if current != section {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let is_key = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            return Some(start + indent);
        }
    }

    None
}

/// Closest known key to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print every error to stderr with miette's graphical report.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprint!("{}", render_error(error));
    }
}

fn render_error(error: &ConfigError) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, error) {
        Ok(()) => out,
        Err(_) => format!("Error: {error}\n"),
    }
}
