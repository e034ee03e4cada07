//! JSON and JSONL encoding of beans.
//!
//! Beans encode to a single JSON object; JSONL holds one bean per line.
//! Decoding checks the header version against the configured policy and can
//! optionally run the bean's validation rules.

use std::io::{self, BufRead, Write};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::bean::CURRENT_PROPERTIES_VERSION;
use crate::validation::{Validate, ValidationError};

/// Error type for codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    #[error("header version {found} is newer than supported version {supported}")]
    HeaderTooNew { found: i64, supported: i64 },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<CodecError>,
    },
}

impl CodecError {
    fn json(source: serde_json::Error) -> Self {
        Self::Json {
            line: source.line(),
            source,
        }
    }

    fn at_line(self, line: usize) -> Self {
        match self {
            Self::Json { source, .. } => Self::Json { line, source },
            other => Self::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// What to do with a document whose header version is newer than supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    Accept,
    #[default]
    Warn,
    Reject,
}

/// Whether decoding runs the bean's validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    None,
    Warn,
    Error,
}

/// Options for [`decode_with`] and [`read_jsonl_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_header_version: i64,
    pub newer_header: HeaderPolicy,
    pub validation: ValidationMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_header_version: CURRENT_PROPERTIES_VERSION,
            newer_header: HeaderPolicy::Warn,
            validation: ValidationMode::None,
        }
    }
}

/// Encodes a bean as compact JSON.
pub fn to_json<T: Serialize + ?Sized>(bean: &T) -> Result<String> {
    serde_json::to_string(bean).map_err(CodecError::json)
}

/// Encodes a bean as indented JSON.
pub fn to_json_pretty<T: Serialize + ?Sized>(bean: &T) -> Result<String> {
    serde_json::to_string_pretty(bean).map_err(CodecError::json)
}

/// Encodes a bean, indented when `pretty` is set.
pub fn encode<T: Serialize + ?Sized>(bean: &T, pretty: bool) -> Result<String> {
    if pretty {
        to_json_pretty(bean)
    } else {
        to_json(bean)
    }
}

/// Decodes a bean with no header or validation checks.
///
/// Unknown properties are ignored.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(CodecError::json)
}

/// Decodes a bean, applying the header policy and validation mode.
pub fn decode_with<T: DeserializeOwned + Validate>(options: &DecodeOptions, text: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(CodecError::json)?;
    check_header(options, &value)?;
    let bean: T = serde_json::from_value(value).map_err(CodecError::json)?;

    match options.validation {
        ValidationMode::None => {}
        ValidationMode::Warn => {
            if let Err(e) = bean.validate() {
                tracing::warn!(error = %e, "decoded bean failed validation");
            }
        }
        ValidationMode::Error => bean.validate()?,
    }
    Ok(bean)
}

fn check_header(options: &DecodeOptions, value: &serde_json::Value) -> Result<()> {
    let found = value
        .get("headerVersion")
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(CURRENT_PROPERTIES_VERSION);
    if found <= options.max_header_version {
        return Ok(());
    }
    match options.newer_header {
        HeaderPolicy::Accept => Ok(()),
        HeaderPolicy::Warn => {
            tracing::warn!(
                found,
                supported = options.max_header_version,
                "header version is newer than supported, decoding anyway"
            );
            Ok(())
        }
        HeaderPolicy::Reject => Err(CodecError::HeaderTooNew {
            found,
            supported: options.max_header_version,
        }),
    }
}

/// Writes beans as JSONL to the given writer.
///
/// Each bean is written as a single JSON line followed by a newline.
pub fn write_jsonl<W: Write, T: Serialize>(writer: &mut W, beans: &[T]) -> Result<()> {
    for (i, bean) in beans.iter().enumerate() {
        serde_json::to_writer(&mut *writer, bean)
            .map_err(|e| CodecError::Json { line: i + 1, source: e })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Returns an iterator that reads beans from a JSONL reader with default
/// options. Empty lines are skipped.
pub fn read_jsonl<T, R: BufRead>(reader: R) -> JsonlIter<R, T> {
    read_jsonl_with(reader, DecodeOptions::default())
}

/// Returns an iterator that reads beans from a JSONL reader, decoding each
/// line with [`decode_with`].
pub fn read_jsonl_with<T, R: BufRead>(reader: R, options: DecodeOptions) -> JsonlIter<R, T> {
    JsonlIter {
        reader,
        options,
        line_number: 0,
        _bean: PhantomData,
    }
}

/// Iterator over JSONL-encoded beans.
pub struct JsonlIter<R, T> {
    reader: R,
    options: DecodeOptions,
    line_number: usize,
    _bean: PhantomData<fn() -> T>,
}

impl<R: BufRead, T: DeserializeOwned + Validate> Iterator for JsonlIter<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(
                        decode_with(&self.options, trimmed)
                            .map_err(|e| e.at_line(self.line_number)),
                    );
                }
                Err(e) => return Some(Err(CodecError::Io(e))),
            }
        }
    }
}
