//! Sample file loading.
//!
//! Input files are plain text: comma-separated numbers, possibly spread over
//! several lines, no header. Empty tokens (trailing commas, blank lines) are
//! skipped; anything else must parse as a finite `f64`.
//!
//! Every load starts with an explicit readability check so a missing file and
//! an unreadable one are reported as such, before any parsing happens.

use std::fs::File;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use crate::error::{AppError, ErrorKind};

/// A raw token and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: u64,
    pub text: String,
}

/// Fail with `FileNotFound` / `NotReadable` unless `path` is a readable regular file.
pub fn check_readable(path: &Path) -> Result<(), AppError> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => AppError::new(
            ErrorKind::FileNotFound,
            format!("Data file '{}' does not exist.", path.display()),
        ),
        _ => AppError::new(
            ErrorKind::NotReadable,
            format!("Data file '{}' is not accessible: {e}", path.display()),
        ),
    })?;

    if !meta.is_file() {
        return Err(AppError::new(
            ErrorKind::NotReadable,
            format!("Data file '{}' is not a regular file.", path.display()),
        ));
    }

    // Metadata can be readable while the content is not (permissions).
    File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::NotReadable,
            format!("Data file '{}' is not readable: {e}", path.display()),
        )
    })?;

    Ok(())
}

/// Read all non-empty tokens of `path` in file order.
pub fn read_tokens(path: &Path) -> Result<Vec<Token>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::NotReadable,
            format!("Failed to open data file '{}': {e}", path.display()),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut tokens = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| read_error(path, &e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        tokens.extend(
            record
                .iter()
                .filter(|field| !field.is_empty())
                .map(|field| Token {
                    line,
                    text: field.to_string(),
                }),
        );
    }

    Ok(tokens)
}

/// Check, read and parse one sample file.
pub fn load_series(path: &Path) -> Result<Vec<f64>, AppError> {
    check_readable(path)?;
    let tokens = read_tokens(path)?;

    let values = tokens
        .iter()
        .map(|tok| parse_token(path, tok))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("loaded {} samples from '{}'", values.len(), path.display());
    Ok(values)
}

fn parse_token(path: &Path, tok: &Token) -> Result<f64, AppError> {
    match tok.text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(AppError::new(
            ErrorKind::ParseError,
            format!(
                "'{}': line {}: '{}' is not a finite number.",
                path.display(),
                tok.line,
                tok.text
            ),
        )),
        Err(_) => Err(AppError::new(
            ErrorKind::ParseError,
            format!("'{}': line {}: '{}' is not a number.", path.display(), tok.line, tok.text),
        )),
    }
}

fn read_error(path: &Path, e: &csv::Error) -> AppError {
    let kind = match e.kind() {
        csv::ErrorKind::Io(_) => ErrorKind::NotReadable,
        _ => ErrorKind::ParseError,
    };
    AppError::new(kind, format!("Failed to read data file '{}': {e}", path.display()))
}
