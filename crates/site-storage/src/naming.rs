//! Object naming for uploaded photos.
//!
//! Objects land at `<prefix>/<submission millis>-<random hex>-<file name>`, so
//! two uploads of the same file never collide.

use chrono::{DateTime, Utc};

use crate::error::StorageError;

const MAX_FILE_NAME_LEN: usize = 100;
const FALLBACK_FILE_NAME: &str = "photo";
const RANDOM_BYTES: usize = 4;

/// Reduce a user-supplied file name to a safe object key segment.
///
/// Directory components are dropped, anything outside `[A-Za-z0-9._-]` becomes
/// `_`, and leading dots are stripped.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return FALLBACK_FILE_NAME.to_string();
    }
    cleaned.chars().take(MAX_FILE_NAME_LEN).collect()
}

/// Random lowercase hex string of `2 * RANDOM_BYTES` characters.
///
/// # Errors
///
/// Returns `StorageError::Random` if the OS random source fails.
pub fn random_hex() -> Result<String, StorageError> {
    let mut bytes = [0u8; RANDOM_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| StorageError::Random(e.to_string()))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// Full object key for a photo submitted at `submitted_at`.
///
/// # Errors
///
/// Returns `StorageError::Random` if the random suffix cannot be generated.
pub fn object_name(
    prefix: &str,
    submitted_at: DateTime<Utc>,
    file_name: &str,
) -> Result<String, StorageError> {
    let leaf = format!(
        "{}-{}-{}",
        submitted_at.timestamp_millis(),
        random_hex()?,
        sanitize_file_name(file_name)
    );
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        Ok(leaf)
    } else {
        Ok(format!("{prefix}/{leaf}"))
    }
}
