//! Validated stored-file names.
//!
//! Every name that reaches the filesystem goes through [`FileName::parse`], so a
//! `FileName` is always a single, non-reserved path component inside the store.

use std::fmt;

use sanitize_filename::{OptionsForCheck, is_sanitized_with_options};

use crate::sys_fileapi::error::StoreError;

/// Longest single path component most filesystems accept.
const MAX_NAME_BYTES: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    /// Accept `raw` verbatim or reject it. Names are never rewritten, so the
    /// stored name is always the one the client sent.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidName(raw.to_string());

        if raw.is_empty() || raw == "." || raw == ".." {
            return Err(invalid());
        }
        if raw.contains(['/', '\\']) || raw.chars().any(char::is_control) {
            return Err(invalid());
        }
        if raw.len() > MAX_NAME_BYTES {
            return Err(invalid());
        }

        // Device names, `:` and trailing dots only matter to Windows filesystems.
        if cfg!(windows) {
            let options = OptionsForCheck {
                windows: true,
                truncate: true,
            };
            if !is_sanitized_with_options(raw, options) {
                return Err(invalid());
            }
        }

        Ok(Self(raw.to_string()))
    }

    /// Parse a percent-encoded URL path segment.
    pub fn from_path_segment(segment: &str) -> Result<Self, StoreError> {
        let decoded = urlencoding::decode(segment)
            .map_err(|_| StoreError::InvalidName(segment.to_string()))?;
        Self::parse(&decoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
