// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Resolve a form field argument. `@path` reads the field from a file,
/// `@@text` passes a literal value starting with `@`, anything else is
/// used as-is.
pub fn resolve_field_arg(raw: &str) -> Result<String> {
    if let Some(literal) = raw.strip_prefix("@@") {
        return Ok(format!("@{}", literal));
    }

    match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read field from file: {}", path)),
        None => Ok(raw.to_string()),
    }
}

/// Show only the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
