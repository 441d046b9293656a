//! Storage key construction and validation.

use crate::traits::{StorageError, StorageResult};

/// Identifiers are generated UUIDs; anything outside this alphabet is rejected.
pub(crate) fn validate_identifier(identifier: &str) -> StorageResult<()> {
    if identifier.is_empty()
        || !identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(format!(
            "Invalid image identifier: {}",
            identifier
        )));
    }
    Ok(())
}

pub(crate) fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty()
        || storage_key.contains("..")
        || storage_key.contains('/')
        || storage_key.contains('\\')
        || storage_key.starts_with('.')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn make_key(identifier: &str, extension: &str) -> StorageResult<String> {
    validate_identifier(identifier)?;
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(StorageError::InvalidKey(format!(
            "Invalid file extension: {}",
            extension
        )));
    }
    Ok(format!("{}.{}", identifier, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_strips_leading_dot() {
        assert_eq!(make_key("abc-123", ".png").unwrap(), "abc-123.png");
        assert_eq!(make_key("abc-123", "jpg").unwrap(), "abc-123.jpg");
    }

    #[test]
    fn test_make_key_rejects_bad_parts() {
        assert!(make_key("../etc", "png").is_err());
        assert!(make_key("abc", "p/ng").is_err());
        assert!(make_key("", "png").is_err());
        assert!(make_key("abc", "").is_err());
    }

    #[test]
    fn test_validate_identifier_rejects_glob_and_separators() {
        assert!(validate_identifier("abc*").is_err());
        assert!(validate_identifier("a/b").is_err());
        assert!(validate_identifier("a.b").is_err());
        assert!(validate_identifier("0b7e4a52-9a8e-4c55-8f3e-2f5d1c0e9a11").is_ok());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("abc.png").is_ok());
        assert!(validate_key("../abc.png").is_err());
        assert!(validate_key("sub/abc.png").is_err());
        assert!(validate_key(".hidden").is_err());
    }
}
