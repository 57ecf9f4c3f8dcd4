//! Logical ID allocation.
//!
//! A resource's logical ID is derived from its construct path only: the
//! path components (minus the conventional `Resource` leaf) concatenated,
//! followed by eight uppercase hex digits of the path's SHA-256. Property
//! values and the stack name never feed into it, so editing a property or
//! deploying to another environment never renames a resource.

use sha2::{Digest, Sha256};

/// Leaf name used for a construct's primary resource.
pub const PRIMARY: &str = "Resource";

const HASH_LEN: usize = 8;

/// Compute the logical ID for a construct path such as
/// `["InputBucket", "Resource"]`.
///
/// # Examples
///
/// ```
/// use stackgen_synth::logical_id::logical_id;
///
/// let id = logical_id(&["InputBucket", "Resource"]);
/// assert!(id.starts_with("InputBucket"));
/// assert_eq!(id.len(), "InputBucket".len() + 8);
/// ```
#[must_use]
pub fn logical_id(path: &[&str]) -> String {
    let human: String = path
        .iter()
        .filter(|c| **c != PRIMARY)
        .flat_map(|c| c.chars().filter(char::is_ascii_alphanumeric))
        .collect();

    let digest = Sha256::digest(path.join("/").as_bytes());
    let hash = hex::encode_upper(digest);

    format!("{human}{}", &hash[..HASH_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_drop_primary_leaf_from_human_part() {
        let id = logical_id(&["InputBucket", "Resource"]);
        assert!(id.starts_with("InputBucket"));
        assert!(!id.contains("Resource"));
    }

    #[test]
    fn test_should_keep_secondary_leaf_in_human_part() {
        let id = logical_id(&["InputBucket", "Policy"]);
        assert!(id.starts_with("InputBucketPolicy"));
    }

    #[test]
    fn test_should_be_stable_and_path_sensitive() {
        assert_eq!(logical_id(&["A", "Resource"]), logical_id(&["A", "Resource"]));
        assert_ne!(logical_id(&["A", "Resource"]), logical_id(&["A", "Other"]));
        assert_ne!(logical_id(&["AB", "Resource"]), logical_id(&["A", "B"]));
    }

    #[test]
    fn test_should_use_uppercase_hex_suffix() {
        let id = logical_id(&["Fn", "Resource"]);
        let suffix = &id[id.len() - HASH_LEN..];
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
