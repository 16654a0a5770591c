//! Shard assignment for dex archive entries.

use crate::fnv::fnv1a32;
use thiserror::Error;

/// Result type alias for shard assignment.
pub type Result<T> = std::result::Result<T, ShardError>;

/// Errors from shard assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShardError {
    /// The entry name does not carry a dex suffix. Dex archives only ever
    /// contain `.dex` or `.class.dex` entries, so this indicates a bug in
    /// the upstream dex compilation step.
    #[error("Name expected to end with '.dex' or '.class.dex', was: {0}")]
    InvalidEntryName(String),
}

const CLASS_DEX_SUFFIX: &str = ".class.dex";
const DEX_SUFFIX: &str = ".dex";

/// Compute the shard index for a dex entry name.
///
/// A class and all its inner classes hash on the shared name prefix before
/// the first `$` or `-`, so they land in the same shard. This also covers
/// D8 synthetics, which are named `<context>$$ExternalSyntheticXXXN` and
/// must be co-resident with their context class.
///
/// The marker scan runs over the whole name from the start, not just the
/// region before the stripped suffix; a marker occurring later still wins.
/// Historical shard assignments depend on this scan order.
pub fn shard_index(name: &str, shard_count: usize) -> Result<usize> {
    debug_assert!(shard_count > 0, "shard_count must be positive");

    let mut index = name.len();
    if name.ends_with(CLASS_DEX_SUFFIX) {
        // The dex compiler's intermediate archives use .class.dex entries
        index -= CLASS_DEX_SUFFIX.len();
    } else if name.ends_with(DEX_SUFFIX) {
        // D8 emits .dex entries
        index -= DEX_SUFFIX.len();
    } else {
        return Err(ShardError::InvalidEntryName(name.to_string()));
    }

    if let Some(marker) = name.find(['$', '-']) {
        index = marker;
    }

    let hash = fnv1a32(name[..index].as_bytes());
    Ok(hash as usize % shard_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_always_in_range() {
        let names = [
            "Foo.dex",
            "com/a/Foo.dex",
            "com/a/Foo$Inner.dex",
            "com/a/Foo.class.dex",
            "a/b/c/VeryLongClassName$$ExternalSyntheticLambda0.dex",
        ];
        for shard_count in [1, 2, 3, 7, 8, 64, 256] {
            for name in names {
                let index = shard_index(name, shard_count).unwrap();
                assert!(index < shard_count, "{name} -> {index} of {shard_count}");
            }
        }
    }

    #[test]
    fn test_single_shard_always_zero() {
        assert_eq!(shard_index("com/a/Foo.dex", 1).unwrap(), 0);
        assert_eq!(shard_index("com/a/Foo$Bar.dex", 1).unwrap(), 0);
    }

    #[test]
    fn test_inner_classes_share_shard() {
        let base = shard_index("com/a/Foo.dex", 8).unwrap();
        assert_eq!(shard_index("com/a/Foo$Inner.dex", 8).unwrap(), base);
        assert_eq!(
            shard_index("com/a/Foo$$ExternalSyntheticLambda0.dex", 8).unwrap(),
            base
        );
        assert_eq!(shard_index("com/a/Foo-CC.dex", 8).unwrap(), base);
        assert_eq!(shard_index("com/a/Foo-1.dex", 8).unwrap(), base);
    }

    #[test]
    fn test_class_dex_and_dex_suffixes_agree() {
        assert_eq!(
            shard_index("com/a/Foo.class.dex", 16).unwrap(),
            shard_index("com/a/Foo.dex", 16).unwrap()
        );
    }

    #[test]
    fn test_known_assignment() {
        // fnv1a32(b"com/a/Foo") == 1358649461
        assert_eq!(shard_index("com/a/Foo.dex", 8).unwrap(), 1_358_649_461 % 8);
    }

    #[test]
    fn test_leading_marker_hashes_empty_prefix() {
        // fnv1a32(b"") == 2166136261
        let index = shard_index("$Foo.dex", 4).unwrap();
        assert_eq!(index, 2_166_136_261usize % 4);
    }

    #[test]
    fn test_invalid_suffix_rejected() {
        let err = shard_index("Foo.txt", 4).unwrap_err();
        assert_eq!(err, ShardError::InvalidEntryName("Foo.txt".to_string()));

        assert!(shard_index("Foo.class", 4).is_err());
        assert!(shard_index("Foo.dex.bak", 4).is_err());
    }

    #[test]
    fn test_marker_wins_over_suffix_trim() {
        // The scan starts at the beginning of the name, so the first
        // marker sets the hash boundary even with a long suffix.
        assert_eq!(
            shard_index("a$b/c.class.dex", 8).unwrap(),
            shard_index("a$other.dex", 8).unwrap()
        );
    }
}
