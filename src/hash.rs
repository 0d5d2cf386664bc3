//! Key hashing for `ChainedHashMap`.
//!
//! Bucket placement is decided by a [`KeyHasher`] that travels with the map next to its
//! [`Comparator`](crate::Comparator). Any two keys the comparator reports as equal must hash
//! to the same value, otherwise they land in different chains and are never compared.

/// Seed of the djb2 recurrence
const DJB2_SEED: usize = 5381;

/// Computes a bucket-independent hash for a key.
pub trait KeyHasher<K: ?Sized> {
    /// Returns the hash of `key`. The map reduces it modulo its capacity.
    fn hash_key(&self, key: &K) -> usize;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K) -> usize,
{
    fn hash_key(&self, key: &K) -> usize {
        self(key)
    }
}

/// The default hasher: djb2 over the key's bytes, up to the first NUL.
///
/// ```rust
/// use chainmap::{Djb2, KeyHasher, djb2};
///
/// assert_eq!(Djb2.hash_key("a"), djb2(b"a"));
/// assert_eq!(Djb2.hash_key("ab\0cd"), djb2(b"ab"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Djb2;

impl<K> KeyHasher<K> for Djb2
where
    K: AsRef<[u8]> + ?Sized,
{
    fn hash_key(&self, key: &K) -> usize {
        djb2(key.as_ref())
    }
}

/// Hashes `bytes` with `h = h * 33 + byte`, starting from 5381.
///
/// The input is treated as a C string: hashing stops at the first NUL byte, so `b"key"` and
/// `b"key\0junk"` hash identically. Arithmetic wraps at the width of `usize`.
#[must_use]
pub fn djb2(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|&&byte| byte != 0)
        .fold(DJB2_SEED, |hash, &byte| (hash << 5).wrapping_add(hash).wrapping_add(usize::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_seed() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(djb2(b"\0abc"), 5381);
    }

    #[test]
    fn test_known_values() {
        // 5381 * 33 + 'a'
        assert_eq!(djb2(b"a"), 177_670);
        // 177670 * 33 + 'b'
        assert_eq!(djb2(b"ab"), 5_863_208);
    }

    #[test]
    fn test_stops_at_nul() {
        assert_eq!(djb2(b"key\0junk"), djb2(b"key"));
        assert_ne!(djb2(b"keyjunk"), djb2(b"key"));
    }

    #[test]
    fn test_hasher_matches_free_function() {
        assert_eq!(Djb2.hash_key("hello"), djb2(b"hello"));
        assert_eq!(Djb2.hash_key(&String::from("hello")), djb2(b"hello"));
        assert_eq!(Djb2.hash_key(&b"hello"[..]), djb2(b"hello"));
    }

    #[test]
    fn test_closure_hasher() {
        let by_len = |key: &str| key.len();
        assert_eq!(by_len.hash_key("four"), 4);
    }
}
