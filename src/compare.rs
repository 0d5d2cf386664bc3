//! Key equality for `ChainedHashMap`.
//!
//! The map never requires `K: Eq`. Two keys are the same key exactly when the map's
//! [`Comparator`] returns [`Ordering::Equal`] for them.

use std::cmp::Ordering;

/// Three-way comparison between two keys. Only `Ordering::Equal` is significant to the map.
pub trait Comparator<K: ?Sized> {
    /// Compares `lhs` against `rhs`.
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;

    /// Returns true if `lhs` and `rhs` denote the same key
    fn same_key(&self, lhs: &K, rhs: &K) -> bool {
        self.compare(lhs, rhs) == Ordering::Equal
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

/// Comparator for byte-string keys, pairing with [`Djb2`](crate::Djb2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrCmp;

impl<K> Comparator<K> for StrCmp
where
    K: AsRef<[u8]> + ?Sized,
{
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        str_cmp(lhs.as_ref(), rhs.as_ref())
    }
}

/// Compares two C-style strings byte by byte as unsigned values.
///
/// Each side ends at its first NUL byte or at the end of the slice, whichever comes first.
/// A string that is a strict prefix of the other orders first.
///
/// ```rust
/// use std::cmp::Ordering;
/// use chainmap::str_cmp;
///
/// assert_eq!(str_cmp(b"abc", b"abd"), Ordering::Less);
/// assert_eq!(str_cmp(b"abc\0x", b"abc"), Ordering::Equal);
/// ```
#[must_use]
pub fn str_cmp(lhs: &[u8], rhs: &[u8]) -> Ordering {
    until_nul(lhs).cmp(until_nul(rhs))
}

/// Truncates `bytes` at the first NUL
fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&byte| byte == 0) {
        Some(end) => bytes.get(..end).unwrap_or(bytes),
        None => bytes,
    }
}
