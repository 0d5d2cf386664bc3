//! Utility functions and traits for `ChainedHashMap`

use crate::{ChainedHashMap, Comparator, KeyHasher};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<K, V> {
    /// Returns the keys of the hash map as a Vec, in iteration order
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the hash map as a Vec, in iteration order
    fn values(&self) -> Vec<V>;

    /// Returns true if the hash map contains the given key
    fn contains_key(&self, key: &K) -> bool;
}

impl<K, V, C, H> HashMapExtensions<K, V> for ChainedHashMap<K, V, C, H>
where
    K: Clone,
    V: Clone,
    C: Comparator<K>,
    H: KeyHasher<K>,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// Creates a `ChainedHashMap` from an iterator of key-value pairs, later pairs overwriting
/// earlier ones with an equal key
pub fn from_iter_with<K, V, C, I>(comparator: C, iter: I) -> ChainedHashMap<K, V, C>
where
    C: Comparator<K>,
    K: AsRef<[u8]>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::new(comparator);
    map.extend(iter);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StrCmp, djb2};

    #[test]
    fn test_from_iter_with() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)];

        let map = from_iter_with(StrCmp, data);

        assert_eq!(map.get(&"a".to_string()), Some(&3));
        assert_eq!(map.get(&"b".to_string()), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_keys_follow_bucket_order() {
        let mut map = ChainedHashMap::new(StrCmp);
        for key in ["delta", "alpha", "charlie", "bravo"] {
            map.put(key, key.len());
        }

        let mut expected = vec!["delta", "alpha", "charlie", "bravo"];
        expected.sort_by_key(|key| djb2(key.as_bytes()) % map.capacity());

        assert_eq!(map.keys(), expected);
        assert_eq!(map.values(), expected.iter().map(|key| key.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_contains_key_after_remove() {
        let mut map = ChainedHashMap::new(StrCmp);
        map.put("a", 1);

        assert!(map.remove(&"a"));
        // The entry stays linked, so the key is still found
        assert!(map.contains_key(&"a"));
        assert!(!map.contains_key(&"b"));
    }
}
