//! # Chained Hash Map
//!
//! A Rust implementation of a separate-chaining hash table whose key equality is supplied by
//! the caller.
//!
//! `ChainedHashMap` places keys with a pluggable [`KeyHasher`] (djb2 over the key's bytes by
//! default) and tells them apart with a pluggable [`Comparator`] ([`StrCmp`] for byte strings).
//! Each bucket holds a chain that only grows at its tail. Once the load factor reaches 70% the
//! next insertion triples the bucket array; the table never shrinks.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::{ChainedHashMap, StrCmp};
//!
//! // Create a new table comparing keys as C strings
//! let mut map = ChainedHashMap::new(StrCmp);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get(&"apple".to_string()), Some(&1));
//!
//! // Update values; the displaced value is handed back
//! assert_eq!(map.put("apple".to_string(), 10), Some(1));
//! assert_eq!(map.len(), 2);
//!
//! // Walk the table until the callback says stop
//! let mut seen = 0;
//! let completed = map.for_each(|_, _| {
//!     seen += 1;
//!     true
//! });
//! assert!(completed);
//! assert_eq!(seen, 2);
//!
//! // Tear down, releasing every key and value
//! map.delete_with(drop, drop);
//! ```
//!
//! ## Removal
//!
//! `remove_with` hands the matching key and value to caller-supplied callbacks and reports
//! whether a match was found. The entry itself stays in its chain, still counted by `len` and
//! still released by `delete_with`:
//!
//! ```rust
//! use chainmap::{ChainedHashMap, StrCmp};
//!
//! let mut map = ChainedHashMap::new(StrCmp);
//! map.put("a", 1);
//! map.put("b", 2);
//!
//! let mut released = Vec::new();
//! assert!(map.remove_with(&"a", |_| {}, |value| released.push(*value)));
//! assert_eq!(released, [1]);
//! assert_eq!(map.len(), 2);
//! ```
//!
//! ## Custom Keys
//!
//! Keys that are not byte strings bring their own hasher, which must agree with the
//! comparator:
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::with_hasher(
//!     |lhs: &u32, rhs: &u32| lhs.cmp(rhs),
//!     |key: &u32| *key as usize,
//! );
//! map.put(7, "seven");
//! assert_eq!(map.get(&7), Some(&"seven"));
//! ```

/// Module implementing the separate-chaining table
mod chained_hashmap;
/// Key equality capability and the byte-string comparator
mod compare;
/// Resize failures and the fatal abort path
mod error;
/// Key hashing capability and the djb2 hasher
mod hash;
/// Logger setup for binaries
pub mod logger;
/// Utility functions and traits for the hash map
mod utils;

pub use chained_hashmap::{
    ChainedHashMap, GROWTH_FACTOR, INITIAL_CAPACITY, Iter, LOAD_FACTOR_THRESHOLD,
};
pub use compare::{Comparator, StrCmp, str_cmp};
pub use error::{CapacityError, fatal};
pub use hash::{Djb2, KeyHasher, djb2};
pub use utils::{HashMapExtensions, from_iter_with};
