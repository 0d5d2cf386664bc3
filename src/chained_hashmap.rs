use std::{fmt, mem, slice};

use crate::{
    compare::{Comparator, StrCmp},
    error::{CapacityError, fatal},
    hash::{Djb2, KeyHasher},
};

/// Number of buckets a map starts with unless told otherwise
pub const INITIAL_CAPACITY: usize = 11;
/// Load factor, in percent, at which the next `put` grows the bucket array
pub const LOAD_FACTOR_THRESHOLD: usize = 70;
/// Multiplier applied to the capacity on every resize
pub const GROWTH_FACTOR: usize = 3;

/// One key-value pair in a chain
#[derive(Debug)]
struct Entry<K, V> {
    /// The key as handed to `put`
    key: K,
    /// The value last assigned to the key
    value: V,
}

/// Entries sharing one bucket index, in the order they were appended
type Chain<K, V> = Vec<Entry<K, V>>;

/// A hash table using separate chaining.
///
/// Keys are placed by a [`KeyHasher`] (djb2 by default) and told apart only by a
/// [`Comparator`]; neither `K: Hash` nor `K: Eq` is required. Every bucket holds a chain that
/// grows at its tail, so iteration visits buckets in index order and each chain in the order
/// its entries were appended.
///
/// The bucket array only ever grows. Once `len / capacity` reaches the load factor threshold
/// (70% by default) the next `put` first triples the capacity and replays every entry into the
/// new array.
///
/// `remove` and `remove_with` locate an entry and hand it to the caller's callbacks but leave
/// it linked in its chain: it is still counted by `len`, still visited by `iter`, and still
/// released by `delete_with`.
///
/// Note: This implementation is not thread-safe and performs no synchronization.
pub struct ChainedHashMap<K, V, C = StrCmp, H = Djb2> {
    /// One chain per bucket; never empty
    buckets: Vec<Chain<K, V>>,
    /// Number of entries linked into chains
    count: usize,
    /// Threshold for load factor before resizing - stored as percentage (1-95)
    load_factor_threshold: usize,
    /// Decides key equality
    comparator: C,
    /// Decides bucket placement
    hasher: H,
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: AsRef<[u8]>,
{
    fn default() -> Self {
        Self::new(StrCmp)
    }
}

impl<K, V, C, H> Extend<(K, V)> for ChainedHashMap<K, V, C, H>
where
    C: Comparator<K>,
    H: KeyHasher<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, C, H> fmt::Debug for ChainedHashMap<K, V, C, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashMap")
            .field("capacity", &self.buckets.len())
            .field("count", &self.count)
            .field("load_factor_threshold", &self.load_factor_threshold)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<K, V, C> ChainedHashMap<K, V, C, Djb2>
where
    K: AsRef<[u8]>,
    C: Comparator<K>,
{
    /// Creates an empty map with [`INITIAL_CAPACITY`] buckets and the djb2 hasher.
    ///
    /// ```rust
    /// use chainmap::{ChainedHashMap, StrCmp};
    ///
    /// let mut map = ChainedHashMap::new(StrCmp);
    /// map.put("a", 1);
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// ```
    #[must_use]
    pub fn new(comparator: C) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, comparator, Djb2)
    }

    /// Creates an empty map with `capacity` buckets (at least one) and the djb2 hasher
    #[must_use]
    pub fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self::with_capacity_and_hasher(capacity, comparator, Djb2)
    }
}

impl<K, V, C, H> ChainedHashMap<K, V, C, H>
where
    C: Comparator<K>,
    H: KeyHasher<K>,
{
    /// Creates an empty map with [`INITIAL_CAPACITY`] buckets and a custom hasher.
    ///
    /// The hasher must agree with the comparator: keys that compare equal must hash equal.
    #[must_use]
    pub fn with_hasher(comparator: C, hasher: H) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, comparator, hasher)
    }

    /// Creates an empty map with `capacity` buckets (at least one) and a custom hasher.
    ///
    /// Aborts the process if the bucket array cannot be allocated.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, comparator: C, hasher: H) -> Self {
        let buckets = allocate_buckets(capacity.max(1)).unwrap_or_else(|err| fatal(&err));

        Self { buckets, count: 0, load_factor_threshold: LOAD_FACTOR_THRESHOLD, comparator, hasher }
    }

    /// Gets the index in the buckets for a key
    #[allow(clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &K) -> usize {
        debug_assert!(!self.buckets.is_empty(), "bucket array must never be empty");
        self.hasher.hash_key(key) % self.buckets.len()
    }

    /// Returns true once the load factor has reached the threshold
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn needs_growth(&self) -> bool {
        (self.count as f64) / (self.buckets.len() as f64) >=
            self.load_factor_threshold as f64 / 100.0
    }

    /// Inserts `value` under `key`, or replaces the value of an equal key already present.
    ///
    /// A replaced value is handed back instead of being dropped by the map; `len` is unchanged
    /// in that case and grows by one otherwise. If the load factor threshold has been reached,
    /// the bucket array is tripled before `key` is placed.
    ///
    /// Aborts the process if the bucket array cannot be grown. Use [`Self::try_put`] to observe
    /// that failure as a value first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.try_put(key, value).unwrap_or_else(|err| fatal(&err))
    }

    /// Same as [`Self::put`], but reports a failed resize instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the grown capacity overflows `usize` or cannot be
    /// allocated. The map is left untouched and `key`/`value` are dropped.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError> {
        if self.needs_growth() {
            self.grow()?;
        }

        Ok(self.place(key, value))
    }

    /// Links `key` into its chain at the current capacity, or updates the existing entry
    fn place(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let Self { buckets, count, comparator, .. } = self;

        // The index is reduced modulo `buckets.len()`, so the lookup cannot miss
        let Some(chain) = buckets.get_mut(index) else {
            return None;
        };

        if let Some(entry) = chain.iter_mut().find(|entry| comparator.same_key(&key, &entry.key)) {
            return Some(mem::replace(&mut entry.value, value));
        }

        chain.push(Entry { key, value });
        *count = count.saturating_add(1);
        log::trace!("appended entry to bucket {index} (chain length {})", chain.len());

        None
    }

    /// Triples the bucket array and relinks every entry into it
    fn grow(&mut self) -> Result<(), CapacityError> {
        let capacity = self.buckets.len();
        let new_capacity = grown_capacity(capacity)?;
        let fresh = allocate_buckets(new_capacity)?;

        let old = mem::replace(&mut self.buckets, fresh);
        let replayed = mem::take(&mut self.count);

        // Entries are relinked without comparing keys: a key rewritten by `remove_with` may now
        // equal another stored key, and both entries must survive.
        for entry in old.into_iter().flatten() {
            self.relink(entry);
        }

        debug_assert_eq!(self.count, replayed, "resize must neither lose nor merge entries");
        log::debug!("resized buckets from {capacity} to {new_capacity} ({replayed} entries)");

        Ok(())
    }

    /// Appends `entry` to the tail of its chain at the current capacity
    fn relink(&mut self, entry: Entry<K, V>) {
        let index = self.bucket_index(&entry.key);

        if let Some(chain) = self.buckets.get_mut(index) {
            chain.push(entry);
            self.count = self.count.saturating_add(1);
        }
    }

    /// Returns the chain `key` hashes into
    fn chain(&self, key: &K) -> &[Entry<K, V>] {
        self.buckets.get(self.bucket_index(key)).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the value of the first entry in `key`'s chain that compares equal to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.chain(key)
            .iter()
            .find(|entry| self.comparator.same_key(key, &entry.key))
            .map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let Self { buckets, comparator, .. } = self;

        buckets
            .get_mut(index)?
            .iter_mut()
            .find(|entry| comparator.same_key(key, &entry.key))
            .map(|entry| &mut entry.value)
    }

    /// Looks `key` up and reports whether it was found. See [`Self::remove_with`].
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_with(key, |_| {}, |_| {})
    }

    /// Finds the first entry equal to `key` and passes its stored key and value to
    /// `key_free` and `val_free`, in that order.
    ///
    /// The entry is not unlinked: `len` does not change, and `get`, `iter` and
    /// [`Self::delete_with`] still see it, holding whatever the callbacks left behind.
    /// Neither callback runs if no entry matches.
    ///
    /// ```rust
    /// use chainmap::{ChainedHashMap, StrCmp};
    ///
    /// let mut map = ChainedHashMap::new(StrCmp);
    /// map.put("a", vec![1, 2, 3]);
    ///
    /// assert!(map.remove_with(&"a", |_| {}, Vec::clear));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"a"), Some(&Vec::new()));
    /// ```
    pub fn remove_with<KF, VF>(&mut self, key: &K, key_free: KF, val_free: VF) -> bool
    where
        KF: FnOnce(&mut K),
        VF: FnOnce(&mut V),
    {
        let index = self.bucket_index(key);
        let Self { buckets, comparator, .. } = self;

        let found = buckets
            .get_mut(index)
            .and_then(|chain| chain.iter_mut().find(|entry| comparator.same_key(key, &entry.key)));

        match found {
            Some(entry) => {
                key_free(&mut entry.key);
                val_free(&mut entry.value);
                true
            }
            None => false,
        }
    }

    /// Provide a way to configure the load factor threshold, in percent
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }
}

impl<K, V, C, H> ChainedHashMap<K, V, C, H> {
    /// Returns the number of entries linked into the table.
    ///
    /// Entries passed to `remove` or `remove_with` are still linked and still counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no entry was ever put into the table
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Returns the length of every chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }

    /// Returns an iterator over the key-value pairs.
    ///
    /// Buckets are visited in ascending index order and each chain from head to tail.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), chain: Default::default() }
    }

    /// Calls `visit` on every entry in [`Self::iter`] order until it returns `false`.
    ///
    /// Returns `true` if every entry was visited and `false` if `visit` stopped the walk.
    pub fn for_each<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().all(|(key, value)| visit(key, value))
    }

    /// Tears the table down, dropping every key and value it still holds
    pub fn delete(self) {
        self.delete_with(drop, drop);
    }

    /// Tears the table down, handing every linked key to `key_free` and its value to
    /// `val_free`, in [`Self::iter`] order.
    ///
    /// Entries passed to `remove_with` earlier are handed over again.
    pub fn delete_with<KF, VF>(self, mut key_free: KF, mut val_free: VF)
    where
        KF: FnMut(K),
        VF: FnMut(V),
    {
        log::debug!("deleting table ({} entries, {} buckets)", self.count, self.buckets.len());

        for Entry { key, value } in self.buckets.into_iter().flatten() {
            key_free(key);
            val_free(value);
        }
    }
}

/// Capacity after one more resize
fn grown_capacity(capacity: usize) -> Result<usize, CapacityError> {
    capacity.checked_mul(GROWTH_FACTOR).ok_or(CapacityError::Overflow { capacity })
}

/// Reserves a bucket array of exactly `capacity` empty chains
fn allocate_buckets<K, V>(capacity: usize) -> Result<Vec<Chain<K, V>>, CapacityError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|source| CapacityError::Alloc { capacity, source })?;
    buckets.resize_with(capacity, Vec::new);

    Ok(buckets)
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Chain<K, V>>,
    /// Remainder of the chain being visited
    chain: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}
