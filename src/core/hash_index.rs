use crate::models::IndexStats;
use thiserror::Error;

/// Default bucket count. A prime spreads the multiplicative hash better
/// than a round number.
pub const DEFAULT_BUCKET_COUNT: usize = 997;

const DJB2_SEED: i32 = 5381;

/// Errors that can occur when constructing an index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Invalid bucket count: {0} (must be at least 1)")]
    InvalidBucketCount(usize),
}

/// djb2 rolling hash reduced to a bucket slot
///
/// Accumulates `h * 33 + byte` in wrapping 32-bit signed arithmetic seeded
/// at 5381, then reduces the absolute value modulo `bucket_count`.
/// `bucket_count` must be non-zero.
#[inline]
pub fn djb2_hash(key: &str, bucket_count: usize) -> usize {
    let hash = key.bytes().fold(DJB2_SEED, |h, byte| {
        h.wrapping_shl(5).wrapping_add(h).wrapping_add(i32::from(byte))
    });

    hash.unsigned_abs() as usize % bucket_count
}

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

/// String-keyed map with separate chaining and a fixed bucket count
///
/// Buckets keep their entries in insertion order. The index never resizes;
/// `load_factor` is a diagnostic only.
#[derive(Debug, Clone)]
pub struct HashIndex<V> {
    buckets: Vec<Vec<Entry<V>>>,
    count: usize,
}

impl<V> HashIndex<V> {
    /// Create an index with the default prime bucket count
    pub fn new() -> Self {
        Self::allocate(DEFAULT_BUCKET_COUNT)
    }

    /// Create an index with a caller-chosen bucket count
    pub fn with_buckets(bucket_count: usize) -> Result<Self, IndexError> {
        if bucket_count == 0 {
            return Err(IndexError::InvalidBucketCount(bucket_count));
        }
        Ok(Self::allocate(bucket_count))
    }

    fn allocate(bucket_count: usize) -> Self {
        Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            count: 0,
        }
    }

    /// Bucket slot for `key`, always in `[0, bucket_count)`
    #[inline]
    pub fn hash(&self, key: &str) -> usize {
        djb2_hash(key, self.buckets.len())
    }

    /// Insert or overwrite. Returns `true` if the key was new.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        let slot = self.hash(&key);
        let bucket = &mut self.buckets[slot];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            entry.value = value;
            tracing::trace!("Hash index overwrite: {}", entry.key);
            return false;
        }

        bucket.push(Entry { key, value });
        self.count += 1;
        true
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.hash(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` if present. Returns whether a removal occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        let slot = self.hash(key);
        let bucket = &mut self.buckets[slot];

        match bucket.iter().position(|entry| entry.key == key) {
            Some(pos) => {
                bucket.remove(pos);
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    /// All keys in bucket order, then insertion order within a bucket
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// `(key, value)` pairs in the same order as `keys`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|entry| (entry.key.as_str(), &entry.value)))
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.count = 0;
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            count: self.count,
            bucket_count: self.buckets.len(),
            load_factor: self.load_factor(),
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
            empty_buckets: self.buckets.iter().filter(|bucket| bucket.is_empty()).count(),
        }
    }
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}
