//! Record Match - in-memory matching and ranking engine
//!
//! This library provides three independent indexing structures over
//! caller-owned records:
//! - a chained hash index driving fuzzy duplicate detection,
//! - an AVL rating tree for score range queries,
//! - a binary max-heap for priority extraction.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use crate::core::{
    levenshtein, DuplicateDetector, EngineError, HashIndex, IndexError, PriorityQueue, RatingTree,
    RecordEngine,
};
pub use models::{
    AddOutcome, Contact, DuplicateReport, MatchType, Prioritized, Rated, Record, SimilarMatch,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        let index: HashIndex<u8> = HashIndex::new();
        assert_eq!(index.bucket_count(), 997);
    }
}
