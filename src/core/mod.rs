// Core algorithm exports
pub mod distance;
pub mod duplicates;
pub mod engine;
pub mod hash_index;
pub mod normalize;
pub mod priority_queue;
pub mod rating_tree;

pub use distance::{levenshtein, name_similarity};
pub use duplicates::{DuplicateDetector, DEFAULT_MAX_EDIT_DISTANCE};
pub use engine::{EngineError, RecordEngine};
pub use hash_index::{djb2_hash, HashIndex, IndexError, DEFAULT_BUCKET_COUNT};
pub use priority_queue::PriorityQueue;
pub use rating_tree::RatingTree;
