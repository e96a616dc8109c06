// Model exports
pub mod domain;
pub mod responses;

pub use domain::{Contact, Prioritized, Rated, Record};
pub use responses::{
    AddOutcome, DetectorStats, DuplicateReport, IndexStats, IngestSummary, MatchType, SimilarMatch,
};
