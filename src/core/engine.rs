use crate::config::Settings;
use crate::core::{
    duplicates::DuplicateDetector,
    hash_index::IndexError,
    priority_queue::PriorityQueue,
    rating_tree::RatingTree,
};
use crate::models::{AddOutcome, IngestSummary, Record};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while ingesting records
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Record {0} has a NaN score")]
    InvalidScore(String),

    #[error("Record {0} has a NaN priority")]
    InvalidPriority(String),
}

/// Ingestion orchestrator over the three indexing structures
///
/// # Pipeline
/// 1. Reject records with NaN score or priority
/// 2. Duplicate detection (email / phone reject, name advisory)
/// 3. Accepted records with a score go into the rating tree
/// 4. Accepted records with a priority go into the priority queue
///
/// Each record is stored once behind an `Arc` and shared by every
/// structure that indexes it.
#[derive(Debug, Clone, Default)]
pub struct RecordEngine {
    detector: DuplicateDetector<Arc<Record>>,
    ratings: RatingTree<Arc<Record>>,
    queue: PriorityQueue<Arc<Record>>,
}

impl RecordEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, EngineError> {
        let detector = DuplicateDetector::with_buckets(settings.index.bucket_count)?
            .with_max_edit_distance(settings.matching.max_edit_distance);

        Ok(Self {
            detector,
            ratings: RatingTree::new(),
            queue: PriorityQueue::new(),
        })
    }

    /// Push one record through the pipeline
    pub fn ingest(&mut self, record: Record) -> Result<AddOutcome<Arc<Record>>, EngineError> {
        if record.score.is_some_and(f64::is_nan) {
            return Err(EngineError::InvalidScore(record.id));
        }
        if record.priority.is_some_and(f64::is_nan) {
            return Err(EngineError::InvalidPriority(record.id));
        }

        let record = Arc::new(record);
        let outcome = self.detector.add_record(Arc::clone(&record));
        if !outcome.accepted {
            if let Some(existing) = outcome.report.conflicting() {
                tracing::debug!("Record {} conflicts with {}", record.id, existing.id);
            }
            return Ok(outcome);
        }

        if let Some(score) = record.score {
            self.ratings.insert(Arc::clone(&record), score);
        }
        if let Some(priority) = record.priority {
            self.queue.insert(Arc::clone(&record), priority);
        }

        tracing::trace!(
            "Ingested record {} ({})",
            record.id,
            record.full_name().as_deref().unwrap_or("unnamed")
        );
        Ok(outcome)
    }

    /// Ingest a batch, stopping at the first invalid record
    pub fn ingest_all<I>(&mut self, records: I) -> Result<IngestSummary, EngineError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut summary = IngestSummary::default();

        for record in records {
            let outcome = self.ingest(record)?;
            summary.total += 1;
            if outcome.accepted {
                summary.accepted += 1;
            } else {
                summary.rejected += 1;
            }
            if outcome.report.is_advisory() {
                summary.advisory_name_matches += 1;
            }
        }

        tracing::info!(
            "Ingested {} records ({} accepted, {} rejected, {} advisory name matches)",
            summary.total,
            summary.accepted,
            summary.rejected,
            summary.advisory_name_matches
        );

        Ok(summary)
    }

    pub fn detector(&self) -> &DuplicateDetector<Arc<Record>> {
        &self.detector
    }

    pub fn ratings(&self) -> &RatingTree<Arc<Record>> {
        &self.ratings
    }

    pub fn queue(&self) -> &PriorityQueue<Arc<Record>> {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut PriorityQueue<Arc<Record>> {
        &mut self.queue
    }
}
