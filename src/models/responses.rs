use serde::{Deserialize, Serialize};

/// Dimension on which an incoming record collided with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Email,
    Phone,
    Name,
}

/// Result of checking a record against the duplicate indexes
///
/// Each `*_match` holds the previously accepted record that owns the
/// colliding key. Only email and phone hits make `is_duplicate` true; a
/// name hit is advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport<R> {
    #[serde(rename = "emailMatch")]
    pub email_match: Option<R>,
    #[serde(rename = "phoneMatch")]
    pub phone_match: Option<R>,
    #[serde(rename = "nameMatch")]
    pub name_match: Option<R>,
    #[serde(rename = "isDuplicate")]
    pub is_duplicate: bool,
}

impl<R> DuplicateReport<R> {
    pub fn clean() -> Self {
        Self {
            email_match: None,
            phone_match: None,
            name_match: None,
            is_duplicate: false,
        }
    }

    /// Reported match type, email taking precedence over phone over name
    pub fn match_type(&self) -> Option<MatchType> {
        if self.email_match.is_some() {
            Some(MatchType::Email)
        } else if self.phone_match.is_some() {
            Some(MatchType::Phone)
        } else if self.name_match.is_some() {
            Some(MatchType::Name)
        } else {
            None
        }
    }

    /// The existing record behind the reported match type
    pub fn conflicting(&self) -> Option<&R> {
        self.email_match
            .as_ref()
            .or(self.phone_match.as_ref())
            .or(self.name_match.as_ref())
    }

    /// Name collided but neither email nor phone did
    pub fn is_advisory(&self) -> bool {
        !self.is_duplicate && self.name_match.is_some()
    }
}

/// Outcome of `DuplicateDetector::add_record`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOutcome<R> {
    pub accepted: bool,
    pub report: DuplicateReport<R>,
}

/// Fuzzy name candidate returned by `find_similar`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarMatch<R> {
    pub candidate: R,
    /// Normalized name key the candidate is indexed under
    #[serde(rename = "nameKey")]
    pub name_key: String,
    pub distance: usize,
    pub similarity: f64,
}

/// Diagnostics for one hash index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub count: usize,
    #[serde(rename = "bucketCount")]
    pub bucket_count: usize,
    #[serde(rename = "loadFactor")]
    pub load_factor: f64,
    #[serde(rename = "longestChain")]
    pub longest_chain: usize,
    #[serde(rename = "emptyBuckets")]
    pub empty_buckets: usize,
}

/// Per-dimension diagnostics for the duplicate detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorStats {
    pub email: IndexStats,
    pub phone: IndexStats,
    pub name: IndexStats,
}

/// Totals for a batch pushed through `RecordEngine::ingest_all`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    #[serde(rename = "advisoryNameMatches")]
    pub advisory_name_matches: usize,
}
