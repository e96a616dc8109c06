use crate::core::{
    distance::{levenshtein, name_similarity},
    hash_index::{HashIndex, IndexError},
    normalize::{email_key, name_key, phone_key},
};
use crate::models::{AddOutcome, Contact, DetectorStats, DuplicateReport, SimilarMatch};

/// Largest edit distance at which two name keys count as similar
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Duplicate detection over three hash indexes
///
/// Records are indexed by normalized email, phone and full name. Email and
/// phone collisions reject a record; name collisions are reported but do
/// not block it, since the same full name is common.
///
/// Stored records are handles cloned out of the caller's value. Use a
/// shared pointer such as `Arc<Record>` so a clone is a reference, not a
/// deep copy.
#[derive(Debug, Clone)]
pub struct DuplicateDetector<R> {
    by_email: HashIndex<R>,
    by_phone: HashIndex<R>,
    by_name: HashIndex<R>,
    max_edit_distance: usize,
}

impl<R: Contact + Clone> DuplicateDetector<R> {
    pub fn new() -> Self {
        Self {
            by_email: HashIndex::new(),
            by_phone: HashIndex::new(),
            by_name: HashIndex::new(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }

    /// Create a detector whose three indexes use `bucket_count` buckets each
    pub fn with_buckets(bucket_count: usize) -> Result<Self, IndexError> {
        Ok(Self {
            by_email: HashIndex::with_buckets(bucket_count)?,
            by_phone: HashIndex::with_buckets(bucket_count)?,
            by_name: HashIndex::with_buckets(bucket_count)?,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        })
    }

    pub fn with_max_edit_distance(mut self, max_edit_distance: usize) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    /// Look the record's keys up without modifying any index
    pub fn check_duplicate(&self, record: &R) -> DuplicateReport<R> {
        let mut report = DuplicateReport::clean();

        if let Some(key) = email_key(record.email()) {
            if let Some(existing) = self.by_email.get(&key) {
                report.email_match = Some(existing.clone());
                report.is_duplicate = true;
            }
        }

        if let Some(key) = phone_key(record.phone()) {
            if let Some(existing) = self.by_phone.get(&key) {
                report.phone_match = Some(existing.clone());
                report.is_duplicate = true;
            }
        }

        if let Some(key) = record_name_key(record) {
            if let Some(existing) = self.by_name.get(&key) {
                report.name_match = Some(existing.clone());
            }
        }

        report
    }

    /// Accept the record unless its email or phone is already indexed
    ///
    /// An accepted record is indexed under every key it carries. A name-only
    /// collision is accepted and the name index then points at the newer
    /// record.
    pub fn add_record(&mut self, record: R) -> AddOutcome<R> {
        let report = self.check_duplicate(&record);

        if report.is_duplicate {
            tracing::debug!(
                "Rejected duplicate record (match type: {:?})",
                report.match_type()
            );
            return AddOutcome {
                accepted: false,
                report,
            };
        }

        if report.name_match.is_some() {
            tracing::debug!("Accepted record with advisory name collision");
        }

        if let Some(key) = email_key(record.email()) {
            self.by_email.set(key, record.clone());
        }
        if let Some(key) = phone_key(record.phone()) {
            self.by_phone.set(key, record.clone());
        }
        if let Some(key) = record_name_key(&record) {
            self.by_name.set(key, record);
        }

        AddOutcome {
            accepted: true,
            report,
        }
    }

    /// Drop the record's keys from every index; missing keys are ignored
    pub fn remove_record(&mut self, record: &R) {
        if let Some(key) = email_key(record.email()) {
            self.by_email.delete(&key);
        }
        if let Some(key) = phone_key(record.phone()) {
            self.by_phone.delete(&key);
        }
        if let Some(key) = record_name_key(record) {
            self.by_name.delete(&key);
        }
        tracing::trace!("Removed record keys from duplicate indexes");
    }

    /// Indexed records whose name key lies within the edit-distance
    /// threshold of the query's, most similar first
    ///
    /// Exact name matches are excluded; those surface through
    /// `check_duplicate` instead.
    pub fn find_similar(&self, record: &R) -> Vec<SimilarMatch<R>> {
        let Some(query) = record_name_key(record) else {
            return Vec::new();
        };

        let mut matches: Vec<SimilarMatch<R>> = self
            .by_name
            .iter()
            .filter(|(key, _)| *key != query)
            .filter_map(|(key, candidate)| {
                let distance = levenshtein(&query, key);
                if distance == 0 || distance > self.max_edit_distance {
                    return None;
                }
                Some(SimilarMatch {
                    candidate: candidate.clone(),
                    name_key: key.to_string(),
                    distance,
                    similarity: name_similarity(&query, key, distance),
                })
            })
            .collect();

        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches
    }

    pub fn stats(&self) -> DetectorStats {
        DetectorStats {
            email: self.by_email.stats(),
            phone: self.by_phone.stats(),
            name: self.by_name.stats(),
        }
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    pub fn clear(&mut self) {
        self.by_email.clear();
        self.by_phone.clear();
        self.by_name.clear();
    }
}

impl<R: Contact + Clone> Default for DuplicateDetector<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn record_name_key<R: Contact>(record: &R) -> Option<String> {
    name_key(record.first_name(), record.last_name())
}
