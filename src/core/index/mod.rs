//! # Index Module
//!
//! Incremental duplicate grouping.
//!
//! The [`DuplicateIndex`] consumes a stream of (path, fingerprint) records and
//! files each one into a group as it arrives. Assignment is **greedy,
//! first-match and non-transitive**: a record joins the first group whose
//! representative is within the threshold, in the order groups were created,
//! and is never re-evaluated afterwards. A record within threshold of group
//! A's representative is never compared against group B once A absorbed it, so
//! two records in the same group may be farther apart than the threshold.
//!
//! This exactly preserves the observed incremental behavior; a union-find
//! style transitive closure would produce different groupings.

use crate::core::fingerprint::{hamming_distance, Fingerprint};
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One successfully hashed image. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path to the image file
    pub path: PathBuf,
    /// The image's fingerprint
    pub fingerprint: Fingerprint,
}

impl ImageRecord {
    /// Create a new record
    pub fn new(path: impl Into<PathBuf>, fingerprint: Fingerprint) -> Self {
        Self {
            path: path.into(),
            fingerprint,
        }
    }
}

/// A group of images considered duplicates of one representative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// The first image that established the group; never replaced
    pub representative: ImageRecord,
    /// Later images matched against the representative, in arrival order
    pub members: Vec<ImageRecord>,
}

impl DuplicateGroup {
    fn new(representative: ImageRecord) -> Self {
        Self {
            representative,
            members: Vec::new(),
        }
    }

    /// Number of duplicates in this group (excluding the representative)
    pub fn duplicate_count(&self) -> usize {
        self.members.len()
    }

    /// Whether any duplicate was filed into this group
    pub fn has_duplicates(&self) -> bool {
        !self.members.is_empty()
    }
}

/// Outcome of submitting a record to the index.
///
/// Groups are referred to by position in the index's group list; positions are
/// stable because groups are only ever appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The record established a new group
    New { group: usize },
    /// The record was filed into an existing group
    Duplicate { group: usize, distance: u32 },
}

impl MatchOutcome {
    /// Index of the group the record ended up in
    pub fn group(&self) -> usize {
        match *self {
            MatchOutcome::New { group } | MatchOutcome::Duplicate { group, .. } => group,
        }
    }

    /// Whether the record was a duplicate of an existing group
    pub fn is_duplicate(&self) -> bool {
        matches!(self, MatchOutcome::Duplicate { .. })
    }
}

/// The set of fingerprint groups discovered so far.
///
/// Single-writer: `submit` mutates the group list, so parallel hashing must
/// serialize submissions (the pipeline hashes in parallel and submits
/// sequentially in traversal order).
#[derive(Debug)]
pub struct DuplicateIndex {
    groups: Vec<DuplicateGroup>,
    threshold: u32,
}

impl DuplicateIndex {
    /// Create an empty index.
    ///
    /// `threshold` is the exclusive upper bound on the Hamming distance for
    /// two fingerprints to be considered the same image.
    pub fn new(threshold: u32) -> Self {
        Self {
            groups: Vec::new(),
            threshold,
        }
    }

    /// The configured distance threshold
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// File a record into the first matching group, or start a new one.
    ///
    /// Groups are scanned in creation order and the first whose
    /// representative is within `threshold` wins. Fails only if a fingerprint
    /// is malformed, which indicates corrupt data, not a skippable image.
    pub fn submit(&mut self, record: ImageRecord) -> Result<MatchOutcome, FingerprintError> {
        let mut matched = None;
        for (index, group) in self.groups.iter().enumerate() {
            let distance =
                hamming_distance(&group.representative.fingerprint, &record.fingerprint)?;
            if distance < self.threshold {
                matched = Some((index, distance));
                break;
            }
        }

        match matched {
            Some((group, distance)) => {
                self.groups[group].members.push(record);
                Ok(MatchOutcome::Duplicate { group, distance })
            }
            None => {
                self.groups.push(DuplicateGroup::new(record));
                Ok(MatchOutcome::New {
                    group: self.groups.len() - 1,
                })
            }
        }
    }

    /// All groups, in the order their representatives were first seen
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Consume the index, returning its groups
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups
    }

    /// Total duplicates across all groups (excluding representatives)
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, hex: &str) -> ImageRecord {
        ImageRecord::new(path, Fingerprint::from_hex(hex))
    }

    #[test]
    fn first_record_creates_a_group() {
        let mut index = DuplicateIndex::new(5);
        let outcome = index.submit(record("/a.jpg", "0000000000000000")).unwrap();

        assert_eq!(outcome, MatchOutcome::New { group: 0 });
        assert_eq!(index.groups().len(), 1);
        assert!(index.groups()[0].members.is_empty());
    }

    #[test]
    fn pairwise_distant_records_each_get_their_own_group() {
        // Distances between any two of these are >= 16 bits
        let fingerprints = [
            "0000000000000000",
            "ffff000000000000",
            "0000ffff00000000",
            "00000000ffff0000",
            "000000000000ffff",
        ];

        let mut index = DuplicateIndex::new(5);
        for (i, hex) in fingerprints.iter().enumerate() {
            let outcome = index.submit(record(&format!("/{i}.jpg"), hex)).unwrap();
            assert_eq!(outcome, MatchOutcome::New { group: i });
        }

        assert_eq!(index.groups().len(), fingerprints.len());
        assert_eq!(index.duplicate_count(), 0);
    }

    #[test]
    fn distance_just_under_threshold_joins_the_group() {
        let mut index = DuplicateIndex::new(5);
        index.submit(record("/a.jpg", "0000000000000000")).unwrap();

        // distance 4 = threshold - 1
        let outcome = index.submit(record("/b.jpg", "000000000000000f")).unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::Duplicate {
                group: 0,
                distance: 4
            }
        );
        assert_eq!(index.groups()[0].members.len(), 1);
        assert_eq!(index.groups()[0].members[0].path.to_str(), Some("/b.jpg"));
    }

    #[test]
    fn distance_at_threshold_does_not_join() {
        // The bound is exclusive: distance == threshold starts a new group.
        let mut index = DuplicateIndex::new(4);
        index.submit(record("/a.jpg", "0000000000000000")).unwrap();

        let outcome = index.submit(record("/b.jpg", "000000000000000f")).unwrap();
        assert_eq!(outcome, MatchOutcome::New { group: 1 });
    }

    #[test]
    fn grouping_is_non_transitive() {
        // A and B are close, B and C are close, but A and C are far apart.
        // C is only ever compared to representatives, so it starts its own
        // group even though it would have matched B.
        let a = "0000000000000000"; // d(a,b) = 4
        let b = "000000000000000f"; // d(b,c) = 4
        let c = "00000000000000ff"; // d(a,c) = 8

        let mut index = DuplicateIndex::new(5);
        assert_eq!(
            index.submit(record("/a.jpg", a)).unwrap(),
            MatchOutcome::New { group: 0 }
        );
        assert_eq!(
            index.submit(record("/b.jpg", b)).unwrap(),
            MatchOutcome::Duplicate {
                group: 0,
                distance: 4
            }
        );
        assert_eq!(
            index.submit(record("/c.jpg", c)).unwrap(),
            MatchOutcome::New { group: 1 }
        );
    }

    #[test]
    fn first_matching_group_wins() {
        // Representative order decides; the second group is never consulted
        // once the first matches.
        let mut index = DuplicateIndex::new(10);
        index.submit(record("/a.jpg", "0000000000000000")).unwrap();
        index.submit(record("/b.jpg", "00000000000003ff")).unwrap(); // exactly 10 from a

        // c is within threshold of both representatives; the older group wins
        let outcome = index.submit(record("/c.jpg", "000000000000001f")).unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::Duplicate {
                group: 0,
                distance: 5
            }
        );
    }

    #[test]
    fn representative_is_never_replaced() {
        let mut index = DuplicateIndex::new(64);
        index.submit(record("/first.jpg", "0000000000000000")).unwrap();
        index.submit(record("/second.jpg", "0000000000000001")).unwrap();
        index.submit(record("/third.jpg", "0000000000000003")).unwrap();

        let group = &index.groups()[0];
        assert_eq!(group.representative.path.to_str(), Some("/first.jpg"));
        assert_eq!(group.members.len(), 2);
    }

    #[test]
    fn malformed_fingerprint_propagates() {
        let mut index = DuplicateIndex::new(5);
        index.submit(record("/a.jpg", "0000000000000000")).unwrap();

        let result = index.submit(record("/bad.jpg", "00000000000000zz"));
        assert!(result.is_err());
    }

    #[test]
    fn members_keep_arrival_order() {
        let mut index = DuplicateIndex::new(64);
        index.submit(record("/r.jpg", "0000000000000000")).unwrap();
        for i in 1..=3 {
            index
                .submit(record(&format!("/m{i}.jpg"), "0000000000000001"))
                .unwrap();
        }

        let names: Vec<_> = index.groups()[0]
            .members
            .iter()
            .map(|m| m.path.display().to_string())
            .collect();
        assert_eq!(names, vec!["/m1.jpg", "/m2.jpg", "/m3.jpg"]);
    }
}
