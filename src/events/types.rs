//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the scan pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Traversal phase events
    Scan(ScanEvent),
    /// Hashing phase events
    Hash(HashEvent),
    /// Grouping phase events
    Index(IndexEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the traversal phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Traversal has started
    Started { paths: Vec<PathBuf> },
    /// An image file was found
    ImageFound { path: PathBuf },
    /// An error occurred but traversal continues
    Error { path: PathBuf, message: String },
    /// Traversal completed
    Completed { total_images: usize },
}

/// Events during the hashing phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started
    Started { total_images: usize },
    /// Progress update during hashing
    Progress(HashProgress),
    /// An image could not be decoded or hashed; it is skipped
    Skipped { path: PathBuf, message: String },
    /// Hashing completed
    Completed { total_hashed: usize, skipped: usize },
}

/// Progress information during hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of images hashed so far
    pub completed: usize,
    /// Total number of images to hash
    pub total: usize,
    /// Image most recently hashed
    pub current_path: PathBuf,
}

/// Events during the grouping phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndexEvent {
    /// Grouping has started
    Started { total_images: usize },
    /// A fingerprint started a new group
    GroupCreated { representative: PathBuf },
    /// A fingerprint matched an existing group
    DuplicateFound {
        path: PathBuf,
        representative: PathBuf,
        distance: u32,
    },
    /// A duplicate was moved to the destination directory
    Relocated { from: PathBuf, to: PathBuf },
    /// A duplicate could not be moved; it stays in place
    RelocateFailed { path: PathBuf, message: String },
    /// Grouping completed
    Completed {
        total_groups: usize,
        total_duplicates: usize,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Hashing,
    Grouping,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Hashing => write!(f, "Hashing"),
            PipelinePhase::Grouping => write!(f, "Grouping"),
        }
    }
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total images hashed
    pub total_images: usize,
    /// Number of groups that ended up with at least one duplicate
    pub duplicate_groups: usize,
    /// Total number of duplicates (excluding representatives)
    pub duplicate_count: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Hash(HashEvent::Progress(HashProgress {
            completed: 10,
            total: 50,
            current_path: PathBuf::from("/images/a.jpg"),
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Hash(HashEvent::Progress(p)) => {
                assert_eq!(p.completed, 10);
                assert_eq!(p.total, 50);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn phase_display_names() {
        assert_eq!(PipelinePhase::Scanning.to_string(), "Scanning");
        assert_eq!(PipelinePhase::Hashing.to_string(), "Hashing");
        assert_eq!(PipelinePhase::Grouping.to_string(), "Grouping");
    }
}
