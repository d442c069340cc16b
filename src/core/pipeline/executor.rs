//! Pipeline execution.

use crate::core::fingerprint::Fingerprint;
use crate::core::hasher::{build_hasher, AlgorithmKind};
use crate::core::index::{DuplicateGroup, DuplicateIndex, ImageRecord, MatchOutcome};
use crate::core::relocate::Relocator;
use crate::core::scanner::{ScanConfig, Scanner};
use crate::error::ImgdupError;
use crate::events::{
    null_sender, Event, EventSender, HashEvent, HashProgress, IndexEvent, PipelineEvent,
    PipelinePhase, PipelineSummary,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Result of a pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    /// All groups, in the order their representatives were first seen
    pub groups: Vec<DuplicateGroup>,
    /// Number of images successfully hashed and submitted
    pub total_images: usize,
    /// Files that were moved to the duplicate directory
    pub relocated: Vec<PathBuf>,
    /// Non-fatal errors (unreadable entries, undecodable images, failed moves)
    pub errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Groups that actually collected at least one duplicate
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|g| g.has_duplicates())
    }

    /// Total duplicates across all groups
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::duplicate_count).sum()
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directories to scan
    pub paths: Vec<PathBuf>,
    /// Hash algorithm to use for the whole scan
    pub algorithm: AlgorithmKind,
    /// Exclusive Hamming distance bound for duplicates
    pub threshold: u32,
    /// Scanner configuration
    pub scan_config: ScanConfig,
    /// Where to move duplicates (None = report only)
    pub move_to: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            algorithm: AlgorithmKind::Difference,
            threshold: 5,
            scan_config: ScanConfig::default(),
            move_to: None,
        }
    }
}

/// Builder for the pipeline
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Directories to scan
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.paths = paths;
        self
    }

    /// Hash algorithm
    pub fn algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Distance threshold (exclusive upper bound)
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Descend into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.scan_config.recursive = recursive;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Move duplicates into this directory
    pub fn move_to(mut self, destination: Option<PathBuf>) -> Self {
        self.config.move_to = destination;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The duplicate detection pipeline
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline without progress events
    pub fn run(&self) -> Result<PipelineResult, ImgdupError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline, emitting progress events.
    ///
    /// Per-file failures are collected in the result. A scan root that is not
    /// an accessible directory aborts the run with an error, as does a
    /// malformed fingerprint reaching the index (a bug, not bad input data).
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, ImgdupError> {
        let start = Instant::now();
        let mut errors = Vec::new();

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: traversal
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));
        debug!(paths = ?self.config.paths, "scanning for image files");

        let scanner = Scanner::new(self.config.scan_config.clone());
        let scan_result = scanner.scan_with_events(&self.config.paths, events)?;
        for error in scan_result.errors {
            errors.push(error.to_string());
        }

        let images = scan_result.images;
        let total_candidates = images.len();
        debug!(total_candidates, "traversal complete");

        // Phase 2: hashing, parallel across images, order-preserving
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Hashing,
        }));
        events.send(Event::Hash(HashEvent::Started {
            total_images: total_candidates,
        }));

        let hasher = build_hasher(self.config.algorithm);
        let completed = AtomicUsize::new(0);

        let hash_results: Vec<(PathBuf, Result<Fingerprint, String>)> = images
            .par_iter()
            .map(|path| {
                let outcome = hasher.hash_file(path).map_err(|e| e.to_string());
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                events.send(Event::Hash(HashEvent::Progress(HashProgress {
                    completed: done,
                    total: total_candidates,
                    current_path: path.clone(),
                })));
                (path.clone(), outcome)
            })
            .collect();

        let mut records = Vec::with_capacity(hash_results.len());
        let mut skipped = 0usize;
        for (path, outcome) in hash_results {
            match outcome {
                Ok(fingerprint) => records.push(ImageRecord::new(path, fingerprint)),
                Err(message) => {
                    warn!(path = %path.display(), %message, "skipping image");
                    events.send(Event::Hash(HashEvent::Skipped {
                        path: path.clone(),
                        message: message.clone(),
                    }));
                    errors.push(format!("{}: {}", path.display(), message));
                    skipped += 1;
                }
            }
        }

        events.send(Event::Hash(HashEvent::Completed {
            total_hashed: records.len(),
            skipped,
        }));

        // Phase 3: grouping, sequential single-writer
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Grouping,
        }));
        events.send(Event::Index(IndexEvent::Started {
            total_images: records.len(),
        }));

        let relocator = self.config.move_to.as_ref().map(Relocator::new);
        let mut index = DuplicateIndex::new(self.config.threshold);
        let mut relocated = Vec::new();
        let total_images = records.len();

        for record in records {
            let path = record.path.clone();
            match index.submit(record)? {
                MatchOutcome::New { .. } => {
                    events.send(Event::Index(IndexEvent::GroupCreated {
                        representative: path,
                    }));
                }
                MatchOutcome::Duplicate { group, distance } => {
                    let representative = index.groups()[group].representative.path.clone();
                    events.send(Event::Index(IndexEvent::DuplicateFound {
                        path: path.clone(),
                        representative,
                        distance,
                    }));

                    if let Some(ref relocator) = relocator {
                        match relocator.relocate(&path) {
                            Ok(target) => {
                                events.send(Event::Index(IndexEvent::Relocated {
                                    from: path.clone(),
                                    to: target.clone(),
                                }));
                                relocated.push(target);
                            }
                            Err(e) => {
                                warn!(path = %path.display(), error = %e, "relocation failed");
                                events.send(Event::Index(IndexEvent::RelocateFailed {
                                    path: path.clone(),
                                    message: e.to_string(),
                                }));
                                errors.push(e.to_string());
                            }
                        }
                    }
                }
            }
        }

        let groups = index.into_groups();
        let duplicate_count: usize = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        let duplicate_groups = groups.iter().filter(|g| g.has_duplicates()).count();

        events.send(Event::Index(IndexEvent::Completed {
            total_groups: groups.len(),
            total_duplicates: duplicate_count,
        }));

        let duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_images,
                duplicate_groups,
                duplicate_count,
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            groups,
            total_images,
            relocated,
            errors,
            duration_ms,
        })
    }
}
