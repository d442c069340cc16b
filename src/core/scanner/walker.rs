//! Directory traversal built on walkdir.

use super::{filter::ImageFilter, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to descend into subdirectories
    pub recursive: bool,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Custom extensions to include (None = defaults)
    pub extensions: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            follow_symlinks: false,
            include_hidden: false,
            extensions: None,
        }
    }
}

/// Walks directories and collects candidate image files
pub struct Scanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl Scanner {
    /// Create a scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);
        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }
        Self { config, filter }
    }

    /// Scan the given roots, emitting progress events.
    ///
    /// A root that is not an accessible directory aborts the scan before any
    /// traversal; per-entry failures inside a valid root are collected, never
    /// fatal.
    pub fn scan_with_events(
        &self,
        paths: &[PathBuf],
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        for root in paths {
            if !root.is_dir() {
                return Err(ScanError::DirectoryNotFound { path: root.clone() });
            }
        }

        events.send(Event::Scan(ScanEvent::Started {
            paths: paths.to_vec(),
        }));

        let mut images = Vec::new();
        let mut errors = Vec::new();

        for root in paths {
            self.scan_root(root, events, &mut images, &mut errors);
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_images: images.len(),
        }));

        Ok(ScanResult { images, errors })
    }

    /// Scan without progress events
    pub fn scan(&self, paths: &[PathBuf]) -> Result<ScanResult, ScanError> {
        self.scan_with_events(paths, &crate::events::null_sender())
    }

    fn scan_root(
        &self,
        root: &PathBuf,
        events: &EventSender,
        images: &mut Vec<PathBuf>,
        errors: &mut Vec<ScanError>,
    ) {
        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if !self.config.recursive {
            walker = walker.max_depth(1);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker.into_iter().filter_entry(move |entry| {
            // Never prune the root itself; hidden subtrees are skipped whole
            if entry.depth() == 0 || include_hidden {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map(|name| !(entry.file_type().is_dir() && name.starts_with('.')))
                .unwrap_or(true)
        });

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let error = if e.io_error().map(|io| io.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadEntry {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    errors.push(error);
                    continue;
                }
            };

            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            if !self.filter.should_include(path) {
                continue;
            }

            events.send(Event::Scan(ScanEvent::ImageFound {
                path: path.to_path_buf(),
            }));
            images.push(path.to_path_buf());
        }
    }
}
