//! File filtering for the scanner.

use std::collections::HashSet;
use std::path::Path;

const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp",
];

/// Decides which files count as candidate images
pub struct ImageFilter {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a filter with the default extension set
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Include hidden files (names starting with `.`)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the accepted extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check whether a file should be considered an image
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_common_image_extensions() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/images/a.jpg")));
        assert!(filter.should_include(Path::new("/images/a.PNG")));
        assert!(filter.should_include(Path::new("/images/a.TIFF")));
    }

    #[test]
    fn excludes_non_images() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/images/notes.txt")));
        assert!(!filter.should_include(Path::new("/images/clip.mp4")));
    }

    #[test]
    fn excludes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/images/.thumb.jpg")));
    }

    #[test]
    fn can_include_hidden() {
        let filter = ImageFilter::new().with_hidden(true);
        assert!(filter.should_include(Path::new("/images/.thumb.jpg")));
    }

    #[test]
    fn handles_files_without_extension() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/images/README")));
    }

    #[test]
    fn custom_extensions_replace_the_defaults() {
        let filter = ImageFilter::new().with_extensions(vec!["ppm".to_string()]);
        assert!(filter.should_include(Path::new("/images/a.ppm")));
        assert!(!filter.should_include(Path::new("/images/a.jpg")));
    }
}
