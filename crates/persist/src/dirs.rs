//! Directory resolution seam
//!
//! Maps a normalized category key to the directory its files land in.
//! Path policy belongs to the host; the pipeline only asks for a path
//! and skips the record if resolution fails.

use std::io;
use std::path::PathBuf;

/// Resolves the target directory for a normalized category key
pub trait DirectoryResolver: Send + Sync + 'static {
    /// Target directory for this category's files
    fn resolve(&self, category: &str) -> io::Result<PathBuf>;
}

/// Default layout: one subdirectory per category under a base path
#[derive(Debug, Clone)]
pub struct CategoryDirs {
    base: PathBuf,
}

impl CategoryDirs {
    /// Create a resolver rooted at `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DirectoryResolver for CategoryDirs {
    fn resolve(&self, category: &str) -> io::Result<PathBuf> {
        Ok(self.base.join(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_subdirectory() {
        let dirs = CategoryDirs::new("/var/lib/spool");
        let path = dirs.resolve("orders").unwrap();
        assert_eq!(path, PathBuf::from("/var/lib/spool/orders"));
    }
}
