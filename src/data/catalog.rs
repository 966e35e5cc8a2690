use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LabelerConfig;
use crate::error::{LabelerError, Result};

// ---------------------------------------------------------------------------
// FileCatalog – every data file under the input directory
// ---------------------------------------------------------------------------

/// Ordered list of input files. Built once per session.
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl FileCatalog {
    /// Recursively collect regular files under `root`, sorted by path.
    ///
    /// Unreadable sub-entries are skipped with a warning; an unreadable
    /// `root` is an error. An empty result is *not* an error here, the
    /// session decides what to do with it.
    pub fn scan(root: &Path, config: &LabelerConfig) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|source| LabelerError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        std::fs::read_dir(&root).map_err(|source| LabelerError::Io {
            path: root.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = WalkDir::new(&root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| config.accepts_extension(p.extension().and_then(|e| e.to_str())))
            .collect();
        files.sort();

        log::info!("Found {} data files under {}", files.len(), root.display());
        Ok(FileCatalog { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, position: usize) -> Option<&Path> {
        self.files.get(position).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path relative to the scan root, for the file list.
    pub fn display_name(&self, position: usize) -> Option<String> {
        let path = self.get(position)?;
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        Some(rel.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn scan_is_recursive_and_sorted() -> Result<()> {
        let root = TempDir::new()?;
        fs::create_dir_all(root.path().join("b/nested"))?;
        fs::write(root.path().join("c.csv"), "")?;
        fs::write(root.path().join("a.csv"), "")?;
        fs::write(root.path().join("b/nested/z.csv"), "")?;

        let catalog = FileCatalog::scan(root.path(), &LabelerConfig::default())?;
        let names: Vec<String> = (0..catalog.len())
            .filter_map(|i| catalog.display_name(i))
            .collect();

        let nested = Path::new("b").join("nested").join("z.csv");
        assert_eq!(
            names,
            vec!["a.csv".to_string(), nested.display().to_string(), "c.csv".to_string()]
        );
        assert!((0..catalog.len()).filter_map(|i| catalog.get(i)).all(Path::is_absolute));
        Ok(())
    }

    #[test]
    fn directories_are_not_entries() -> Result<()> {
        let root = TempDir::new()?;
        fs::create_dir(root.path().join("empty"))?;

        let catalog = FileCatalog::scan(root.path(), &LabelerConfig::default())?;
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
        Ok(())
    }

    #[test]
    fn extension_filter_applies() -> Result<()> {
        let root = TempDir::new()?;
        fs::write(root.path().join("keep.csv"), "")?;
        fs::write(root.path().join("notes.txt"), "")?;

        let config = LabelerConfig {
            extensions: vec!["csv".into()],
            ..LabelerConfig::default()
        };
        let catalog = FileCatalog::scan(root.path(), &config)?;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.display_name(0).as_deref(), Some("keep.csv"));
        Ok(())
    }

    #[test]
    fn missing_root_is_io_error() -> Result<()> {
        let root = TempDir::new()?;
        let missing = root.path().join("nope");
        let err = FileCatalog::scan(&missing, &LabelerConfig::default()).unwrap_err();
        assert!(matches!(err, LabelerError::Io { .. }));
        Ok(())
    }
}
