use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// External persistence boundary.
///
/// Supplies the initial file list and accepts commit payloads. The
/// management backend itself is out of scope; everything behind this
/// trait is a black box to the editor.
pub trait Backend {
    /// Load the (path, content) pairs the archive is built from
    fn load(&self) -> Result<Vec<(String, String)>>;

    /// Persist the given working set. Must either store every entry or
    /// fail without partial effects the caller needs to care about.
    fn store(&self, entries: &[(String, String)]) -> Result<()>;
}

/// Filesystem-backed implementation: the files named on the command
/// line, read from and written back to disk relative to a root.
pub struct DirBackend {
    root: PathBuf,
    files: Vec<String>,
}

impl DirBackend {
    pub fn new(root: PathBuf, files: Vec<String>) -> Self {
        Self { root, files }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

impl Backend for DirBackend {
    fn load(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let resolved = self.resolve(path);
            let content = std::fs::read_to_string(&resolved)
                .with_context(|| format!("Failed to read file: {}", resolved.display()))?;
            pairs.push((path.clone(), content));
        }
        Ok(pairs)
    }

    fn store(&self, entries: &[(String, String)]) -> Result<()> {
        for (path, content) in entries {
            let resolved = self.resolve(path);
            if let Some(parent) = resolved.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            std::fs::write(&resolved, content)
                .with_context(|| format!("Failed to write file: {}", resolved.display()))?;
        }
        Ok(())
    }
}
