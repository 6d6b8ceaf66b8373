use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::FontError;

/// On-disk font program cache.
///
/// Entries are keyed by a digest of `(family, weight, charset-or-"full")`
/// and never invalidated: the bytes stored under a key are deterministic
/// given that key. Writes land in a temp file first and are persisted by
/// rename, so concurrent writers of the same key degrade to
/// last-writer-wins instead of interleaved corruption.
#[derive(Debug, Clone)]
pub struct DiskFontCache {
    root: PathBuf,
}

impl DiskFontCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location under the platform cache directory, falling back
    /// to the system temp dir when none is known.
    pub fn default_location() -> Self {
        let root = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vitae")
            .join("fonts");
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic content-addressed key for a resolution request.
    pub fn key(family: &str, weight: u16, charset: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(family.to_lowercase().as_bytes());
        hasher.update([0u8]);
        hasher.update(weight.to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(charset.unwrap_or("full").as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Digest of the distinct codepoints of `text`, for subset-qualified
    /// keys. Order-insensitive: equal character sets hash equally.
    pub fn charset_hash(text: &str) -> String {
        let chars: BTreeSet<char> = text.chars().collect();
        let mut hasher = Sha256::new();
        for c in chars {
            hasher.update((c as u32).to_be_bytes());
        }
        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_string()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.font"))
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(_) => None,
        }
    }

    pub fn put(&self, key: &str, bytes: &[u8]) -> Result<(), FontError> {
        fs::create_dir_all(&self.root)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        std::io::Write::write_all(&mut tmp, bytes)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| FontError::Io(e.error))?;
        Ok(())
    }

    /// Removes every cached entry. The directory itself stays.
    pub fn clear(&self) -> Result<(), FontError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "font") {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
