//! The in-memory set of ROM files a container is built from.

use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::role;

/// Extensions of files that commonly sit next to ROM dumps but are never ROMs.
const IGNORED_EXTENSIONS: [&str; 2] = [".html", ".zip"];

/// A mapping from file name (case preserved) to raw file content.
///
/// Iteration follows byte order of the names, but nothing in the build
/// depends on it: every role sorts its own files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFileSet {
    files: BTreeMap<String, Vec<u8>>,
}

impl SourceFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every regular file directly inside `dir`.
    ///
    /// Subdirectories and `.html` / `.zip` files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NeoRomError::Io`](crate::NeoRomError::Io) if the directory
    /// or one of its files cannot be read.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        tracing::info!(dir = %dir.display(), "Loading ROM files");

        let mut set = Self::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            let lower = name.trim().to_lowercase();
            if IGNORED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                tracing::debug!(file = %name, "Skipping non-ROM file");
                continue;
            }

            if entry.file_type()?.is_dir() {
                tracing::debug!(file = %name, "Skipping directory");
                continue;
            }

            let data = fs::read(entry.path())?;
            match role::classify(&name) {
                Some(role) => {
                    tracing::debug!(file = %name, size = data.len(), role = role.token(), "Loaded ROM file")
                }
                None => {
                    tracing::debug!(file = %name, size = data.len(), "Loaded unclassified file")
                }
            }
            set.insert(name, data);
        }

        tracing::info!(files = set.len(), "ROM files loaded");
        Ok(set)
    }

    /// Add a file, replacing any previous content under the same name.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> &mut Self {
        self.files.insert(name.into(), data);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    pub fn names(&self) -> btree_map::Keys<'_, String, Vec<u8>> {
        self.files.keys()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<u8>)> for SourceFileSet {
    fn from_iter<I: IntoIterator<Item = (N, Vec<u8>)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(name, data)| (name.into(), data))
                .collect(),
        }
    }
}
