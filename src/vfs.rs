use std::path::{Path, PathBuf};

/// What a [`VirtualEntry`] turns into on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { content: String },
}
/// A file or directory staged in memory before being written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    /// Path relative to the scaffold root. Empty for the root itself.
    pub destination: PathBuf,
    pub kind: EntryKind,
    /// Extra lines reported once the entry has been created.
    pub notes: Vec<String>,
}
impl VirtualEntry {
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn is_root(&self) -> bool {
        self.destination.as_os_str().is_empty()
    }
}
/// An ordered set of [`VirtualEntry`] values rooted at the target directory.
///
/// Entries are materialized in insertion order, so every directory has to be pushed before
/// anything placed inside it.
#[derive(Debug, Clone)]
pub struct VirtualFS {
    pub root: PathBuf,
    pub entries: Vec<VirtualEntry>,
}
impl VirtualFS {
    /// Starts a plan whose first entry is the root directory.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            entries: vec![VirtualEntry {
                destination: PathBuf::new(),
                kind: EntryKind::Directory,
                notes: Vec::new(),
            }],
        }
    }

    pub fn push_dir<P: Into<PathBuf>>(&mut self, destination: P) {
        self.entries.push(VirtualEntry {
            destination: destination.into(),
            kind: EntryKind::Directory,
            notes: Vec::new(),
        });
    }

    pub fn push_file<P: Into<PathBuf>>(
        &mut self,
        destination: P,
        content: String,
    ) -> &mut VirtualEntry {
        self.entries.push(VirtualEntry {
            destination: destination.into(),
            kind: EntryKind::File { content },
            notes: Vec::new(),
        });

        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Full on-disk path of `entry`.
    pub fn resolve(&self, entry: &VirtualEntry) -> PathBuf {
        if entry.is_root() {
            self.root.clone()
        } else {
            self.root.join(&entry.destination)
        }
    }

    pub fn file(&self, destination: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match &entry.kind {
            EntryKind::File { content } if entry.destination == Path::new(destination) => {
                Some(content.as_str())
            }
            _ => None,
        })
    }
}
