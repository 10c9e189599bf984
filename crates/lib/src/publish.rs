use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::Document;

/// Somewhere documents can be published to.
pub trait Destination {
    fn exists(&self, filename: &str) -> bool;
    fn write(&self, filename: &str, content: &str) -> io::Result<()>;
    /// Names of every published document, sorted.
    fn documents(&self) -> io::Result<Vec<String>>;
}

/// A Jekyll `_posts` style directory of `.md` files.
#[derive(Clone, Debug)]
pub struct PostsDir {
    root: PathBuf,
}

impl PostsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like [`PostsDir::new`], creating the directory if needed.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = Self::new(root);
        fs::create_dir_all(&dir.root)?;
        Ok(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Destination for PostsDir {
    fn exists(&self, filename: &str) -> bool {
        self.root.join(filename).exists()
    }

    fn write(&self, filename: &str, content: &str) -> io::Result<()> {
        fs::write(self.root.join(filename), content)
    }

    fn documents(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") && entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[derive(Debug)]
pub enum PublishOutcome {
    /// A file with the same name was already there and was left untouched.
    Skipped,
    Written,
    WriteFailed(io::Error),
}

/// Write `document` unless its file already exists.
pub fn publish<D: Destination + ?Sized>(dest: &D, document: &Document) -> PublishOutcome {
    if dest.exists(&document.filename) {
        info!("already exists, skipping: {}", document.filename);
        return PublishOutcome::Skipped;
    }
    match dest.write(&document.filename, &document.content) {
        Ok(()) => {
            info!("wrote {}", document.filename);
            PublishOutcome::Written
        }
        Err(e) => {
            warn!("failed to write {}: {e}", document.filename);
            PublishOutcome::WriteFailed(e)
        }
    }
}
