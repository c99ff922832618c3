use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::ForgeResult;
use crate::generate::batch::GeneratedBatch;
use crate::generate::config::CollectionInfo;

/// Sink contract for consuming a finished batch as named files.
///
/// Ordering contract: files arrive in item order, each item's image before its
/// metadata document.
pub trait ItemSink {
    /// Called once before any file is pushed.
    fn begin(&mut self, total_items: usize) -> ForgeResult<()>;
    /// Push one named file.
    fn push_file(&mut self, name: &str, bytes: &[u8]) -> ForgeResult<()>;
    /// Called once after the last file is pushed.
    fn end(&mut self) -> ForgeResult<()>;
}

/// Stream every item of `batch` into `sink` as `<prefix>_NNNN.png` + `<prefix>_NNNN.json`.
pub fn write_batch(
    batch: &GeneratedBatch,
    collection: &CollectionInfo,
    sink: &mut dyn ItemSink,
) -> ForgeResult<()> {
    sink.begin(batch.len())?;
    for item in batch.items() {
        sink.push_file(&collection.image_file_name(item.index), &item.png)?;
        sink.push_file(
            &collection.metadata_file_name(item.index),
            item.metadata_json.as_bytes(),
        )?;
    }
    sink.end()
}

/// Write the first `count` composites of `batch` into `dir`.
///
/// Returns the written paths; an empty batch writes nothing.
pub fn write_previews(
    batch: &GeneratedBatch,
    collection: &CollectionInfo,
    dir: &Path,
    count: usize,
) -> ForgeResult<Vec<PathBuf>> {
    let previews = batch.preview(count);
    if previews.is_empty() {
        return Ok(Vec::new());
    }

    let mut sink = DirSink::new(dir);
    sink.begin(previews.len())?;
    for item in previews {
        sink.push_file(&collection.image_file_name(item.index), &item.png)?;
    }
    sink.end()?;
    Ok(sink.written)
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    began: Option<usize>,
    ended: bool,
    files: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Item count announced in `begin`, if called.
    pub fn announced_items(&self) -> Option<usize> {
        self.began
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.ended
    }

    /// Borrow the captured files in push order.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }
}

impl ItemSink for InMemorySink {
    fn begin(&mut self, total_items: usize) -> ForgeResult<()> {
        self.began = Some(total_items);
        self.ended = false;
        self.files.clear();
        Ok(())
    }

    fn push_file(&mut self, name: &str, bytes: &[u8]) -> ForgeResult<()> {
        self.files.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn end(&mut self) -> ForgeResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Sink writing each file into a directory, created on `begin`.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirSink {
    /// Sink targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ItemSink for DirSink {
    fn begin(&mut self, _total_items: usize) -> ForgeResult<()> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_file(&mut self, name: &str, bytes: &[u8]) -> ForgeResult<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ForgeResult<()> {
        Ok(())
    }
}

/// Create `path`'s parent directory if it has one.
pub fn ensure_parent_dir(path: &Path) -> ForgeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
