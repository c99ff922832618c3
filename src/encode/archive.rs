use std::io::{Cursor, Seek, Write};

use anyhow::Context;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::encode::sink::{ItemSink, write_batch};
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::generate::batch::GeneratedBatch;
use crate::generate::config::CollectionInfo;

/// Sink packing files into a deflated zip archive.
pub struct ZipSink<W: Write + Seek> {
    writer: Option<ZipWriter<W>>,
    finished: Option<W>,
    entries: usize,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Archive into `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Some(ZipWriter::new(inner)),
            finished: None,
            entries: 0,
        }
    }

    /// Number of entries written so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Underlying writer once `end` has run.
    pub fn into_inner(self) -> ForgeResult<W> {
        self.finished
            .ok_or_else(|| ForgeError::validation("zip archive was not finished"))
    }

    fn writer(&mut self) -> ForgeResult<&mut ZipWriter<W>> {
        self.writer
            .as_mut()
            .ok_or_else(|| ForgeError::validation("zip archive already finished"))
    }
}

impl<W: Write + Seek> ItemSink for ZipSink<W> {
    fn begin(&mut self, total_items: usize) -> ForgeResult<()> {
        tracing::debug!(total_items, "starting zip archive");
        Ok(())
    }

    fn push_file(&mut self, name: &str, bytes: &[u8]) -> ForgeResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let writer = self.writer()?;
        writer
            .start_file(name, options)
            .with_context(|| format!("start zip entry '{name}'"))?;
        writer
            .write_all(bytes)
            .with_context(|| format!("write zip entry '{name}'"))?;
        self.entries += 1;
        Ok(())
    }

    fn end(&mut self) -> ForgeResult<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| ForgeError::validation("zip archive already finished"))?;
        let inner = writer.finish().context("finish zip archive")?;
        self.finished = Some(inner);
        tracing::debug!(entries = self.entries, "zip archive finished");
        Ok(())
    }
}

/// Pack `batch` into an in-memory zip archive.
pub fn archive_to_bytes(batch: &GeneratedBatch, collection: &CollectionInfo) -> ForgeResult<Vec<u8>> {
    let mut sink = ZipSink::new(Cursor::new(Vec::new()));
    write_batch(batch, collection, &mut sink)?;
    Ok(sink.into_inner()?.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/archive.rs"]
mod tests;
