//! Deterministic shard archive writing.
//!
//! Output shards are plain zip archives written for build reproducibility:
//! every entry is STORED (no compression) with the size and CRC of its
//! source entry, and the modification timestamp is pinned to a fixed epoch
//! so that rebuilding from identical inputs produces identical bytes.

use crate::error::{ArchiveError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Fixed entry modification time: January 1, 2010 00:00:00 UTC.
pub const FIXED_TIMESTAMP: (u16, u8, u8, u8, u8, u8) = (2010, 1, 1, 0, 0, 0);

/// The fixed timestamp in the zip crate's representation.
pub fn fixed_entry_time() -> DateTime {
    let (year, month, day, hour, minute, second) = FIXED_TIMESTAMP;
    DateTime::from_date_and_time(year, month, day, hour, minute, second)
        .expect("fixed entry timestamp is representable")
}

/// Write a syntactically valid zero-entry zip archive.
pub fn write_empty_archive(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ArchiveError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = ZipWriter::new(file);
    writer.finish()?;
    Ok(())
}

/// A set of output shard archives, all opened before any entry is written.
///
/// Each entry is appended to exactly one shard, in the order entries are
/// handed in. `finish` must be called to finalize every archive.
pub struct ShardSetWriter {
    writers: Vec<ZipWriter<File>>,
    paths: Vec<PathBuf>,
    entry_counts: Vec<u64>,
}

impl std::fmt::Debug for ShardSetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardSetWriter")
            .field("paths", &self.paths)
            .field("entry_counts", &self.entry_counts)
            .finish_non_exhaustive()
    }
}

impl ShardSetWriter {
    /// Open all destination archives for writing.
    ///
    /// Sharded output needs at least two destinations; a single output is
    /// handled by the caller without a sharding pass.
    pub fn create(paths: &[PathBuf]) -> Result<Self> {
        if paths.len() < 2 {
            return Err(ArchiveError::NotEnoughShards(paths.len()));
        }

        let mut writers = Vec::with_capacity(paths.len());
        for path in paths {
            let file = File::create(path).map_err(|e| ArchiveError::Create {
                path: path.clone(),
                source: e,
            })?;
            writers.push(ZipWriter::new(file));
        }

        Ok(Self {
            writers,
            paths: paths.to_vec(),
            entry_counts: vec![0; paths.len()],
        })
    }

    /// Number of shards in this set.
    pub fn shard_count(&self) -> usize {
        self.writers.len()
    }

    /// Append an entry to the given shard, STORED with the fixed timestamp.
    ///
    /// The zip writer recomputes size and CRC from the content, which by
    /// construction equal the source archive's declared values.
    pub fn append_stored(&mut self, shard: usize, name: &str, data: &[u8]) -> Result<()> {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(fixed_entry_time());

        let writer = &mut self.writers[shard];
        writer.start_file(name, options)?;
        writer.write_all(data)?;
        self.entry_counts[shard] += 1;
        Ok(())
    }

    /// Finalize every shard archive and return per-shard entry counts.
    pub fn finish(mut self) -> Result<Vec<u64>> {
        for (i, mut writer) in self.writers.drain(..).enumerate() {
            writer.finish()?;
            debug!(
                shard = i,
                path = %self.paths[i].display(),
                entries = self.entry_counts[i],
                "finalized shard archive"
            );
        }
        Ok(self.entry_counts)
    }
}
