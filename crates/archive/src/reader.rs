//! Source archive reading.
//!
//! Wraps a zip archive on disk and exposes entry enumeration with the
//! metadata the sharding pass needs: name, declared size, CRC-32, and the
//! full entry content. Entries are read one at a time into memory and
//! processed independently.

use crate::error::{ArchiveError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// One entry read from a source archive.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Archive entry path, e.g. `com/foo/Bar.class.dex`
    pub name: String,
    /// Uncompressed size as declared by the source archive
    pub size: u64,
    /// CRC-32 as declared by the source archive
    pub crc32: u32,
    /// Whether the entry is a directory
    pub is_dir: bool,
    /// Entry content (empty for directories)
    pub data: Vec<u8>,
}

/// A readable zip archive with path-aware error reporting.
pub struct ZipSource {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl std::fmt::Debug for ZipSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ZipSource {
    /// Open a zip archive for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ArchiveError::Open {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let archive = ZipArchive::new(file).map_err(|e| ArchiveError::Open {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Path this archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Whether the archive contains any compiled code.
    ///
    /// True iff some entry name ends in `.class` or `.dex`.
    pub fn has_code(&self) -> bool {
        self.archive
            .file_names()
            .any(|name| name.ends_with(".class") || name.ends_with(".dex"))
    }

    /// Read the entry at `index`, including its content.
    ///
    /// Directory entries come back with empty content.
    pub fn read_entry(&mut self, index: usize) -> Result<SourceEntry> {
        let mut entry = self.archive.by_index(index)?;
        let name = entry.name().to_string();
        let size = entry.size();
        let crc32 = entry.crc32();
        let is_dir = entry.is_dir();

        let mut data = Vec::new();
        if !is_dir {
            data.reserve(size as usize);
            entry
                .read_to_end(&mut data)
                .map_err(|e| ArchiveError::ReadEntry {
                    name: name.clone(),
                    source: e,
                })?;
        }

        Ok(SourceEntry {
            name,
            size,
            crc32,
            is_dir,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, data) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_open_missing_archive_names_path() {
        let err = ZipSource::open(Path::new("/nonexistent/input.jar")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/input.jar"));
    }

    #[test]
    fn test_has_code_detects_class_and_dex() {
        let dir = tempfile::tempdir().unwrap();

        let with_class = dir.path().join("classes.jar");
        write_test_zip(&with_class, &[("com/foo/Bar.class", b"cafebabe")]);
        assert!(ZipSource::open(&with_class).unwrap().has_code());

        let with_dex = dir.path().join("dexes.zip");
        write_test_zip(&with_dex, &[("classes.dex", b"dex\n035")]);
        assert!(ZipSource::open(&with_dex).unwrap().has_code());

        let resources_only = dir.path().join("resources.jar");
        write_test_zip(
            &resources_only,
            &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")],
        );
        assert!(!ZipSource::open(&resources_only).unwrap().has_code());
    }

    #[test]
    fn test_read_entry_content_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.zip");
        write_test_zip(&path, &[("com/foo/Bar.dex", b"dex-bytes")]);

        let mut source = ZipSource::open(&path).unwrap();
        assert_eq!(source.len(), 1);

        let entry = source.read_entry(0).unwrap();
        assert_eq!(entry.name, "com/foo/Bar.dex");
        assert_eq!(entry.size, b"dex-bytes".len() as u64);
        assert!(!entry.is_dir);
        assert_eq!(entry.data, b"dex-bytes");
    }
}
