//! Zip archive reading and deterministic shard writing.
//!
//! This crate handles the archive side of the dex-sharding action:
//!
//! - Enumerating source archive entries with name, size, CRC, and content
//! - Detecting whether an input jar carries compiled code
//! - Writing N output shard archives with reproducible metadata (STORED
//!   entries, source CRC, fixed modification time)

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{ArchiveError, Result};
pub use reader::{SourceEntry, ZipSource};
pub use writer::{write_empty_archive, ShardSetWriter, FIXED_TIMESTAMP};
