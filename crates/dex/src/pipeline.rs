//! The sharding pipeline driver.
//!
//! One invocation handles one action end-to-end, single-threaded:
//!
//! 1. Validate the configuration (no file I/O before this passes).
//! 2. Probe the input jar for code. With no `.class`/`.dex` entries, write
//!    a valid empty archive per configured output and stop.
//! 3. Desugar the input jar (external tool).
//! 4. Dex-compile the desugared jar (external tool). With a single output,
//!    the dex compiler targets it directly and no sharding pass runs.
//! 5. Shard the dex zip across the outputs.
//!
//! Intermediate files live in a process-local temporary directory. No
//! state persists across invocations, and a rerun with the same inputs is
//! safe, so nothing here retries or cleans up partially written shards.

use crate::config::ShardingConfig;
use crate::shard::{shard_index, ShardError};
use crate::tools::{self, ToolPaths};
use droidbuild_archive::{write_empty_archive, ArchiveError, ShardSetWriter, ZipSource};
use droidbuild_core::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Run the full desugar/dex/shard action.
pub fn run(config: &ShardingConfig) -> Result<()> {
    config.validate()?;

    let has_code = ZipSource::open(&config.input_jar)
        .map_err(archive_err)?
        .has_code();

    if !has_code {
        info!(input = %config.input_jar.display(), "no class or dex entries, writing empty shards");
        for out in &config.outputs {
            write_empty_archive(out).map_err(archive_err)?;
        }
        return Ok(());
    }

    let tools = ToolPaths::resolve()?;
    run_with_tools(config, &tools)
}

/// Run the desugar/dex/shard stages with explicit tool binaries.
pub fn run_with_tools(config: &ShardingConfig, tools: &ToolPaths) -> Result<()> {
    let tmp = tempfile::tempdir()
        .map_err(|e| Error::io(format!("Failed to create temporary directory: {}", e)))?;

    let desugared_jar = tmp.path().join("desugared.jar");
    tools::desugar(config, tools, &desugared_jar)?;

    if config.shard_count() == 1 {
        // Single output: the dex compiler writes it directly.
        return tools::dexbuilder(config, tools, &desugared_jar, &config.outputs[0]);
    }

    let dexed_zip = tmp.path().join("dexed.zip");
    tools::dexbuilder(config, tools, &desugared_jar, &dexed_zip)?;
    shard_zip(&dexed_zip, &config.outputs)
}

/// Shard a zip of dex entries across the output archives.
///
/// Entries are visited in source-archive order; each qualifying entry goes
/// to exactly one shard, so per-shard entry order is the subsequence of
/// source order assigned to it. Directory entries and entries without a
/// `.dex` suffix are dropped from the output entirely.
pub fn shard_zip(zip: &Path, outs: &[PathBuf]) -> Result<()> {
    let mut writers = ShardSetWriter::create(outs).map_err(archive_err)?;
    let mut source = ZipSource::open(zip).map_err(archive_err)?;
    let shard_count = outs.len();

    for i in 0..source.len() {
        let entry = source.read_entry(i).map_err(archive_err)?;
        if entry.is_dir || !entry.name.ends_with(".dex") {
            continue;
        }

        let shard = shard_index(&entry.name, shard_count).map_err(shard_err)?;
        debug!(name = %entry.name, shard, "routing entry");
        writers
            .append_stored(shard, &entry.name, &entry.data)
            .map_err(archive_err)?;
    }

    let counts = writers.finish().map_err(archive_err)?;
    info!(?counts, "sharded dex entries across {} outputs", counts.len());
    Ok(())
}

fn archive_err(err: ArchiveError) -> Error {
    let code = match &err {
        ArchiveError::Open { .. } => ErrorCode::ArchiveOpenFailed,
        ArchiveError::Create { .. } => ErrorCode::ArchiveWriteFailed,
        ArchiveError::NotEnoughShards(_) => ErrorCode::NotEnoughOutputs,
        _ => ErrorCode::ArchiveError,
    };
    Error::new(code, err.to_string()).with_source(err)
}

fn shard_err(err: ShardError) -> Error {
    Error::new(ErrorCode::InvalidEntryName, err.to_string()).with_source(err)
}
