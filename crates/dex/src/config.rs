//! Action configuration.
//!
//! Options are parsed once at process start, validated before any file
//! I/O, and passed by reference into the pipeline. Nothing here mutates
//! after construction.

use droidbuild_core::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Build-wide minimum supported API level, used when `-min_sdk_version`
/// is not passed.
pub const DEFAULT_MIN_SDK_VERSION: u32 = 13;

/// Upper bound on the number of output shards. A defensive limit against
/// misconfiguration, not a format restriction.
pub const MAX_SHARD_COUNT: usize = 256;

/// Immutable configuration for one sharding action invocation.
#[derive(Debug, Clone)]
pub struct ShardingConfig {
    /// Path to the platform android.jar
    pub android_jar: PathBuf,
    /// Compile classpath entries
    pub classpath: Vec<PathBuf>,
    /// Enable core library desugaring
    pub desugar_core_libs: bool,
    /// JSON descriptor for library desugaring
    pub desugared_lib_config: Option<PathBuf>,
    /// Input jar
    pub input_jar: PathBuf,
    /// Output shard paths; the count determines the shard count
    pub outputs: Vec<PathBuf>,
    /// Minimum targeted SDK version. At 24 or above the desugarer keeps
    /// default methods in interfaces.
    pub min_sdk_version: u32,
}

impl ShardingConfig {
    /// Number of output shards.
    pub fn shard_count(&self) -> usize {
        self.outputs.len()
    }

    /// Validate the configuration before any file I/O happens.
    ///
    /// Checks the shard count bound first, then that every referenced
    /// input path exists.
    pub fn validate(&self) -> Result<()> {
        let count = self.shard_count();
        if count < 1 || count > MAX_SHARD_COUNT {
            return Err(Error::shard_count_out_of_range(count));
        }

        require_file(&self.android_jar, "-android_jar")?;
        require_file(&self.input_jar, "-in")?;
        for entry in &self.classpath {
            require_file(entry, "-classpath")?;
        }
        if let Some(config) = &self.desugared_lib_config {
            require_file(config, "-desugared_lib_config")?;
        }

        Ok(())
    }
}

fn require_file(path: &Path, flag: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::file_not_found(path)).context(format!("While validating {}", flag))
    }
}
