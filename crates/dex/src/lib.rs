//! Dex sharding pipeline for Droidbuild actions.
//!
//! This crate implements the desugar/dex/shard action: it probes an input
//! jar for code, drives the external desugarer and dex compiler, and
//! deterministically partitions the resulting dex entries across a fixed
//! number of output archives.
//!
//! Sharding keeps a class and all of its inner and synthetic classes in
//! the same output archive, which multi-dex loading requires, while
//! spreading unrelated classes by hash.
//!
//! # Example
//!
//! ```rust,no_run
//! use droidbuild_dex::config::ShardingConfig;
//! use droidbuild_dex::pipeline;
//!
//! # fn demo(config: ShardingConfig) -> droidbuild_core::Result<()> {
//! config.validate()?;
//! pipeline::run(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fnv;
pub mod pipeline;
pub mod shard;
pub mod tools;

pub use config::{ShardingConfig, DEFAULT_MIN_SDK_VERSION, MAX_SHARD_COUNT};
pub use shard::{shard_index, ShardError};
