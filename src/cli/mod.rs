//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `copy`: 复制单个文件
//! - `copy-many`: 每个源文件复制到多个目标
//! - `copy-pairs`: 源/目标按位置配对复制
//! - `delete`: 批量删除
//! - `find`: 批量查找字面子串
//!
//! 全局参数 `--jobs`、`--quiet` 也可通过环境变量 `BULKFS_JOBS`、`BULKFS_QUIET` 设置。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: copy, delete, find

pub mod copy;
pub mod delete;
pub mod find;

use clap::{Parser, Subcommand};

/// bulkfs - 批量并发文件操作工具
#[derive(Parser)]
#[command(name = "bulkfs")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Bulk concurrent file operations: copy, delete and pattern search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Number of worker threads (0 = auto)
    #[arg(short, long, global = true, env = "BULKFS_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Suppress progress bars and per-file failure logging
    #[arg(short, long, global = true, env = "BULKFS_QUIET", default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Copy a single file synchronously
    Copy(copy::CopyArgs),

    /// Copy each source file to one or more targets concurrently
    CopyMany(copy::CopyManyArgs),

    /// Copy sources to destinations pairwise by position
    CopyPairs(copy::CopyPairsArgs),

    /// Delete files (or empty directories) concurrently
    Delete(delete::DeleteArgs),

    /// Search files for a literal substring concurrently
    Find(find::FindArgs),
}
