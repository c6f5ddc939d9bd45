//! # delete 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/delete.rs`

use clap::Args;
use std::path::PathBuf;

/// delete 子命令参数
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Paths to delete (duplicates are removed)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Export results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
