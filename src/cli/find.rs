//! # find 子命令 CLI 定义
//!
//! 在文件集合中查找字面子串（不是正则表达式）。
//! 文件集合来自位置参数，或 `--dir` + `--glob` 收集。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/find.rs`

use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use std::path::PathBuf;

/// find 子命令参数
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Literal substring to search for
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub pattern: String,

    /// Files to search
    #[arg(required_unless_present = "dir")]
    pub paths: Vec<PathBuf>,

    /// Collect files to search from this directory
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Glob pattern(s) for --dir, comma separated
    #[arg(short, long, default_value = "*", requires = "dir")]
    pub glob: String,

    /// Recurse into subdirectories of --dir
    #[arg(short, long, default_value_t = false, requires = "dir")]
    pub recursive: bool,

    /// Export results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
