//! # copy 系列子命令 CLI 定义
//!
//! `copy`、`copy-many`、`copy-pairs` 三个子命令的参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/copy.rs`

use clap::Args;
use std::path::PathBuf;

/// 一个源文件及其目标列表（`SRC=DEST[,DEST...]`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyMapping {
    pub source: PathBuf,
    pub targets: Vec<PathBuf>,
}

/// 解析 `SRC=DEST[,DEST...]`
pub fn parse_mapping(s: &str) -> Result<CopyMapping, String> {
    let (source, targets) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SRC=DEST[,DEST...], got '{}'", s))?;

    let source = source.trim();
    if source.is_empty() {
        return Err(format!("missing source path in '{}'", s));
    }

    let targets: Vec<PathBuf> = targets
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(PathBuf::from)
        .collect();
    if targets.is_empty() {
        return Err(format!("missing target path in '{}'", s));
    }

    Ok(CopyMapping {
        source: PathBuf::from(source),
        targets,
    })
}

/// copy 子命令参数
#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Source file
    pub src: PathBuf,

    /// Destination file
    pub dest: PathBuf,
}

/// copy-many 子命令参数
#[derive(Args, Debug)]
pub struct CopyManyArgs {
    /// Copy mapping, repeatable (at most 20 distinct sources per batch)
    #[arg(short = 'm', long = "map", value_name = "SRC=DEST[,DEST...]", value_parser = parse_mapping)]
    pub mappings: Vec<CopyMapping>,

    /// CSV manifest with 'source,target' columns
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Export results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// copy-pairs 子命令参数
#[derive(Args, Debug)]
pub struct CopyPairsArgs {
    /// Source files, in order
    #[arg(long = "src", num_args = 1.., required = true)]
    pub sources: Vec<PathBuf>,

    /// Destination files, aligned with the sources by position
    #[arg(long = "dest", num_args = 1.., required = true)]
    pub destinations: Vec<PathBuf>,

    /// Export results to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
