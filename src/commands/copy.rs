//! # copy 系列命令实现
//!
//! ## 功能
//! - `copy`: 同步复制单个文件
//! - `copy-many`: 合并 `--map` 与 CSV 清单，按源文件并发复制到所有目标
//! - `copy-pairs`: 按位置配对并发复制
//!
//! ## 依赖关系
//! - 使用 `cli/copy.rs` 定义的参数
//! - 使用 `batch/orchestrator.rs`
//! - 使用 `commands/report.rs`, `utils/output.rs`

use super::report::{self, CopyRow};
use crate::batch::{BatchOrchestrator, CopyRequests};
use crate::cli::copy::{CopyArgs, CopyManyArgs, CopyMapping, CopyPairsArgs};
use crate::error::Result;
use crate::utils::output;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CSV 清单中的一行
#[derive(Debug, Deserialize)]
struct ManifestRow {
    source: PathBuf,
    target: PathBuf,
}

/// 执行 copy 命令
pub fn execute(args: CopyArgs, orchestrator: &BatchOrchestrator) -> Result<()> {
    if orchestrator.copy(&args.src, &args.dest) {
        output::print_success(&format!(
            "Copied '{}' to '{}'",
            args.src.display(),
            args.dest.display()
        ));
    } else {
        output::print_warning(&format!(
            "Failed to copy '{}' to '{}'",
            args.src.display(),
            args.dest.display()
        ));
    }

    Ok(())
}

/// 执行 copy-many 命令
pub fn execute_many(args: CopyManyArgs, orchestrator: &BatchOrchestrator) -> Result<()> {
    output::print_header("Copying Files");

    let requests = build_requests(&args.mappings, args.manifest.as_deref())?;
    let targets: usize = requests.values().map(|t| t.len()).sum();

    output::print_info(&format!(
        "Copying {} source file(s) to {} target(s) with {} worker(s)...",
        requests.len(),
        targets,
        orchestrator.jobs()
    ));

    let results = orchestrator.copy_many(&requests)?;

    let rows: Vec<CopyRow> = requests
        .iter()
        .flat_map(|(src, targets)| {
            let flags = results.get(src).map(Vec::as_slice).unwrap_or(&[]);
            targets.iter().zip(flags).map(move |(dest, ok)| CopyRow {
                source: src.display().to_string(),
                target: dest.display().to_string(),
                copied: *ok,
            })
        })
        .collect();

    report::emit(&rows, args.csv.as_deref())?;

    let (ok, total) = report::count_ok(rows.iter().map(|r| r.copied));
    output::print_done(&format!("Copied {}/{} file(s)", ok, total));

    Ok(())
}

/// 执行 copy-pairs 命令
pub fn execute_pairs(args: CopyPairsArgs, orchestrator: &BatchOrchestrator) -> Result<()> {
    output::print_header("Copying File Pairs");

    let results = orchestrator.copy_pairs(&args.sources, &args.destinations)?;

    let rows: Vec<CopyRow> = args
        .sources
        .iter()
        .zip(&args.destinations)
        .zip(&results)
        .map(|((src, dest), ok)| CopyRow {
            source: src.display().to_string(),
            target: dest.display().to_string(),
            copied: *ok,
        })
        .collect();

    report::emit(&rows, args.csv.as_deref())?;

    let (ok, total) = report::count_ok(results);
    output::print_done(&format!("Copied {}/{} file pair(s)", ok, total));

    Ok(())
}

/// 合并命令行映射与 CSV 清单，同一源文件的目标取并集（保持首次出现顺序）
fn build_requests(mappings: &[CopyMapping], manifest: Option<&Path>) -> Result<CopyRequests> {
    let mut requests = CopyRequests::new();

    for mapping in mappings {
        requests
            .entry(mapping.source.clone())
            .or_default()
            .extend(mapping.targets.iter().cloned());
    }

    if let Some(path) = manifest {
        let mut reader = csv::Reader::from_path(path)?;
        for record in reader.deserialize() {
            let row: ManifestRow = record?;
            requests.entry(row.source).or_default().insert(row.target);
        }
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::copy::parse_mapping;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_requests_merges_sources() {
        let mappings = vec![
            parse_mapping("a=x,y").unwrap(),
            parse_mapping("b=z").unwrap(),
            parse_mapping("a=y,w").unwrap(),
        ];

        let requests = build_requests(&mappings, None).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[Path::new("a")].iter().collect::<Vec<_>>(),
            vec![Path::new("x"), Path::new("y"), Path::new("w")]
        );
        assert_eq!(requests[Path::new("b")].len(), 1);
    }

    #[test]
    fn test_build_requests_from_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("manifest.csv");
        fs::write(&manifest, "source,target\na,x\nb,y\na,z\n").unwrap();
        let mappings = vec![parse_mapping("c=q").unwrap()];

        let requests = build_requests(&mappings, Some(&manifest)).unwrap();

        assert_eq!(
            requests.keys().collect::<Vec<_>>(),
            vec![Path::new("c"), Path::new("a"), Path::new("b")]
        );
        assert_eq!(requests[Path::new("a")].len(), 2);
    }

    #[test]
    fn test_build_requests_bad_manifest() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("manifest.csv");
        fs::write(&manifest, "src,dst\na,x\n").unwrap();

        assert!(build_requests(&[], Some(&manifest)).is_err());
    }
}
