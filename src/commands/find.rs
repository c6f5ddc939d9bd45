//! # find 命令实现
//!
//! 在文件集合中并发查找字面子串，输出每个文件的匹配行号。
//!
//! ## 依赖关系
//! - 使用 `cli/find.rs` 定义的参数
//! - 使用 `batch/collector.rs` 收集文件，`batch/orchestrator.rs` 执行
//! - 使用 `commands/report.rs`, `utils/output.rs`

use super::report::{self, FindRow};
use crate::batch::{BatchOrchestrator, FileCollector};
use crate::cli::find::FindArgs;
use crate::error::Result;
use crate::utils::output;

use indexmap::IndexSet;
use std::path::PathBuf;

/// 执行 find 命令
pub fn execute(args: FindArgs, orchestrator: &BatchOrchestrator) -> Result<()> {
    output::print_header("Searching Files");

    let mut paths: IndexSet<PathBuf> = args.paths.into_iter().collect();
    if let Some(dir) = args.dir {
        let collected = FileCollector::new(dir)
            .with_pattern(&args.glob)
            .recursive(args.recursive)
            .collect()?;
        paths.extend(collected);
    }

    output::print_info(&format!(
        "Searching {} file(s) for '{}'...",
        paths.len(),
        args.pattern
    ));

    let results = orchestrator.find_pattern_many(&paths, &args.pattern);

    let rows: Vec<FindRow> = results
        .iter()
        .map(|(path, lines)| FindRow {
            file: path.display().to_string(),
            matches: lines.len(),
            lines: lines
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();

    report::emit(&rows, args.csv.as_deref())?;

    let hits = rows.iter().filter(|r| r.matches > 0).count();
    output::print_done(&format!(
        "Pattern found in {}/{} file(s)",
        hits,
        rows.len()
    ));

    Ok(())
}
