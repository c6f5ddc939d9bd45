//! # delete 命令实现
//!
//! 并发删除一组路径，路径不存在或无权限时对应结果为 `false`。
//!
//! ## 依赖关系
//! - 使用 `cli/delete.rs` 定义的参数
//! - 使用 `batch/orchestrator.rs`
//! - 使用 `commands/report.rs`, `utils/output.rs`

use super::report::{self, DeleteRow};
use crate::batch::BatchOrchestrator;
use crate::cli::delete::DeleteArgs;
use crate::error::Result;
use crate::utils::output;

use indexmap::IndexSet;
use std::path::PathBuf;

/// 执行 delete 命令
pub fn execute(args: DeleteArgs, orchestrator: &BatchOrchestrator) -> Result<()> {
    output::print_header("Deleting Files");

    let paths: IndexSet<PathBuf> = args.paths.into_iter().collect();
    let results = orchestrator.delete_many(&paths);

    let rows: Vec<DeleteRow> = paths
        .iter()
        .zip(&results)
        .map(|(path, deleted)| DeleteRow {
            path: path.display().to_string(),
            deleted: *deleted,
        })
        .collect();

    report::emit(&rows, args.csv.as_deref())?;

    let (ok, total) = report::count_ok(results);
    output::print_done(&format!("Deleted {}/{} path(s)", ok, total));

    Ok(())
}
