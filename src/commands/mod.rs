//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/`
//! - 子模块: copy, delete, find, report

pub mod copy;
pub mod delete;
pub mod find;
pub mod report;

use crate::batch::{BatchObserver, BatchOrchestrator, ConsoleObserver, SilentObserver};
use crate::cli::{Cli, Commands};
use crate::error::Result;

use std::sync::Arc;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let observer: Arc<dyn BatchObserver> = if cli.quiet {
        Arc::new(SilentObserver)
    } else {
        Arc::new(ConsoleObserver::new())
    };

    let orchestrator = BatchOrchestrator::new(cli.jobs, observer)?;

    match cli.command {
        Commands::Copy(args) => copy::execute(args, &orchestrator),
        Commands::CopyMany(args) => copy::execute_many(args, &orchestrator),
        Commands::CopyPairs(args) => copy::execute_pairs(args, &orchestrator),
        Commands::Delete(args) => delete::execute(args, &orchestrator),
        Commands::Find(args) => find::execute(args, &orchestrator),
    }
}
