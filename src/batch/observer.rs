//! # 批量执行观察者
//!
//! 编排器不直接输出任何内容，而是把批次开始、任务完成、任务失败、
//! 批次结束等事件交给注入的 `BatchObserver`。
//!
//! ## 功能
//! - `ConsoleObserver`: 进度条 + 彩色终端输出，批次结束时打印耗时
//! - `SilentObserver`: 不输出任何内容（`--quiet`）
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs`、`batch/aggregator.rs`、`batch/orchestrator.rs` 调用
//! - 使用 `utils/output.rs`、`utils/progress.rs`

use super::aggregator::BatchSummary;
use super::task::FileTask;
use crate::error::BulkError;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// 批量操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOp {
    CopyMany,
    CopyPairs,
    DeleteMany,
    FindPattern,
}

impl fmt::Display for BatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOp::CopyMany => write!(f, "copy"),
            BatchOp::CopyPairs => write!(f, "pairwise copy"),
            BatchOp::DeleteMany => write!(f, "deletion"),
            BatchOp::FindPattern => write!(f, "pattern search"),
        }
    }
}

/// 批量执行事件接收者
///
/// `task_completed` 在工作线程上调用，其余方法只在调用编排器的线程上调用。
pub trait BatchObserver: Send + Sync {
    /// 批次开始，即将派发 `tasks` 个任务
    fn batch_started(&self, _op: BatchOp, _tasks: usize) {}

    /// 单个任务执行完毕
    fn task_completed(&self, _task: &FileTask, _ok: bool) {}

    /// 单个任务失败，已被转换为失败值
    fn task_failed(&self, _task: &FileTask, _error: &BulkError) {}

    /// 非致命警告
    fn warning(&self, _message: &str) {}

    /// 批次结束
    fn batch_finished(&self, _op: BatchOp, _summary: &BatchSummary, _elapsed: Duration) {}
}

/// 不输出任何内容的观察者
#[derive(Debug, Default)]
pub struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// 终端观察者：进度条 + 彩色输出
#[derive(Default)]
pub struct ConsoleObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打印时暂停进度条，避免输出错位
    fn print_above_bar(&self, print: impl FnOnce()) {
        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }
}

impl BatchObserver for ConsoleObserver {
    fn batch_started(&self, op: BatchOp, tasks: usize) {
        let pb = progress::create_progress_bar(tasks as u64, &format!("Running {}", op));
        let mut guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(pb);
    }

    fn task_completed(&self, _task: &FileTask, _ok: bool) {
        let guard = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.as_ref() {
            pb.inc(1);
        }
    }

    fn task_failed(&self, task: &FileTask, error: &BulkError) {
        let message = format!("{}: {}", task, output::error_chain(error));
        self.print_above_bar(|| output::print_error(&message));
    }

    fn warning(&self, message: &str) {
        self.print_above_bar(|| output::print_warning(message));
    }

    fn batch_finished(&self, op: BatchOp, summary: &BatchSummary, elapsed: Duration) {
        let pb = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        output::print_info(&format!(
            "Completed {} of {} task(s) in {}ms ({} succeeded, {} failed)",
            op,
            summary.total(),
            elapsed.as_millis(),
            summary.succeeded,
            summary.failed
        ));

        if let Some((task, reason)) = summary.failures.first() {
            output::print_warning(&format!(
                "{} task(s) failed, first: {} ({})",
                summary.failed, task, reason
            ));
        }
    }
}
