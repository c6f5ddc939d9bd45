//! # 结果汇总器
//!
//! 把已结束任务的结果落到对应的结果槽：失败被记录并转换为该操作的失败值
//! （复制/删除为 `false`，扫描为空列表），不会继续向上传播。
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs` 调用
//! - 使用 `batch/observer.rs` 报告失败

use super::observer::BatchObserver;
use super::task::{FileTask, TaskResult};
use crate::error::Result;
use crate::utils::output;

/// 批量处理结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// 成功数量
    pub succeeded: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (任务, 原因)
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    /// 总任务数量
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// 结果汇总器
pub struct ResultAggregator<'a> {
    observer: &'a dyn BatchObserver,
    summary: BatchSummary,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(observer: &'a dyn BatchObserver) -> Self {
        Self {
            observer,
            summary: BatchSummary::default(),
        }
    }

    /// 落定单个任务结果
    pub fn settle(&mut self, task: &FileTask, outcome: Result<TaskResult>) -> TaskResult {
        match outcome {
            Ok(result) => {
                if result.succeeded() {
                    self.summary.succeeded += 1;
                } else {
                    self.summary.failed += 1;
                    self.summary
                        .failures
                        .push((task.to_string(), "operation reported failure".to_string()));
                }
                result
            }
            Err(e) => {
                self.observer.task_failed(task, &e);
                self.summary.failed += 1;
                self.summary
                    .failures
                    .push((task.to_string(), output::error_chain(&e)));
                task.kind().failure_value()
            }
        }
    }

    /// 结束汇总，返回统计
    pub fn finish(self) -> BatchSummary {
        self.summary
    }
}
