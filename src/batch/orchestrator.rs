//! # 批量编排器
//!
//! 把一次批量请求拆成 N 个独立任务并发执行，等待全部结束后按原始请求的
//! 键重新组装结果。
//!
//! ## 流程
//! 1. 校验输入形状（`copy_many` 源文件数必须在 1..=20，`copy_pairs` 两侧等长），
//!    不合法时在派发任何任务之前返回错误
//! 2. 每个原子操作派发一个任务，按派发顺序记录 (键, 句柄)
//! 3. 等待全部句柄结束，这是唯一的同步点
//! 4. 按第 2 步记录的顺序遍历，落定结果并组装返回结构
//!
//! 单个任务失败只影响自己的结果槽，不会中断整个批次。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `batch/dispatcher.rs`、`batch/aggregator.rs`、`batch/observer.rs`

use super::aggregator::ResultAggregator;
use super::dispatcher::{TaskDispatcher, TaskHandle};
use super::observer::{BatchObserver, BatchOp};
use super::task::{FileTask, TaskResult};
use crate::error::{BulkError, Result};

use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// `copy_many` 允许的最大源文件数
pub const MAX_COPY_SOURCES: usize = 20;

/// 源文件 -> 目标文件集合（保持调用者给出的顺序）
pub type CopyRequests = IndexMap<PathBuf, IndexSet<PathBuf>>;

/// 批量编排器
pub struct BatchOrchestrator {
    dispatcher: TaskDispatcher,
    observer: Arc<dyn BatchObserver>,
}

impl BatchOrchestrator {
    /// 创建编排器，`jobs == 0` 时使用 CPU 核数
    pub fn new(jobs: usize, observer: Arc<dyn BatchObserver>) -> Result<Self> {
        let dispatcher = TaskDispatcher::new(jobs, Arc::clone(&observer))?;
        Ok(Self {
            dispatcher,
            observer,
        })
    }

    /// 工作线程数
    pub fn jobs(&self) -> usize {
        self.dispatcher.jobs()
    }

    /// 在当前线程同步复制单个文件
    pub fn copy(&self, src: &Path, dest: &Path) -> bool {
        let task = FileTask::Copy {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        };
        let outcome = task.run();
        ResultAggregator::new(self.observer.as_ref())
            .settle(&task, outcome)
            .into_flag()
    }

    /// 把每个源文件复制到它的全部目标
    ///
    /// 返回的映射与输入键集合相同，每个值按目标集合的顺序给出复制结果。
    pub fn copy_many(&self, requests: &CopyRequests) -> Result<IndexMap<PathBuf, Vec<bool>>> {
        if requests.is_empty() || requests.len() > MAX_COPY_SOURCES {
            return Err(BulkError::InvalidArgument(format!(
                "copy batch needs between 1 and {} source files, got {}",
                MAX_COPY_SOURCES,
                requests.len()
            )));
        }

        self.warn_target_conflicts(requests);

        let tasks: Vec<(&PathBuf, FileTask)> = requests
            .iter()
            .flat_map(|(src, targets)| {
                targets.iter().map(move |dest| {
                    (
                        src,
                        FileTask::Copy {
                            src: src.clone(),
                            dest: dest.clone(),
                        },
                    )
                })
            })
            .collect();

        let mut results: IndexMap<PathBuf, Vec<bool>> = requests
            .iter()
            .map(|(src, targets)| (src.clone(), Vec::with_capacity(targets.len())))
            .collect();

        for (src, result) in self.run_batch(BatchOp::CopyMany, tasks) {
            if let Some(slot) = results.get_mut(src) {
                slot.push(result.into_flag());
            }
        }

        Ok(results)
    }

    /// 按位置一一配对复制，结果与输入位置对齐
    pub fn copy_pairs(&self, sources: &[PathBuf], destinations: &[PathBuf]) -> Result<Vec<bool>> {
        if sources.len() != destinations.len() {
            return Err(BulkError::LengthMismatch {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }

        let tasks = sources
            .iter()
            .zip(destinations)
            .enumerate()
            .map(|(i, (src, dest))| {
                (
                    i,
                    FileTask::Copy {
                        src: src.clone(),
                        dest: dest.clone(),
                    },
                )
            })
            .collect();

        Ok(self
            .run_batch(BatchOp::CopyPairs, tasks)
            .into_iter()
            .map(|(_, result)| result.into_flag())
            .collect())
    }

    /// 删除一组路径，结果按集合的遍历顺序排列
    pub fn delete_many(&self, paths: &IndexSet<PathBuf>) -> Vec<bool> {
        let tasks = paths
            .iter()
            .map(|path| (path, FileTask::Delete { path: path.clone() }))
            .collect();

        self.run_batch(BatchOp::DeleteMany, tasks)
            .into_iter()
            .map(|(_, result)| result.into_flag())
            .collect()
    }

    /// 在一组文件中查找字面子串，返回 路径 -> 匹配行号
    ///
    /// 读取失败的文件对应空列表，失败原因交给观察者。
    pub fn find_pattern_many(
        &self,
        paths: &IndexSet<PathBuf>,
        pattern: &str,
    ) -> IndexMap<PathBuf, Vec<usize>> {
        let pattern: Arc<str> = Arc::from(pattern);
        let tasks = paths
            .iter()
            .map(|path| {
                (
                    path,
                    FileTask::Scan {
                        path: path.clone(),
                        pattern: Arc::clone(&pattern),
                    },
                )
            })
            .collect();

        self.run_batch(BatchOp::FindPattern, tasks)
            .into_iter()
            .map(|(path, result)| (path.clone(), result.into_lines()))
            .collect()
    }

    /// 派发 -> 等待全部 -> 按派发顺序落定
    fn run_batch<K>(&self, op: BatchOp, tasks: Vec<(K, FileTask)>) -> Vec<(K, TaskResult)> {
        let start = Instant::now();
        self.observer.batch_started(op, tasks.len());

        let pending: Vec<(K, TaskHandle)> = tasks
            .into_iter()
            .map(|(key, task)| (key, self.dispatcher.dispatch(task)))
            .collect();

        let resolved: Vec<_> = pending
            .into_iter()
            .map(|(key, handle)| {
                let (task, outcome) = handle.wait();
                (key, task, outcome)
            })
            .collect();
        let elapsed = start.elapsed();

        let mut aggregator = ResultAggregator::new(self.observer.as_ref());
        let results: Vec<(K, TaskResult)> = resolved
            .into_iter()
            .map(|(key, task, outcome)| (key, aggregator.settle(&task, outcome)))
            .collect();

        self.observer
            .batch_finished(op, &aggregator.finish(), elapsed);

        results
    }

    /// 多个源文件写同一个目标时发出警告（最后完成的写入生效）
    fn warn_target_conflicts(&self, requests: &CopyRequests) {
        let mut owners: IndexMap<&PathBuf, usize> = IndexMap::new();
        for target in requests.values().flatten() {
            *owners.entry(target).or_default() += 1;
        }

        for (target, count) in owners.into_iter().filter(|(_, count)| *count > 1) {
            self.observer.warning(&format!(
                "'{}' is targeted by {} sources; the last copy to finish wins",
                target.display(),
                count
            ));
        }
    }
}
