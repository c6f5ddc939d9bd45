//! # 任务派发器
//!
//! 把单个文件任务提交到 rayon 线程池，立即返回 `TaskHandle`。
//!
//! ## 功能
//! - 派发不阻塞调用者
//! - 任务内的 panic 在工作线程上被捕获并转换为 `BulkError::TaskPanicked`
//! - 每个句柄恰好收到一次结果，`wait` 消耗句柄本身
//!
//! ## 依赖关系
//! - 被 `batch/orchestrator.rs` 调用
//! - 使用 `rayon` 线程池、`std::sync::mpsc` 单次通道

use super::observer::BatchObserver;
use super::task::{FileTask, TaskResult};
use crate::error::{BulkError, Result};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

/// 正在执行的任务句柄，只能被等待一次
#[derive(Debug)]
pub struct TaskHandle {
    task: FileTask,
    receiver: Receiver<Result<TaskResult>>,
}

impl TaskHandle {
    /// 阻塞直到任务结束，返回任务及其结果
    pub fn wait(self) -> (FileTask, Result<TaskResult>) {
        let outcome = self
            .receiver
            .recv()
            .unwrap_or_else(|_| {
                Err(BulkError::TaskDisconnected {
                    task: self.task.to_string(),
                })
            });
        (self.task, outcome)
    }
}

/// 任务派发器
pub struct TaskDispatcher {
    pool: rayon::ThreadPool,
    observer: Arc<dyn BatchObserver>,
}

impl TaskDispatcher {
    /// 创建派发器，`jobs == 0` 时使用 CPU 核数
    pub fn new(jobs: usize, observer: Arc<dyn BatchObserver>) -> Result<Self> {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("bulkfs-worker-{}", i))
            // 漏网的 panic 只会丢掉发送端，等待方得到 TaskDisconnected
            .panic_handler(|_| {})
            .build()
            .map_err(|e| BulkError::ThreadPool(e.to_string()))?;

        Ok(Self { pool, observer })
    }

    /// 工作线程数
    pub fn jobs(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// 派发一个任务
    pub fn dispatch(&self, task: FileTask) -> TaskHandle {
        let job = task.clone();
        self.spawn_job(task, move || job.run())
    }

    /// 在线程池上执行 `job`，结果经由句柄返回
    fn spawn_job<F>(&self, task: FileTask, job: F) -> TaskHandle
    where
        F: FnOnce() -> Result<TaskResult> + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);
        let observer = Arc::clone(&self.observer);
        let label = task.clone();

        self.pool.spawn(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(job)) {
                Ok(outcome) => outcome,
                Err(payload) => Err(BulkError::TaskPanicked {
                    task: label.to_string(),
                    message: panic_message(payload.as_ref()),
                }),
            };

            // 观察者 panic 不影响结果送达
            let ok = matches!(&outcome, Ok(result) if result.succeeded());
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                observer.task_completed(&label, ok)
            }));

            // 句柄已被丢弃时结果无人接收
            let _ = sender.send(outcome);
        });

        TaskHandle { task, receiver }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::aggregator::ResultAggregator;
    use crate::batch::observer::SilentObserver;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_dispatch_and_wait() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "abc").unwrap();

        let dispatcher = TaskDispatcher::new(2, Arc::new(SilentObserver)).unwrap();
        assert_eq!(dispatcher.jobs(), 2);

        let handle = dispatcher.dispatch(FileTask::Copy {
            src: src.clone(),
            dest: dir.path().join("b.txt"),
        });
        let (task, outcome) = handle.wait();

        assert!(matches!(task, FileTask::Copy { src: ref s, .. } if s == &src));
        assert_eq!(outcome.unwrap(), TaskResult::Copied(true));
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "abc");
    }

    #[test]
    fn test_failure_travels_as_value() {
        let dispatcher = TaskDispatcher::new(1, Arc::new(SilentObserver)).unwrap();

        let handle = dispatcher.dispatch(FileTask::Scan {
            path: PathBuf::from("/definitely/not/here.txt"),
            pattern: Arc::from("x"),
        });
        let (_, outcome) = handle.wait();

        assert!(matches!(outcome, Err(BulkError::FileReadError { .. })));
    }

    #[test]
    fn test_panicking_job_is_isolated() {
        let dir = TempDir::new().unwrap();
        let (a, b) = (dir.path().join("a.txt"), dir.path().join("b.txt"));
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let dispatcher = TaskDispatcher::new(2, Arc::new(SilentObserver)).unwrap();
        let handles = vec![
            dispatcher.dispatch(FileTask::Copy {
                src: a,
                dest: dir.path().join("a-copy.txt"),
            }),
            dispatcher.spawn_job(
                FileTask::Copy {
                    src: PathBuf::from("x.txt"),
                    dest: PathBuf::from("y.txt"),
                },
                || panic!("disk on fire"),
            ),
            dispatcher.dispatch(FileTask::Copy {
                src: b,
                dest: dir.path().join("b-copy.txt"),
            }),
        ];

        let outcomes: Vec<_> = handles.into_iter().map(TaskHandle::wait).collect();

        assert!(matches!(
            &outcomes[1].1,
            Err(BulkError::TaskPanicked { message, .. }) if message == "disk on fire"
        ));

        let observer = SilentObserver;
        let mut aggregator = ResultAggregator::new(&observer);
        let results: Vec<TaskResult> = outcomes
            .into_iter()
            .map(|(task, outcome)| aggregator.settle(&task, outcome))
            .collect();

        assert_eq!(
            results,
            vec![
                TaskResult::Copied(true),
                TaskResult::Copied(false),
                TaskResult::Copied(true)
            ]
        );
        assert_eq!(aggregator.finish().failed, 1);
        assert!(dir.path().join("a-copy.txt").exists());
        assert!(dir.path().join("b-copy.txt").exists());
    }

    /// task_completed 总是 panic 的观察者
    struct PanickingObserver;

    impl BatchObserver for PanickingObserver {
        fn task_completed(&self, _task: &FileTask, _ok: bool) {
            panic!("observer failed");
        }
    }

    #[test]
    fn test_observer_panic_keeps_result() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "abc").unwrap();

        let dispatcher = TaskDispatcher::new(1, Arc::new(PanickingObserver)).unwrap();
        let (_, outcome) = dispatcher
            .dispatch(FileTask::Copy {
                src,
                dest: dir.path().join("b.txt"),
            })
            .wait();

        assert_eq!(outcome.unwrap(), TaskResult::Copied(true));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
