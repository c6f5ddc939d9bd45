//! # 任务与任务结果
//!
//! 定义单个文件操作任务 (`FileTask`) 及其结果 (`TaskResult`)。
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs`、`batch/aggregator.rs`、`batch/orchestrator.rs` 使用
//! - 使用 `fsops/` 中的单文件原语

use crate::error::Result;
use crate::fsops;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Copy,
    Delete,
    Scan,
}

impl TaskKind {
    /// 任务失败时写入结果槽的默认值
    pub fn failure_value(self) -> TaskResult {
        match self {
            TaskKind::Copy => TaskResult::Copied(false),
            TaskKind::Delete => TaskResult::Deleted(false),
            TaskKind::Scan => TaskResult::MatchLines(Vec::new()),
        }
    }
}

/// 单个文件操作任务，派发后不可变
#[derive(Debug, Clone)]
pub enum FileTask {
    Copy { src: PathBuf, dest: PathBuf },
    Delete { path: PathBuf },
    Scan { path: PathBuf, pattern: Arc<str> },
}

impl FileTask {
    pub fn kind(&self) -> TaskKind {
        match self {
            FileTask::Copy { .. } => TaskKind::Copy,
            FileTask::Delete { .. } => TaskKind::Delete,
            FileTask::Scan { .. } => TaskKind::Scan,
        }
    }

    /// 在当前线程同步执行任务
    pub fn run(&self) -> Result<TaskResult> {
        match self {
            FileTask::Copy { src, dest } => {
                fsops::copy_file(src, dest)?;
                Ok(TaskResult::Copied(true))
            }
            FileTask::Delete { path } => fsops::delete_path(path).map(TaskResult::Deleted),
            FileTask::Scan { path, pattern } => {
                fsops::scan_for_pattern(path, pattern).map(TaskResult::MatchLines)
            }
        }
    }
}

impl fmt::Display for FileTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTask::Copy { src, dest } => {
                write!(f, "copy {} -> {}", src.display(), dest.display())
            }
            FileTask::Delete { path } => write!(f, "delete {}", path.display()),
            FileTask::Scan { path, pattern } => {
                write!(f, "scan {} for '{}'", path.display(), pattern)
            }
        }
    }
}

/// 单个任务的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Copied(bool),
    Deleted(bool),
    MatchLines(Vec<usize>),
}

impl TaskResult {
    /// 任务是否成功完成（扫描只要读完文件即视为成功）
    pub fn succeeded(&self) -> bool {
        match self {
            TaskResult::Copied(ok) | TaskResult::Deleted(ok) => *ok,
            TaskResult::MatchLines(_) => true,
        }
    }

    /// 布尔结果（复制/删除）
    pub fn into_flag(self) -> bool {
        match self {
            TaskResult::Copied(ok) | TaskResult::Deleted(ok) => ok,
            TaskResult::MatchLines(_) => false,
        }
    }

    /// 行号结果（扫描）
    pub fn into_lines(self) -> Vec<usize> {
        match self {
            TaskResult::MatchLines(lines) => lines,
            TaskResult::Copied(_) | TaskResult::Deleted(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_failure_values() {
        assert_eq!(TaskKind::Copy.failure_value(), TaskResult::Copied(false));
        assert_eq!(TaskKind::Delete.failure_value(), TaskResult::Deleted(false));
        assert_eq!(
            TaskKind::Scan.failure_value(),
            TaskResult::MatchLines(Vec::new())
        );
    }

    #[test]
    fn test_run_tasks() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dest = dir.path().join("b.txt");
        fs::write(&src, "x\nneedle\n").unwrap();

        let copy = FileTask::Copy {
            src: src.clone(),
            dest: dest.clone(),
        };
        assert_eq!(copy.run().unwrap(), TaskResult::Copied(true));

        let scan = FileTask::Scan {
            path: dest.clone(),
            pattern: Arc::from("needle"),
        };
        assert_eq!(scan.run().unwrap(), TaskResult::MatchLines(vec![2]));

        let delete = FileTask::Delete { path: dest };
        assert_eq!(delete.run().unwrap(), TaskResult::Deleted(true));
        assert_eq!(delete.run().unwrap(), TaskResult::Deleted(false));
    }

    #[test]
    fn test_display() {
        let task = FileTask::Copy {
            src: PathBuf::from("a.txt"),
            dest: PathBuf::from("b.txt"),
        };
        assert_eq!(task.to_string(), "copy a.txt -> b.txt");
        assert_eq!(task.kind(), TaskKind::Copy);
    }
}
