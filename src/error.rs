//! # 统一错误处理模块
//!
//! 定义 bulkfs 的所有错误类型，使用 `thiserror` 派生。
//!
//! 批量形状错误（`InvalidArgument`、`LengthMismatch`）在派发任何任务之前
//! 直接返回给调用者；单个任务的 I/O 错误则作为任务结果的值在线程间传递，
//! 由 `batch/aggregator.rs` 转换为失败值。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// bulkfs 统一错误类型
#[derive(Error, Debug)]
pub enum BulkError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete: {path}")]
    FileDeleteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source and destination are the same file: {path}")]
    SameFile { path: String },

    // ─────────────────────────────────────────────────────────────
    // 批量形状错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Length mismatch: {sources} source(s) but {destinations} destination(s)")]
    LengthMismatch { sources: usize, destinations: usize },

    // ─────────────────────────────────────────────────────────────
    // 任务执行错误
    // ─────────────────────────────────────────────────────────────
    #[error("Task '{task}' panicked: {message}")]
    TaskPanicked { task: String, message: String },

    #[error("Task '{task}' finished without reporting a result")]
    TaskDisconnected { task: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BulkError>;
