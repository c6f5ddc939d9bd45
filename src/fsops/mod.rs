//! # 单文件操作模块
//!
//! 提供复制、删除、按字面子串扫描三个同步阻塞的单文件原语。
//! 原语本身不含并发或状态，由 `batch/` 模块包装成可调度的任务。
//!
//! ## 依赖关系
//! - 被 `batch/task.rs` 调用
//! - 使用 `error.rs`

pub mod primitives;

pub use primitives::{copy_file, delete_path, scan_for_pattern};
