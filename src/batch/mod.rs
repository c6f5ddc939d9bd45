//! # 批量处理模块
//!
//! 并发执行一次性批量文件操作（复制、删除、模式查找）。
//!
//! ## 功能
//! - 每个文件操作派发为一个独立任务，在 rayon 线程池上执行
//! - 等待全部任务结束后，按原始请求的键重新组装结果
//! - 单个任务失败转换为失败值，不会中断批次
//! - 收集匹配文件列表（目录 + glob 模式）
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `fsops/` 中的单文件原语
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod aggregator;
pub mod collector;
pub mod dispatcher;
pub mod observer;
pub mod orchestrator;
pub mod task;

pub use collector::FileCollector;
pub use observer::{BatchObserver, ConsoleObserver, SilentObserver};
pub use orchestrator::{BatchOrchestrator, CopyRequests};
