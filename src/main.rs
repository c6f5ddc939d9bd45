//! # bulkfs - 批量并发文件操作工具
//!
//! 对一组文件并发执行复制、删除、字面子串查找，返回每个文件的结果。
//! 单个文件失败不会中断整个批次；批量形状不合法时在派发前直接失败。
//!
//! ## 子命令
//! - `copy`       - 复制单个文件
//! - `copy-many`  - 每个源文件复制到多个目标（最多 20 个源文件）
//! - `copy-pairs` - 按位置配对复制
//! - `delete`     - 批量删除
//! - `find`       - 批量查找字面子串
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── batch/     (并发派发、等待、汇总)
//!   │           └── fsops/    (单文件原语)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod fsops;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&utils::output::error_chain(&e));
        std::process::exit(1);
    }
}
