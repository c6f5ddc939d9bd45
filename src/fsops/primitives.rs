//! # 单文件原语
//!
//! ## 功能
//! - `copy_file`: 完整读取源文件字节流并写入目标，源读尽后才算成功
//! - `delete_path`: 删除文件或空目录；路径不存在或无权限时返回 `false`
//! - `scan_for_pattern`: 逐行扫描，返回包含字面子串的 1 基行号
//!
//! ## 依赖关系
//! - 被 `fsops/mod.rs` 导出
//! - 使用 `error.rs`

use crate::error::{BulkError, Result};

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// 复制缓冲区大小
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// 复制单个文件，返回写入的字节数
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    if is_same_file(src, dest) {
        return Err(BulkError::SameFile {
            path: src.display().to_string(),
        });
    }

    let input = File::open(src).map_err(|e| read_error(src, e))?;
    let output = File::create(dest).map_err(|e| write_error(dest, e))?;

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(src, e)),
        };
        writer
            .write_all(&buffer[..n])
            .map_err(|e| write_error(dest, e))?;
        copied += n as u64;
    }

    writer.flush().map_err(|e| write_error(dest, e))?;

    Ok(copied)
}

/// 删除文件或空目录
///
/// 路径不存在或权限不足属于正常结果，返回 `Ok(false)`；
/// 其余 I/O 错误（例如目录非空）返回 `Err`。
pub fn delete_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if is_expected_delete_failure(&e) => return Ok(false),
        Err(e) => return Err(delete_error(path, e)),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(true),
        Err(e) if is_expected_delete_failure(&e) => Ok(false),
        Err(e) => Err(delete_error(path, e)),
    }
}

/// 扫描文件中包含 `pattern` 的行（1 基行号，按文件顺序）
///
/// `pattern` 按字面子串匹配。行尾的 `\r\n` 被去掉，非 UTF-8 字节按有损方式解码。
/// 读取失败返回 `Err`，调用方可据此区分“无匹配”和“读取失败”。
pub fn scan_for_pattern(path: &Path, pattern: &str) -> Result<Vec<usize>> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut reader = BufReader::new(file);

    let mut line = Vec::new();
    let mut line_number = 0usize;
    let mut matches = Vec::new();

    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| read_error(path, e))?;
        if n == 0 {
            break;
        }
        line_number += 1;

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        if String::from_utf8_lossy(&line).contains(pattern) {
            matches.push(line_number);
        }
    }

    Ok(matches)
}

/// 两个路径是否指向同一个已存在的文件（比较设备号与 inode，硬链接也算同一文件）
fn is_same_file(src: &Path, dest: &Path) -> bool {
    same_file::is_same_file(src, dest).unwrap_or(false)
}

fn is_expected_delete_failure(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

fn read_error(path: &Path, source: io::Error) -> BulkError {
    BulkError::FileReadError {
        path: path.display().to_string(),
        source,
    }
}

fn write_error(path: &Path, source: io::Error) -> BulkError {
    BulkError::FileWriteError {
        path: path.display().to_string(),
        source,
    }
}

fn delete_error(path: &Path, source: io::Error) -> BulkError {
    BulkError::FileDeleteError {
        path: path.display().to_string(),
        source,
    }
}
