//! # 结果输出
//!
//! 把批量结果打印为终端表格，并可选导出 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/copy.rs`, `commands/delete.rs`, `commands/find.rs` 使用
//! - 使用 `tabled` 打印表格，`csv` + `serde` 导出

use crate::error::{BulkError, Result};
use crate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 复制结果行
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CopyRow {
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Target")]
    pub target: String,
    #[tabled(rename = "Copied")]
    pub copied: bool,
}

/// 删除结果行
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DeleteRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Deleted")]
    pub deleted: bool,
}

/// 查找结果行
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FindRow {
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Matches")]
    pub matches: usize,
    #[tabled(rename = "Lines")]
    pub lines: String,
}

/// 打印表格，并在给出路径时导出 CSV
pub fn emit<T: Tabled + Serialize>(rows: &[T], csv_path: Option<&Path>) -> Result<()> {
    println!("{}", Table::new(rows));

    if let Some(path) = csv_path {
        save_csv(rows, path)?;
        output::print_success(&format!("Results saved to '{}'", path.display()));
    }

    Ok(())
}

/// 保存结果到 CSV
fn save_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| BulkError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 统计成功数量
pub fn count_ok(flags: impl IntoIterator<Item = bool>) -> (usize, usize) {
    flags
        .into_iter()
        .fold((0, 0), |(ok, total), flag| (ok + flag as usize, total + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_save_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            FindRow {
                file: "f1".to_string(),
                matches: 2,
                lines: "2 5".to_string(),
            },
            FindRow {
                file: "f2".to_string(),
                matches: 0,
                lines: String::new(),
            },
        ];

        save_csv(&rows, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "file,matches,lines\nf1,2,2 5\nf2,0,\n");
    }

    #[test]
    fn test_count_ok() {
        assert_eq!(count_ok(vec![true, false, true]), (2, 3));
        assert_eq!(count_ok(Vec::new()), (0, 0));
    }
}
