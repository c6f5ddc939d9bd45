//! # 文件收集器
//!
//! 根据目录和 glob 模式收集待处理的文件集合。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - 逗号分隔的多个 glob 模式
//! - 可选递归目录搜索
//! - 结果按路径排序去重，作为批量操作的输入集合
//!
//! ## 依赖关系
//! - 被 `commands/find.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{BulkError, Result};

use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<IndexSet<PathBuf>> {
        if self.input.is_file() {
            return Ok(std::iter::once(self.input.clone()).collect());
        }

        if !self.input.is_dir() {
            return Err(BulkError::FileReadError {
                path: self.input.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "not a file or directory",
                ),
            });
        }

        let globs = self
            .patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    BulkError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| Self::matches_any(&globs, e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        if files.is_empty() {
            return Err(BulkError::NoFilesFound {
                pattern: self.patterns.join(","),
            });
        }

        files.sort();
        Ok(files.into_iter().collect())
    }

    /// 检查文件名是否匹配任一模式
    fn matches_any(globs: &[glob::Pattern], path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => globs.iter().any(|g| g.matches(name)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), "c").unwrap();
        dir
    }

    #[test]
    fn test_collect_flat() {
        let dir = layout();
        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.txt")
            .collect()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains(&dir.path().join("a.txt")));
    }

    #[test]
    fn test_collect_recursive_multi_pattern() {
        let dir = layout();
        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.txt, *.log")
            .recursive(true)
            .collect()
            .unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("sub").join("c.txt")));
    }

    #[test]
    fn test_collect_single_file() {
        let dir = layout();
        let file = dir.path().join("b.log");
        let files = FileCollector::new(file.clone())
            .with_pattern("*.txt")
            .collect()
            .unwrap();

        assert_eq!(files.into_iter().collect::<Vec<_>>(), vec![file]);
    }

    #[test]
    fn test_collect_no_match() {
        let dir = layout();
        let err = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv")
            .collect()
            .unwrap_err();

        assert!(matches!(err, BulkError::NoFilesFound { .. }));
    }

    #[test]
    fn test_collect_invalid_pattern() {
        let dir = layout();
        let err = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("[")
            .collect()
            .unwrap_err();

        assert!(matches!(err, BulkError::InvalidArgument(_)));
    }
}
