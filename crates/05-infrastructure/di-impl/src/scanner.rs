//! 文件扫描器实现

use di_abstractions::{CandidateFiles, SourceScanner};
use globset::{Glob, GlobSet, GlobSetBuilder};
use infrastructure_common::{
    CandidateFile, DiscoveryError, DiscoveryResult, ModuleMetadata, ScanConfig,
};
use std::ffi::OsStr;
use tracing::debug;
use walkdir::WalkDir;

/// 基于目录遍历的文件扫描器
#[derive(Debug)]
pub struct FileScanner {
    config: ScanConfig,
    matcher: GlobSet,
}

impl FileScanner {
    /// 创建新的文件扫描器
    pub fn new(config: ScanConfig) -> DiscoveryResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.file_patterns {
            let glob = Glob::new(pattern).map_err(|e| DiscoveryError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }

        let matcher = builder.build().map_err(|e| DiscoveryError::InvalidPattern {
            pattern: config.file_patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self { config, matcher })
    }

    /// 获取扫描配置
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// 路径段是否在排除列表中
    fn is_excluded(&self, segment: &OsStr) -> bool {
        self.config
            .excluded_dirs
            .iter()
            .any(|excluded| segment == excluded.as_str())
    }
}

impl SourceScanner for FileScanner {
    fn scan<'a>(&'a self, module: &'a ModuleMetadata) -> CandidateFiles<'a> {
        if self.skips(module) {
            debug!("跳过第三方模块: {}", module.path.display());
            return Box::new(std::iter::empty());
        }

        let mut walker = WalkDir::new(&module.path).follow_links(self.config.follow_links);
        if self.config.sorted {
            walker = walker.sort_by_file_name();
        }

        Box::new(ModuleFiles {
            scanner: self,
            module,
            walker: walker.into_iter(),
        })
    }

    fn name(&self) -> &str {
        "FileScanner"
    }

    fn skips(&self, module: &ModuleMetadata) -> bool {
        module.is_vendored(&self.config.vendor_markers)
    }
}

/// 单个模块的候选文件迭代器
struct ModuleFiles<'a> {
    scanner: &'a FileScanner,
    module: &'a ModuleMetadata,
    walker: walkdir::IntoIter,
}

impl Iterator for ModuleFiles<'_> {
    type Item = DiscoveryResult<CandidateFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(error) => {
                    return Some(Err(DiscoveryError::scan_failed(
                        self.module.path.display().to_string(),
                        error.into(),
                    )));
                }
            };

            // 根目录本身
            if entry.depth() == 0 {
                continue;
            }

            if self.scanner.is_excluded(entry.file_name()) {
                if entry.file_type().is_dir() {
                    self.walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() || !self.scanner.matcher.is_match(entry.file_name()) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.module.path) else {
                continue;
            };

            return Some(Ok(CandidateFile::new(
                self.module.path.clone(),
                relative.to_path_buf(),
            )));
        }
    }
}
