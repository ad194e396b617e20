// ==========================================
// Онтология ГРМ - 目录树遍历器
// ==========================================
// 职责: 定位根目录 → 枚举 Class/Template 目录 → 逐目录执行抽取与匹配
// 流程: SchemaExtractor → ColumnReader → AttributeMatcher → ValueExtractor
// 红线: 单个模板目录的失败不得中止整体运行
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{ExtractedRecord, MissingStat, RunResult, TemplateKey, TemplateReport};
use crate::engine::progress::ProgressSink;
use crate::i18n::t_with_args;
use crate::importer::{
    match_attributes, ColumnReader, DataCleaner, GridReader, ImportError, ImportResult,
    RecordsTable, SchemaExtractor, ValueExtractor,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

// ==========================================
// 模板目录中的两份文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFiles {
    pub template: PathBuf,
    pub records: PathBuf,
}

/// 待处理的模板目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDir {
    pub key: TemplateKey,
    pub path: PathBuf,
}

/// 遍历结果
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub root: PathBuf,
    pub result: RunResult,
    pub reports: Vec<TemplateReport>,
    pub total_dirs: usize,
    pub skipped_dirs: usize,
}

// ==========================================
// TreeWalker
// ==========================================
pub struct TreeWalker<'a> {
    reader: &'a dyn GridReader,
    config: &'a PipelineConfig,
    cleaner: DataCleaner,
}

impl<'a> TreeWalker<'a> {
    pub fn new(reader: &'a dyn GridReader, config: &'a PipelineConfig) -> Self {
        Self {
            reader,
            config,
            cleaner: DataCleaner::new(&config.values),
        }
    }

    /// 遍历解包目录并累积结果
    #[instrument(skip(self, progress), fields(extracted = %extracted_root.display()))]
    pub fn walk(&self, extracted_root: &Path, progress: &dyn ProgressSink) -> ImportResult<WalkOutcome> {
        let root = self.resolve_root(extracted_root)?;
        info!(root = %root.display(), "根目录已确定");

        let dirs = self.discover_template_dirs(&root)?;
        let total_dirs = dirs.len();
        info!(total_dirs, "模板目录枚举完成");

        let mut outcome = WalkOutcome {
            root,
            total_dirs,
            ..Default::default()
        };

        for (idx, dir) in dirs.iter().enumerate() {
            match self.locate_files(&dir.path) {
                Some(files) => {
                    let (partial, report) = self.process_template(&dir.key, &files);
                    outcome.result = std::mem::take(&mut outcome.result).merge(partial);
                    outcome.reports.push(report);
                }
                None => {
                    debug!(template = %dir.key, "缺少模板或记录文件，跳过");
                    outcome.skipped_dirs += 1;
                }
            }

            let fraction = (idx + 1) as f64 / total_dirs as f64;
            let message = t_with_args("progress.processing", &[("label", &dir.key.label())]);
            progress.report(fraction, &message);
        }

        info!(
            records = outcome.result.records.len(),
            missing = outcome.result.missing.len(),
            skipped = outcome.skipped_dirs,
            "目录遍历完成"
        );
        Ok(outcome)
    }

    /// 确定根目录
    ///
    /// 1. 深度优先（按名称排序）查找第一个名为 root_dir_name 的目录，不进入 `__MACOSX` 与隐藏目录
    /// 2. 否则取顶层第一个目录（同样忽略系统目录）
    /// 3. 顶层没有目录 → StructureError
    pub fn resolve_root(&self, extracted_root: &Path) -> ImportResult<PathBuf> {
        let wanted = self.config.layout.root_dir_name.as_str();

        let named = WalkDir::new(extracted_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_system_dir(entry.path()))
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_dir() && entry.file_name().to_string_lossy() == wanted);

        if let Some(entry) = named {
            return Ok(entry.into_path());
        }

        let fallback = sorted_subdirs(extracted_root)?
            .into_iter()
            .find(|dir| !is_system_dir(dir));

        match fallback {
            Some(dir) => {
                warn!(root = %dir.display(), "未找到 '{}'，使用顶层第一个目录", wanted);
                Ok(dir)
            }
            None => Err(ImportError::StructureError(
                extracted_root.display().to_string(),
            )),
        }
    }

    /// 枚举 root/<class>/<template> 目录（按名称排序）
    pub fn discover_template_dirs(&self, root: &Path) -> ImportResult<Vec<TemplateDir>> {
        let mut dirs = Vec::new();
        for class_dir in sorted_subdirs(root)? {
            let class_name = dir_name(&class_dir);
            for template_dir in sorted_subdirs(&class_dir)? {
                dirs.push(TemplateDir {
                    key: TemplateKey::new(class_name.clone(), dir_name(&template_dir)),
                    path: template_dir,
                });
            }
        }
        Ok(dirs)
    }

    /// 在模板目录中查找模板文件与记录文件（不递归）
    ///
    /// 小写文件名包含关键字即命中；出现多个时取排序后的第一个
    pub fn locate_files(&self, template_dir: &Path) -> Option<TemplateFiles> {
        let layout = &self.config.layout;
        let template_kw = layout.template_file_keyword.to_lowercase();
        let records_kw = layout.records_file_keyword.to_lowercase();

        let files = match sorted_files(template_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!(dir = %template_dir.display(), error = %e, "模板目录读取失败");
                return None;
            }
        };

        let mut template: Option<PathBuf> = None;
        let mut records: Option<PathBuf> = None;

        for file in files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            // Office 锁文件与 macOS AppleDouble 资源文件
            if name.starts_with("~$") || name.starts_with("._") {
                continue;
            }
            let lower = name.to_lowercase();

            if lower.contains(&template_kw) {
                if template.is_some() {
                    warn!(file = %name, "目录中存在多个模板文件，忽略");
                    continue;
                }
                template = Some(file);
            } else if lower.contains(&records_kw) {
                if records.is_some() {
                    warn!(file = %name, "目录中存在多个记录文件，忽略");
                    continue;
                }
                records = Some(file);
            }
        }

        match (template, records) {
            (Some(template), Some(records)) => Some(TemplateFiles { template, records }),
            _ => None,
        }
    }

    /// 处理单个模板目录，返回局部结果
    pub fn process_template(&self, key: &TemplateKey, files: &TemplateFiles) -> (RunResult, TemplateReport) {
        let mut partial = RunResult::new();
        let mut report = TemplateReport {
            key: key.clone(),
            schema_size: 0,
            matched: 0,
            missing: 0,
            extracted: 0,
        };

        // === 步骤 1: 模板属性 ===
        let schema = SchemaExtractor::new(self.reader, &self.config.schema).extract(&files.template);
        report.schema_size = schema.len();
        if schema.is_empty() {
            debug!(template = %key, "模板属性为空");
            return (partial, report);
        }

        // === 步骤 2: 记录文件表头 ===
        let table = match ColumnReader::new(self.reader).read_table(&files.records) {
            Ok(table) => table,
            Err(e) => {
                warn!(template = %key, error = %e, "记录文件读取失败，按无列处理");
                RecordsTable::default()
            }
        };

        // === 步骤 3: 精确匹配 ===
        let matched = match_attributes(&schema, &table.columns);
        report.matched = matched.matched.len();
        report.missing = matched.missing.len();
        partial.missing = matched
            .missing
            .iter()
            .map(|attr| MissingStat::absent(key, attr.as_str()))
            .collect();

        // === 步骤 4: 属性值 ===
        if matched.has_matches() {
            let extractor = ValueExtractor::new(self.reader, &self.cleaner);
            for row in extractor.extract_from_table(&table, &matched.matched) {
                for (attr, value) in row {
                    partial.records.push(ExtractedRecord::new(key, attr, value));
                }
            }
        }
        report.extracted = partial.records.len();

        debug!(
            template = %key,
            schema = report.schema_size,
            matched = report.matched,
            missing = report.missing,
            extracted = report.extracted,
            "模板目录处理完成"
        );
        (partial, report)
    }
}

// ==========================================
// 目录辅助函数
// ==========================================

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_system_dir(path: &Path) -> bool {
    let name = dir_name(path);
    name == "__MACOSX" || name.starts_with('.')
}

fn sorted_entries(dir: &Path, want_dirs: bool) -> ImportResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if (want_dirs && file_type.is_dir()) || (!want_dirs && file_type.is_file()) {
            entries.push(entry.path());
        }
    }
    entries.sort();
    Ok(entries)
}

fn sorted_subdirs(dir: &Path) -> ImportResult<Vec<PathBuf>> {
    sorted_entries(dir, true)
}

fn sorted_files(dir: &Path) -> ImportResult<Vec<PathBuf>> {
    sorted_entries(dir, false)
}
