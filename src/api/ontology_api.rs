// ==========================================
// Онтология ГРМ - 处理入口 API
// ==========================================
// 职责: 单次运行的完整流程与工作区生命周期
// 流程: 解包 → 目录遍历 → 聚合 → 输出文件 → 打包 → 复制结果
// 红线: 每次运行使用独立临时工作区，任何返回路径上都会被清理
// ==========================================

use crate::api::error::{PipelineError, PipelineResult};
use crate::api::report::build_report;
use crate::config::PipelineConfig;
use crate::engine::{aggregate, ProgressSink, RunStats, ScaledProgress, TreeWalker};
use crate::exporter::{pack_directory, OutputFile, OutputWriter, SheetWriter, XlsxSheetWriter};
use crate::i18n::t;
use crate::importer::{unpack_archive, ExcelGridReader, GridReader};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, instrument, warn};

/// 工作区目录前缀
pub const WORKSPACE_PREFIX: &str = "ontology_";
const EXTRACTED_DIR: &str = "extracted";

/// 可下载文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadableFile {
    pub path: PathBuf,
    pub display_name: String,
}

/// 成功运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub archive_path: PathBuf,
    pub report: String,
    pub files: Vec<DownloadableFile>,
    pub stats: RunStats,
    /// 归档内的文件（相对结果目录）
    pub entries: Vec<String>,
    pub skipped_dirs: usize,
}

/// 面向界面的响应: 成功 (路径, 报告, 文件)，失败 (None, 错误消息, [])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub archive_path: Option<PathBuf>,
    pub message: String,
    pub files: Vec<DownloadableFile>,
}

impl From<PipelineResult<ProcessOutcome>> for ProcessResponse {
    fn from(result: PipelineResult<ProcessOutcome>) -> Self {
        match result {
            Ok(outcome) => ProcessResponse {
                archive_path: Some(outcome.archive_path),
                message: outcome.report,
                files: outcome.files,
            },
            Err(err) => ProcessResponse {
                archive_path: None,
                message: err.user_message(),
                files: Vec::new(),
            },
        }
    }
}

// ==========================================
// OntologyApi
// ==========================================
pub struct OntologyApi {
    config: PipelineConfig,
    reader: Box<dyn GridReader>,
    sheets: Box<dyn SheetWriter>,
    /// 工作区父目录，None 时使用系统临时目录
    workspace_root: Option<PathBuf>,
}

impl OntologyApi {
    /// 使用 xlsx 读写实现
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_io(config, Box::new(ExcelGridReader), Box::new(XlsxSheetWriter))
    }

    pub fn with_io(config: PipelineConfig, reader: Box<dyn GridReader>, sheets: Box<dyn SheetWriter>) -> Self {
        Self {
            config,
            reader,
            sheets,
            workspace_root: None,
        }
    }

    /// 在指定目录下创建工作区
    pub fn with_workspace_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(dir.into());
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 处理输入归档，结果归档复制到 `out_dir`
    ///
    /// # 返回
    /// - Ok(ProcessOutcome): 结果归档路径、报告与统计
    /// - Err(PipelineError): 致命错误（工作区已清理）
    #[instrument(skip_all, fields(input = ?input))]
    pub fn process_archive(
        &self,
        input: Option<&Path>,
        out_dir: &Path,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<ProcessOutcome> {
        let input = input.ok_or(PipelineError::MissingInput)?;
        if !input.is_file() {
            return Err(PipelineError::MissingInput);
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let workspace = match &self.workspace_root {
            Some(dir) => builder.tempdir_in(dir)?,
            None => builder.tempdir()?,
        };
        info!(workspace = %workspace.path().display(), "工作区已创建");

        let outcome = self.run_in_workspace(&workspace, input, out_dir, progress);

        if let Err(e) = workspace.close() {
            warn!(error = %e, "工作区清理失败");
        }
        outcome
    }

    /// `process_archive` 的界面契约版本，错误只记录日志
    pub fn respond(&self, input: Option<&Path>, out_dir: &Path, progress: &dyn ProgressSink) -> ProcessResponse {
        let result = self.process_archive(input, out_dir, progress);
        match &result {
            Ok(outcome) => info!(archive = %outcome.archive_path.display(), "处理完成"),
            Err(err) => err.log(),
        }
        ProcessResponse::from(result)
    }

    fn run_in_workspace(
        &self,
        workspace: &TempDir,
        input: &Path,
        out_dir: &Path,
        progress: &dyn ProgressSink,
    ) -> PipelineResult<ProcessOutcome> {
        let names = &self.config.output;

        // === 步骤 1: 解包 ===
        progress.report(0.0, &t("progress.unpacking"));
        let extracted = workspace.path().join(EXTRACTED_DIR);
        let unpacked = unpack_archive(input, &extracted)?;
        if unpacked.is_empty() || is_empty_dir(&extracted)? {
            return Err(PipelineError::ArchiveEmpty);
        }
        progress.report(0.2, &t("progress.unpacked"));

        // === 步骤 2: 目录遍历 ===
        progress.report(0.2, &t("progress.analyzing"));
        let walker = TreeWalker::new(self.reader.as_ref(), &self.config);
        let scaled = ScaledProgress::new(progress, 0.2, 0.6);
        let walked = walker.walk(&extracted, &scaled)?;
        if walked.result.is_empty() {
            return Err(PipelineError::EmptyResult);
        }
        progress.report(0.8, &t("progress.processed"));

        // === 步骤 3: 聚合与输出 ===
        progress.report(0.8, &t("progress.writing"));
        let generated_at = Local::now();
        let agg = aggregate(&walked.result);
        let results_dir = workspace.path().join(&names.results_dir);
        let files: Vec<OutputFile> = OutputWriter::new(self.sheets.as_ref(), names).write_all(
            &results_dir,
            &walked.result,
            &agg,
            generated_at,
        )?;

        // === 步骤 4: 打包 ===
        progress.report(0.9, &t("progress.packing"));
        let packed = workspace.path().join(&names.archive_file);
        pack_directory(workspace.path(), &results_dir, &packed)?;

        fs::create_dir_all(out_dir)?;
        let archive_path = out_dir.join(&names.archive_file);
        fs::copy(&packed, &archive_path)?;
        progress.report(1.0, &t("progress.done"));

        info!(
            records = agg.stats.total_records,
            missing = agg.stats.total_missing,
            archive = %archive_path.display(),
            "运行完成"
        );

        Ok(ProcessOutcome {
            report: build_report(&agg.stats, &files, names, generated_at),
            files: vec![DownloadableFile {
                path: archive_path.clone(),
                display_name: names.archive_file.clone(),
            }],
            archive_path,
            stats: agg.stats,
            entries: files.into_iter().map(|f| f.relative).collect(),
            skipped_dirs: walked.skipped_dirs,
        })
    }
}

fn is_empty_dir(dir: &Path) -> PipelineResult<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NoOpProgressSink;
    use std::fs::File;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_missing_input() {
        let out = TempDir::new().unwrap();
        let api = OntologyApi::new(PipelineConfig::default());

        let result = api.process_archive(None, out.path(), &NoOpProgressSink);
        assert!(matches!(result, Err(PipelineError::MissingInput)));

        let result = api.process_archive(Some(Path::new("/nonexistent/input.zip")), out.path(), &NoOpProgressSink);
        assert!(matches!(result, Err(PipelineError::MissingInput)));
    }

    #[test]
    fn test_invalid_archive_response() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.zip");
        fs::write(&input, b"not a zip").unwrap();

        let api = OntologyApi::new(PipelineConfig::default());
        let response = api.respond(Some(&input), dir.path(), &NoOpProgressSink);

        assert!(response.archive_path.is_none());
        assert!(response.files.is_empty());
        assert!(!response.message.is_empty());
    }

    #[test]
    fn test_structure_without_templates_is_empty_result() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.zip");
        {
            let mut zip = ZipWriter::new(File::create(&input).unwrap());
            let options = SimpleFileOptions::default();
            zip.start_file("Онтология ГРМ/Класс/Шаблон/notes.txt", options).unwrap();
            zip.write_all(b"-").unwrap();
            zip.finish().unwrap();
        }

        let api = OntologyApi::new(PipelineConfig::default());
        let result = api.process_archive(Some(&input), &dir.path().join("out"), &NoOpProgressSink);

        assert!(matches!(result, Err(PipelineError::EmptyResult)));
        assert!(!dir.path().join("out").join("результаты_обработки.zip").exists());
    }
}
