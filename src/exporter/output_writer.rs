// ==========================================
// Онтология ГРМ - 输出文件生成
// ==========================================
// 职责: 将聚合结果写成参考文件、汇总文件、缺失统计文件与 README
// 输出目录结构:
//   <results>/<reference_dir>/<属性>.xlsx   每个有值属性一个
//   <results>/<consolidated_file>          全部抽取记录（按累积顺序）
//   <results>/<mismatch_file>              仅在存在缺失统计时
//   <results>/<summary_file>               始终生成
// ==========================================

use crate::config::OutputNames;
use crate::domain::RunResult;
use crate::engine::Aggregate;
use crate::exporter::error::ExportResult;
use crate::exporter::sheet_writer::{SheetTable, SheetWriter};
use crate::exporter::summary::render_summary;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// 文件名中不允许出现的字符
const UNSAFE_FILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// 文件名主干的最大字节数（文件系统上限 255 字节，预留重名后缀与扩展名）
const MAX_STEM_BYTES: usize = 200;

/// 输出文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Reference,
    Consolidated,
    Mismatch,
    Summary,
}

/// 已生成的输出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub kind: OutputKind,
    pub path: PathBuf,
    /// 相对结果目录的名称（使用 `/` 分隔）
    pub relative: String,
}

/// 替换文件系统不安全字符
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_FILE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// 按字节截断到字符边界
fn truncate_stem(stem: String) -> String {
    if stem.len() <= MAX_STEM_BYTES {
        return stem;
    }
    let mut end = MAX_STEM_BYTES;
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    stem[..end].to_string()
}

/// 清洗后重名时追加 `_2`、`_3` …（忽略大小写比较）
fn unique_stem(stem: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(stem.to_lowercase()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", stem, n);
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

pub struct OutputWriter<'a> {
    sheets: &'a dyn SheetWriter,
    names: &'a OutputNames,
}

impl<'a> OutputWriter<'a> {
    pub fn new(sheets: &'a dyn SheetWriter, names: &'a OutputNames) -> Self {
        Self { sheets, names }
    }

    /// 写出全部输出文件
    #[instrument(skip_all, fields(results_dir = %results_dir.display()))]
    pub fn write_all(
        &self,
        results_dir: &Path,
        result: &RunResult,
        aggregate: &Aggregate,
        generated_at: DateTime<Local>,
    ) -> ExportResult<Vec<OutputFile>> {
        fs::create_dir_all(results_dir)?;
        let mut files = Vec::new();

        if !result.records.is_empty() {
            files.extend(self.write_reference_files(results_dir, aggregate)?);
            files.push(self.write_consolidated(results_dir, result)?);
        }

        if !result.missing.is_empty() {
            files.push(self.write_mismatch(results_dir, result)?);
        }

        files.push(self.write_summary(results_dir, aggregate, &files, generated_at)?);

        info!(files = files.len(), "输出文件生成完成");
        Ok(files)
    }

    /// 每个属性一个参考文件，值升序
    pub fn write_reference_files(&self, results_dir: &Path, aggregate: &Aggregate) -> ExportResult<Vec<OutputFile>> {
        let dir = results_dir.join(&self.names.reference_dir);
        fs::create_dir_all(&dir)?;

        let mut taken = HashSet::new();
        let mut files = Vec::new();

        for (attribute, values) in aggregate.collapsed.iter() {
            if values.is_empty() {
                continue;
            }
            let stem = unique_stem(truncate_stem(sanitize_file_name(attribute)), &mut taken);
            let file_name = format!("{}.xlsx", stem);
            let path = dir.join(&file_name);

            let mut table = SheetTable::new([&self.names.attribute_column, &self.names.value_column]);
            for value in values {
                table.push_row(vec![attribute.clone(), value.clone()]);
            }
            self.sheets.write_sheet(&path, &self.names.sheet_name, &table)?;
            debug!(attribute = %attribute, values = values.len(), file = %file_name, "参考文件已写出");

            files.push(OutputFile {
                kind: OutputKind::Reference,
                path,
                relative: format!("{}/{}", self.names.reference_dir, file_name),
            });
        }

        Ok(files)
    }

    /// 汇总文件: 属性, 模板, 类别, 值（累积顺序）
    pub fn write_consolidated(&self, results_dir: &Path, result: &RunResult) -> ExportResult<OutputFile> {
        let names = self.names;
        let mut table = SheetTable::new([
            &names.attribute_column,
            &names.template_column,
            &names.class_column,
            &names.value_column,
        ]);
        for record in &result.records {
            table.push_row(vec![
                record.attribute.clone(),
                record.template.clone(),
                record.class_name.clone(),
                record.value.clone(),
            ]);
        }
        self.write_table(results_dir, &names.consolidated_file, OutputKind::Consolidated, &table)
    }

    /// 缺失统计文件: 类别, 模板, 属性, 状态
    pub fn write_mismatch(&self, results_dir: &Path, result: &RunResult) -> ExportResult<OutputFile> {
        let names = self.names;
        let mut table = SheetTable::new([
            &names.class_column,
            &names.template_column,
            &names.attribute_column,
            &names.status_column,
        ]);
        for stat in &result.missing {
            table.push_row(vec![
                stat.class_name.clone(),
                stat.template.clone(),
                stat.attribute.clone(),
                stat.status.as_label().to_string(),
            ]);
        }
        self.write_table(results_dir, &names.mismatch_file, OutputKind::Mismatch, &table)
    }

    fn write_summary(
        &self,
        results_dir: &Path,
        aggregate: &Aggregate,
        produced: &[OutputFile],
        generated_at: DateTime<Local>,
    ) -> ExportResult<OutputFile> {
        let listed: Vec<String> = produced.iter().map(|f| f.relative.clone()).collect();
        let text = render_summary(&aggregate.stats, &listed, generated_at);

        let path = results_dir.join(&self.names.summary_file);
        fs::write(&path, text)?;
        Ok(OutputFile {
            kind: OutputKind::Summary,
            path,
            relative: self.names.summary_file.clone(),
        })
    }

    fn write_table(
        &self,
        results_dir: &Path,
        file_name: &str,
        kind: OutputKind,
        table: &SheetTable,
    ) -> ExportResult<OutputFile> {
        let path = results_dir.join(file_name);
        self.sheets.write_sheet(&path, &self.names.sheet_name, table)?;
        debug!(file = %file_name, rows = table.rows.len(), "表格已写出");
        Ok(OutputFile {
            kind,
            path,
            relative: file_name.to_string(),
        })
    }
}
