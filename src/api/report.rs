// ==========================================
// Онтология ГРМ - 运行报告
// ==========================================
// 职责: 生成运行完成后展示给用户的本地化报告文本
// ==========================================

use crate::config::OutputNames;
use crate::engine::RunStats;
use crate::exporter::{format_count, OutputFile, OutputKind, TIMESTAMP_FORMAT};
use crate::i18n::{t, t_with_args};
use chrono::{DateTime, Local};

const RULE_WIDTH: usize = 50;

fn count_line(key: &str, value: usize) -> String {
    t_with_args(key, &[("count", &format_count(value))])
}

fn name_line(key: &str, name: &str) -> String {
    t_with_args(key, &[("name", name)])
}

/// 生成报告文本
pub fn build_report(
    stats: &RunStats,
    files: &[OutputFile],
    names: &OutputNames,
    generated_at: DateTime<Local>,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let date = generated_at.format(TIMESTAMP_FORMAT).to_string();

    let mut lines = vec![
        rule.clone(),
        t("report.title"),
        rule.clone(),
        t_with_args("report.date", &[("date", &date)]),
        String::new(),
        t("report.results"),
    ];

    if stats.total_records > 0 {
        lines.push(count_line("report.records", stats.total_records));
        lines.push(count_line("report.attributes", stats.distinct_attributes));
        lines.push(count_line("report.values", stats.distinct_values));
        lines.push(count_line("report.templates", stats.distinct_templates));
        lines.push(count_line("report.classes", stats.distinct_classes));
    }

    if stats.total_missing > 0 {
        lines.push(String::new());
        lines.push(t("report.problems"));
        lines.push(count_line("report.missing_total", stats.total_missing));
        lines.push(count_line("report.missing_distinct", stats.distinct_missing_attributes));
        lines.push(count_line("report.missing_templates", stats.templates_with_missing));
    }

    lines.push(String::new());
    lines.push(t("report.files"));
    lines.push(name_line("report.archive_line", &names.archive_file));

    let has = |kind: OutputKind| files.iter().any(|f| f.kind == kind);
    if has(OutputKind::Reference) {
        lines.push(name_line("report.file_reference", &names.reference_dir));
    }
    if has(OutputKind::Consolidated) {
        lines.push(name_line("report.file_consolidated", &names.consolidated_file));
    }
    if has(OutputKind::Mismatch) {
        lines.push(name_line("report.file_mismatch", &names.mismatch_file));
    }
    if has(OutputKind::Summary) {
        lines.push(name_line("report.file_summary", &names.summary_file));
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push(t("report.success"));
    lines.push(rule);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(kind: OutputKind, relative: &str) -> OutputFile {
        OutputFile {
            kind,
            path: PathBuf::from(relative),
            relative: relative.to_string(),
        }
    }

    #[test]
    fn test_report_sections_follow_outputs() {
        let stats = RunStats {
            total_records: 1200,
            distinct_attributes: 3,
            distinct_values: 40,
            distinct_templates: 2,
            distinct_classes: 1,
            ..Default::default()
        };
        let names = OutputNames::default();
        let files = vec![
            file(OutputKind::Reference, "Вспомогательные справочники/Марка.xlsx"),
            file(OutputKind::Consolidated, "Сводные_данные.xlsx"),
            file(OutputKind::Summary, "README.txt"),
        ];

        let report = build_report(&stats, &files, &names, Local::now());

        assert!(report.contains("1,200"));
        assert!(report.contains("результаты_обработки.zip"));
        assert!(report.contains("Вспомогательные справочники"));
        assert!(report.contains("Сводные_данные.xlsx"));
        assert!(report.contains("README.txt"));
        assert!(!report.contains("Статистика_отсутствующих.xlsx"));
    }

    #[test]
    fn test_report_lists_mismatch_file() {
        let stats = RunStats {
            total_missing: 2,
            distinct_missing_attributes: 1,
            templates_with_missing: 1,
            ..Default::default()
        };
        let names = OutputNames::default();
        let files = vec![
            file(OutputKind::Mismatch, "Статистика_отсутствующих.xlsx"),
            file(OutputKind::Summary, "README.txt"),
        ];

        let report = build_report(&stats, &files, &names, Local::now());
        assert!(report.contains("Статистика_отсутствующих.xlsx"));
        assert!(!report.contains("Сводные_данные.xlsx"));
    }
}
