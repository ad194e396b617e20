// ==========================================
// Онтология ГРМ - 模板属性抽取器
// ==========================================
// 职责: 在模板前 N 行定位属性行，截取属性区间并过滤系统属性
// 流程: 定位属性行 → 截取区间（至截止标记） → 去重 → 排除过滤
// ==========================================

use crate::config::SchemaRules;
use crate::domain::TemplateSchema;
use crate::importer::importer_trait::{CellGrid, GridReader};
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// 纯函数: 标记与排除规则
// ==========================================

/// 查找属性行：前 scan_rows 行中，拼接文本包含 marker 的第一行
pub fn find_schema_row(grid: &CellGrid, marker: &str, scan_rows: usize) -> Option<usize> {
    grid.iter()
        .take(scan_rows)
        .position(|row| row.join(" ").contains(marker))
}

/// 截取属性区间
///
/// - 含 stop_marker 的单元格及其后全部丢弃
/// - 空单元格跳过，重复名称保留首次出现
/// - include_marker = true: 从行首收集，含 marker 的单元格规范化为 marker 本身
/// - include_marker = false: 只收集首个含 marker 单元格之后的单元格；
///   若没有单个单元格包含 marker（标记跨单元格），则从行首收集
pub fn collect_span(
    row: &[String],
    marker: &str,
    stop_marker: &str,
    include_marker: bool,
) -> Vec<String> {
    let marker_cell = row.iter().position(|c| c.trim().contains(marker));
    let start = match (include_marker, marker_cell) {
        (false, Some(idx)) => idx + 1,
        _ => 0,
    };

    let mut schema = TemplateSchema::empty();
    for (idx, cell) in row.iter().enumerate() {
        let text = cell.trim();
        if text.contains(stop_marker) {
            break;
        }
        if idx < start || text.is_empty() {
            continue;
        }
        if text.contains(marker) {
            if include_marker {
                schema.push_unique(marker.to_string());
            }
            continue;
        }
        schema.push_unique(text.to_string());
    }
    schema.into_inner()
}

/// 是否为系统属性（忽略大小写的双向子串匹配）
pub fn is_excluded(name: &str, excluded_labels: &[String]) -> bool {
    let name_lower = name.trim().to_lowercase();
    excluded_labels.iter().any(|label| {
        let label_lower = label.to_lowercase();
        label_lower == name_lower
            || name_lower.contains(&label_lower)
            || label_lower.contains(&name_lower)
    })
}

/// 过滤系统属性，保持顺序
pub fn filter_excluded(names: Vec<String>, excluded_labels: &[String]) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && !is_excluded(n, excluded_labels))
        .collect()
}

// ==========================================
// SchemaExtractor
// ==========================================
pub struct SchemaExtractor<'a> {
    reader: &'a dyn GridReader,
    rules: &'a SchemaRules,
}

impl<'a> SchemaExtractor<'a> {
    pub fn new(reader: &'a dyn GridReader, rules: &'a SchemaRules) -> Self {
        Self { reader, rules }
    }

    /// 从模板文件抽取属性清单
    ///
    /// 读取失败不视为错误：记录 warn 并返回空清单
    pub fn extract(&self, template_path: &Path) -> TemplateSchema {
        match self.reader.read_grid(template_path, Some(self.rules.scan_rows)) {
            Ok(grid) => self.extract_from_grid(&grid),
            Err(e) => {
                warn!(path = %template_path.display(), error = %e, "模板读取失败，按空属性清单处理");
                TemplateSchema::empty()
            }
        }
    }

    /// 从已读取的网格抽取属性清单
    pub fn extract_from_grid(&self, grid: &CellGrid) -> TemplateSchema {
        let rules = self.rules;
        let Some(row_idx) = find_schema_row(grid, &rules.schema_marker, rules.scan_rows) else {
            debug!("前 {} 行未找到属性行标记", rules.scan_rows);
            return TemplateSchema::empty();
        };

        let collected = collect_span(
            &grid[row_idx],
            &rules.schema_marker,
            &rules.stop_marker,
            rules.include_marker_attribute,
        );
        let filtered = filter_excluded(collected, &rules.excluded_labels);
        debug!(row = row_idx + 1, attributes = filtered.len(), "属性行解析完成");

        TemplateSchema::new(filtered)
    }
}
