// ==========================================
// Онтология ГРМ - 属性匹配器
// ==========================================
// 职责: 模板属性与记录文件列名 100% 精确匹配
// 规则: 双侧仅 trim 一次，不做大小写/空白归一化
// ==========================================

use crate::domain::{MatchResult, RecordColumns, TemplateSchema};

/// 精确匹配，matched / missing 均保持模板原始顺序
pub fn match_attributes(schema: &TemplateSchema, columns: &RecordColumns) -> MatchResult {
    let mut result = MatchResult::default();

    for attr in schema.attributes() {
        let attr_clean = attr.trim().to_string();
        if columns.contains(&attr_clean) {
            result.matched.push(attr_clean);
        } else {
            result.missing.push(attr_clean);
        }
    }

    result
}
