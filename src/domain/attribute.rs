// ==========================================
// Онтология ГРМ - 属性模型
// ==========================================
// 职责: 模板属性清单 / 记录文件表头 / 匹配结果
// 红线: matched ∪ missing = schema, matched ∩ missing = ∅
// ==========================================

use crate::domain::types::TemplateKey;
use serde::{Deserialize, Serialize};

/// 属性名（已 trim）
pub type AttributeName = String;

// ==========================================
// TemplateSchema - 模板属性清单
// ==========================================
// 由 SchemaExtractor 生成，按首次出现顺序保存，名称唯一
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSchema {
    attributes: Vec<AttributeName>,
}

impl TemplateSchema {
    /// 由已去重的属性列表构造（重复项按首次出现保留）
    pub fn new(attributes: Vec<AttributeName>) -> Self {
        let mut schema = Self::default();
        for attr in attributes {
            schema.push_unique(attr);
        }
        schema
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 追加属性；已存在时忽略。返回是否实际追加
    pub fn push_unique(&mut self, attribute: AttributeName) -> bool {
        if self.attributes.iter().any(|a| *a == attribute) {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    pub fn attributes(&self) -> &[AttributeName] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn into_inner(self) -> Vec<AttributeName> {
        self.attributes
    }
}

// ==========================================
// RecordColumns - 记录文件表头快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordColumns {
    columns: Vec<String>,
}

impl RecordColumns {
    /// 每个列名做一次 trim，保留原始列序
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// 列名首次出现的下标（重复列名以最左侧为准）
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ==========================================
// MatchResult - 模板属性的匹配划分
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<AttributeName>,
    pub missing: Vec<AttributeName>,
}

impl MatchResult {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    pub fn has_matches(&self) -> bool {
        !self.matched.is_empty()
    }
}

// ==========================================
// TemplateReport - 单个模板目录的处理摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateReport {
    pub key: TemplateKey,
    pub schema_size: usize,
    pub matched: usize,
    pub missing: usize,
    pub extracted: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_keeps_first_occurrence() {
        let schema = TemplateSchema::new(vec![
            "Марка".to_string(),
            "Модель".to_string(),
            "Марка".to_string(),
        ]);
        assert_eq!(schema.attributes(), &["Марка", "Модель"]);
    }

    #[test]
    fn test_record_columns_trimmed() {
        let columns = RecordColumns::new(vec!["  Марка ", "Другое"]);
        assert!(columns.contains("Марка"));
        assert!(!columns.contains("  Марка "));
        assert_eq!(columns.position("Другое"), Some(1));
    }

    #[test]
    fn test_record_columns_duplicate_position() {
        let columns = RecordColumns::new(vec!["A", "B", "A"]);
        assert_eq!(columns.position("A"), Some(0));
    }
}
