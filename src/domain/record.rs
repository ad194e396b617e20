// ==========================================
// Онтология ГРМ - 抽取记录模型
// ==========================================
// 职责: 抽取值记录 / 缺失属性记录 / 单次运行结果
// 说明: serde 字段名与输出表格列名一致
// ==========================================

use crate::domain::attribute::AttributeName;
use crate::domain::types::{AttributeStatus, TemplateKey};
use serde::{Deserialize, Serialize};

// ==========================================
// ExtractedRecord - 单个属性值
// ==========================================
// 一条数据行中一个属性的一个非空值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "Атрибут")]
    pub attribute: AttributeName,
    #[serde(rename = "Шаблон")]
    pub template: String,
    #[serde(rename = "Класс")]
    pub class_name: String,
    #[serde(rename = "Значение")]
    pub value: String,
}

impl ExtractedRecord {
    pub fn new(key: &TemplateKey, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            template: key.template_name.clone(),
            class_name: key.class_name.clone(),
            value: value.into(),
        }
    }
}

// ==========================================
// MissingStat - 缺失属性
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingStat {
    #[serde(rename = "Класс")]
    pub class_name: String,
    #[serde(rename = "Шаблон")]
    pub template: String,
    #[serde(rename = "Атрибут")]
    pub attribute: AttributeName,
    #[serde(rename = "Статус")]
    pub status: AttributeStatus,
}

impl MissingStat {
    pub fn absent(key: &TemplateKey, attribute: impl Into<String>) -> Self {
        Self {
            class_name: key.class_name.clone(),
            template: key.template_name.clone(),
            attribute: attribute.into(),
            status: AttributeStatus::AbsentFromRecords,
        }
    }
}

// ==========================================
// RunResult - 单次运行的累积结果
// ==========================================
// TreeWalker 按折叠方式累积，OutputWriter 消费一次
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub records: Vec<ExtractedRecord>,
    pub missing: Vec<MissingStat>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一个模板目录的局部结果（保持插入顺序）
    pub fn merge(mut self, other: RunResult) -> Self {
        self.records.extend(other.records);
        self.missing.extend(other.missing);
        self
    }

    /// 既无抽取记录也无缺失统计
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_preserves_order() {
        let key = TemplateKey::new("К", "Т");
        let first = RunResult {
            records: vec![ExtractedRecord::new(&key, "A", "1")],
            missing: vec![],
        };
        let second = RunResult {
            records: vec![ExtractedRecord::new(&key, "B", "2")],
            missing: vec![MissingStat::absent(&key, "C")],
        };

        let merged = RunResult::new().merge(first).merge(second);
        assert_eq!(merged.records[0].attribute, "A");
        assert_eq!(merged.records[1].attribute, "B");
        assert_eq!(merged.missing.len(), 1);
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_extracted_record_column_names() {
        let key = TemplateKey::new("Оборудование", "Насос");
        let record = ExtractedRecord::new(&key, "Марка", "АБВ");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Атрибут"], "Марка");
        assert_eq!(json["Шаблон"], "Насос");
        assert_eq!(json["Класс"], "Оборудование");
        assert_eq!(json["Значение"], "АБВ");
    }
}
