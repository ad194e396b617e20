// ==========================================
// Онтология ГРМ - 处理流程配置
// ==========================================
// 职责: 集中定义所有约定字符串（标记、关键字、输出文件名）
// 说明: 所有字段带默认值，JSON 配置文件可只覆写部分字段
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// SchemaRules - 模板属性行识别规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRules {
    /// 属性行标记（同时作为规范化后的属性名）
    pub schema_marker: String,
    /// 截止标记（含该标记的单元格及其后均不收集）
    pub stop_marker: String,
    /// 系统属性排除清单（双向子串匹配，忽略大小写）
    pub excluded_labels: Vec<String>,
    /// 扫描的最大行数
    pub scan_rows: usize,
    /// 是否把属性行标记本身作为属性（false: 只收集标记单元格之后的单元格）
    pub include_marker_attribute: bool,
}

impl Default for SchemaRules {
    fn default() -> Self {
        Self {
            schema_marker: "Объект данных".to_string(),
            stop_marker: "Базовая единица измерения".to_string(),
            excluded_labels: vec![
                "Код из системы источника".to_string(),
                "Наименование".to_string(),
                "Наименование из системы источника".to_string(),
                "Полное наименование".to_string(),
                "Статус".to_string(),
            ],
            scan_rows: 3,
            include_marker_attribute: false,
        }
    }
}

// ==========================================
// LayoutRules - 归档目录结构规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRules {
    /// 优先识别的根目录名
    pub root_dir_name: String,
    /// 模板文件关键字（小写文件名子串匹配）
    pub template_file_keyword: String,
    /// 记录文件关键字（小写文件名子串匹配）
    pub records_file_keyword: String,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            root_dir_name: "Онтология ГРМ".to_string(),
            template_file_keyword: "шаблон.xlsx".to_string(),
            records_file_keyword: "предзап.xlsx".to_string(),
        }
    }
}

// ==========================================
// ValueRules - 单元格值过滤规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueRules {
    /// trim + 小写后等于其中任一值的单元格视为空
    pub sentinel_values: Vec<String>,
}

impl Default for ValueRules {
    fn default() -> Self {
        Self {
            sentinel_values: ["", "nan", "none", "null"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ==========================================
// OutputNames - 输出产物命名
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub results_dir: String,
    pub reference_dir: String,
    pub consolidated_file: String,
    pub mismatch_file: String,
    pub summary_file: String,
    pub archive_file: String,
    pub sheet_name: String,

    // 输出表格列名
    pub attribute_column: String,
    pub template_column: String,
    pub class_column: String,
    pub value_column: String,
    pub status_column: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            results_dir: "results".to_string(),
            reference_dir: "Вспомогательные справочники".to_string(),
            consolidated_file: "Сводные_данные.xlsx".to_string(),
            mismatch_file: "Статистика_отсутствующих.xlsx".to_string(),
            summary_file: "README.txt".to_string(),
            archive_file: "результаты_обработки.zip".to_string(),
            sheet_name: "Sheet1".to_string(),
            attribute_column: "Атрибут".to_string(),
            template_column: "Шаблон".to_string(),
            class_column: "Класс".to_string(),
            value_column: "Значение".to_string(),
            status_column: "Статус".to_string(),
        }
    }
}

// ==========================================
// PipelineConfig - 完整配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub schema: SchemaRules,
    pub layout: LayoutRules,
    pub values: ValueRules,
    pub output: OutputNames,
    pub locale: Locale,
}

/// 界面语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale("ru".to_string())
    }
}

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contract_strings() {
        let config = PipelineConfig::default();
        assert_eq!(config.schema.schema_marker, "Объект данных");
        assert_eq!(config.schema.stop_marker, "Базовая единица измерения");
        assert_eq!(config.schema.excluded_labels.len(), 5);
        assert_eq!(config.schema.scan_rows, 3);
        assert!(!config.schema.include_marker_attribute);
        assert_eq!(config.layout.root_dir_name, "Онтология ГРМ");
        assert_eq!(config.values.sentinel_values, vec!["", "nan", "none", "null"]);
        assert_eq!(config.locale.as_str(), "ru");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "layout": { "root_dir_name": "Онтология" }, "locale": "en" }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.layout.root_dir_name, "Онтология");
        assert_eq!(config.layout.template_file_keyword, "шаблон.xlsx");
        assert_eq!(config.schema, SchemaRules::default());
        assert_eq!(config.locale.as_str(), "en");
    }
}
