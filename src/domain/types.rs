// ==========================================
// Онтология ГРМ - 领域类型定义
// ==========================================
// 职责: 模板定位键 / 属性状态 等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 模板定位键 (Class / Template)
// ==========================================
// 对应归档内两级目录: <root>/<class>/<template>
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateKey {
    pub class_name: String,
    pub template_name: String,
}

impl TemplateKey {
    pub fn new(class_name: impl Into<String>, template_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            template_name: template_name.into(),
        }
    }

    /// 进度提示用标签: "Class/Template"
    pub fn label(&self) -> String {
        format!("{}/{}", self.class_name, self.template_name)
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class_name, self.template_name)
    }
}

// ==========================================
// 属性状态 (Attribute Status)
// ==========================================
// 当前仅有一种: 模板声明但记录文件中不存在
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeStatus {
    #[serde(rename = "Отсутствует в файле записей")]
    AbsentFromRecords,
}

impl AttributeStatus {
    /// 输出文件中使用的固定文本
    pub fn as_label(&self) -> &'static str {
        match self {
            AttributeStatus::AbsentFromRecords => "Отсутствует в файле записей",
        }
    }
}

impl fmt::Display for AttributeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_key_label() {
        let key = TemplateKey::new("Оборудование", "Насос");
        assert_eq!(key.label(), "Оборудование/Насос");
        assert_eq!(key.to_string(), "Оборудование/Насос");
    }

    #[test]
    fn test_attribute_status_serialization() {
        let json = serde_json::to_string(&AttributeStatus::AbsentFromRecords).unwrap();
        assert_eq!(json, "\"Отсутствует в файле записей\"");
        assert_eq!(
            AttributeStatus::AbsentFromRecords.to_string(),
            "Отсутствует в файле записей"
        );
    }
}
