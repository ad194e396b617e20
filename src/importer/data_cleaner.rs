// ==========================================
// Онтология ГРМ - 单元格清洗器
// ==========================================
// 职责: TRIM / 占位值（nan/none/null）→ None
// ==========================================

use crate::config::ValueRules;

pub struct DataCleaner {
    // 已小写化的占位值
    sentinels: Vec<String>,
}

impl DataCleaner {
    pub fn new(rules: &ValueRules) -> Self {
        Self {
            sentinels: rules
                .sentinel_values
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }

    /// 是否为占位值（trim + 小写后比较；空串恒为占位值）
    pub fn is_sentinel(&self, value: &str) -> bool {
        let normalized = value.trim().to_lowercase();
        normalized.is_empty() || self.sentinels.iter().any(|s| *s == normalized)
    }

    /// 清洗单元格值
    ///
    /// # 返回
    /// - Some(String): trim 后的有效值
    /// - None: 空值或占位值
    pub fn clean_value(&self, value: &str) -> Option<String> {
        if self.is_sentinel(value) {
            None
        } else {
            Some(value.trim().to_string())
        }
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(&ValueRules::default())
    }
}
