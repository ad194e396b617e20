// ==========================================
// Онтология ГРМ - 结果聚合
// ==========================================
// 职责: 按属性折叠去重的属性值，计算运行统计
// 说明: 属性按首次出现顺序排列，值集合有序
//       模板/类别的去重计数按目录名
// ==========================================

use crate::domain::{AttributeName, RunResult};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

// ==========================================
// 按属性折叠的值集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedValues {
    order: Vec<AttributeName>,
    values: HashMap<AttributeName, BTreeSet<String>>,
}

impl CollapsedValues {
    pub fn from_result(result: &RunResult) -> Self {
        let mut collapsed = Self::default();
        for record in &result.records {
            collapsed.insert(&record.attribute, &record.value);
        }
        collapsed
    }

    pub fn insert(&mut self, attribute: &str, value: &str) {
        match self.values.get_mut(attribute) {
            Some(set) => {
                set.insert(value.to_string());
            }
            None => {
                self.order.push(attribute.to_string());
                self.values
                    .insert(attribute.to_string(), BTreeSet::from([value.to_string()]));
            }
        }
    }

    /// 按首次出现顺序遍历 (属性, 有序值集合)
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &BTreeSet<String>)> {
        self.order
            .iter()
            .filter_map(|attr| self.values.get(attr).map(|set| (attr, set)))
    }

    pub fn get(&self, attribute: &str) -> Option<&BTreeSet<String>> {
        self.values.get(attribute)
    }

    pub fn attribute_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ==========================================
// 运行统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_records: usize,
    pub distinct_attributes: usize,
    pub distinct_values: usize,
    pub distinct_templates: usize,
    pub distinct_classes: usize,
    pub total_missing: usize,
    pub distinct_missing_attributes: usize,
    pub templates_with_missing: usize,
}

impl RunStats {
    pub fn compute(result: &RunResult, collapsed: &CollapsedValues) -> Self {
        let values: HashSet<&str> = result.records.iter().map(|r| r.value.as_str()).collect();
        let templates: HashSet<&str> = result.records.iter().map(|r| r.template.as_str()).collect();
        let classes: HashSet<&str> = result.records.iter().map(|r| r.class_name.as_str()).collect();
        let missing_attrs: HashSet<&str> = result.missing.iter().map(|m| m.attribute.as_str()).collect();
        let missing_templates: HashSet<&str> = result.missing.iter().map(|m| m.template.as_str()).collect();

        Self {
            total_records: result.records.len(),
            distinct_attributes: collapsed.attribute_count(),
            distinct_values: values.len(),
            distinct_templates: templates.len(),
            distinct_classes: classes.len(),
            total_missing: result.missing.len(),
            distinct_missing_attributes: missing_attrs.len(),
            templates_with_missing: missing_templates.len(),
        }
    }
}

/// 聚合结果
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub collapsed: CollapsedValues,
    pub stats: RunStats,
}

pub fn aggregate(result: &RunResult) -> Aggregate {
    let collapsed = CollapsedValues::from_result(result);
    let stats = RunStats::compute(result, &collapsed);
    Aggregate { collapsed, stats }
}
