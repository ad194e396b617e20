// ==========================================
// Онтология ГРМ - 领域模型层
// ==========================================
// 职责: 定义属性清单、匹配结果、抽取记录等值类型
// 红线: 不含文件读写逻辑,不含遍历逻辑
// ==========================================

pub mod attribute;
pub mod record;
pub mod types;

// 重导出核心类型
pub use attribute::{AttributeName, MatchResult, RecordColumns, TemplateReport, TemplateSchema};
pub use record::{ExtractedRecord, MissingStat, RunResult};
pub use types::{AttributeStatus, TemplateKey};
