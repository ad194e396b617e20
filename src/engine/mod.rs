// ==========================================
// Онтология ГРМ - 引擎层
// ==========================================
// 职责: 遍历目录树，累积属性值与缺失统计，聚合为输出数据
// 红线: 单个模板目录失败只影响该目录
// ==========================================

pub mod aggregator;
pub mod progress;
pub mod tree_walker;

// 重导出核心引擎
pub use aggregator::{aggregate, Aggregate, CollapsedValues, RunStats};
pub use progress::{NoOpProgressSink, ProgressSink, RecordingProgress, ScaledProgress};
pub use tree_walker::{TemplateDir, TemplateFiles, TreeWalker, WalkOutcome};
