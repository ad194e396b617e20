// ==========================================
// Онтология ГРМ - 核心库
// ==========================================
// 输入: Онтология ГРМ/<类别>/<模板>/ 目录树的 ZIP 归档
// 输出: 属性参考文件、汇总数据、缺失统计与 README 组成的结果归档
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ru");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 数据模型
pub mod domain;

// 配置层 - 契约字符串与标记
pub mod config;

// 导入层 - 电子表格读取与属性抽取
pub mod importer;

// 引擎层 - 目录遍历与聚合
pub mod engine;

// 导出层 - 结果文件与归档
pub mod exporter;

// API 层 - 运行入口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AttributeName, AttributeStatus, ExtractedRecord, MatchResult, MissingStat, RecordColumns,
    RunResult, TemplateKey, TemplateReport, TemplateSchema,
};

// 配置
pub use config::{ConfigManager, PipelineConfig};

// 引擎
pub use engine::{aggregate, NoOpProgressSink, ProgressSink, RunStats, TreeWalker};

// API
pub use api::{OntologyApi, PipelineError, ProcessOutcome, ProcessResponse};

// ==========================================
// 版本信息
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Онтология ГРМ";
