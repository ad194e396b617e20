// ==========================================
// Онтология ГРМ - 配置层
// ==========================================
// 职责: 约定字符串与处理规则的集中配置
// 来源: 默认值 / JSON 文件 / 环境变量
// ==========================================

pub mod config_manager;
pub mod pipeline_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use pipeline_config::{
    LayoutRules, Locale, OutputNames, PipelineConfig, SchemaRules, ValueRules,
};
