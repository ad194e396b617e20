// ==========================================
// Онтология ГРМ - API 层
// ==========================================
// 职责: 提供单次运行入口，供 CLI / 界面调用
// ==========================================

pub mod error;
pub mod ontology_api;
pub mod report;

// 重导出核心类型
pub use error::{truncate_detail, PipelineError, PipelineResult, DETAIL_LIMIT};
pub use ontology_api::{DownloadableFile, OntologyApi, ProcessOutcome, ProcessResponse, WORKSPACE_PREFIX};
pub use report::build_report;
