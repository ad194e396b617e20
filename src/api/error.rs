// ==========================================
// Онтология ГРМ - API 层错误类型
// ==========================================
// 职责: 定义整次运行的错误分类，转换下层错误为用户可读消息
// 红线: 致命错误返回前必须已清理临时工作区
// ==========================================

use crate::exporter::ExportError;
use crate::i18n::{t, t_with_args};
use crate::importer::ImportError;
use thiserror::Error;
use tracing::{error, warn};

/// 异常详情摘录的最大字符数
pub const DETAIL_LIMIT: usize = 500;

/// 运行级错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("未提供输入归档")]
    MissingInput,

    #[error("归档无效: {0}")]
    ArchiveInvalid(String),

    #[error("归档为空")]
    ArchiveEmpty,

    #[error("目录结构无效: {0}")]
    Structure(String),

    // ==========================================
    // 结果错误
    // ==========================================
    #[error("未找到可处理的数据")]
    EmptyResult,

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("处理失败: {message}")]
    Unexpected { message: String, detail: String },
}

impl PipelineError {
    /// 构造 Unexpected，详情截断到 DETAIL_LIMIT 个字符
    pub fn unexpected(message: impl Into<String>, detail: impl AsRef<str>) -> Self {
        PipelineError::Unexpected {
            message: message.into(),
            detail: truncate_detail(detail.as_ref()),
        }
    }

    /// 用户可见的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingInput => t("error.missing_input"),
            PipelineError::ArchiveInvalid(_) => t("error.archive_invalid"),
            PipelineError::ArchiveEmpty => t("error.archive_empty"),
            PipelineError::Structure(detail) => t_with_args("error.structure", &[("detail", detail)]),
            PipelineError::EmptyResult => t("error.empty_result"),
            PipelineError::Unexpected { detail, .. } => {
                t_with_args("error.unexpected", &[("detail", detail)])
            }
        }
    }

    /// 是否属于"无数据"告警（非崩溃）
    pub fn is_warning(&self) -> bool {
        matches!(self, PipelineError::EmptyResult)
    }

    /// 按级别记录完整错误（无数据为 warn，其余为 error）
    pub fn log(&self) {
        if self.is_warning() {
            warn!(error = %self, "处理结束: 无数据");
        } else {
            error!(error = %self, detail = ?self, "处理失败");
        }
    }
}

/// 按字符截断
pub fn truncate_detail(detail: &str) -> String {
    match detail.char_indices().nth(DETAIL_LIMIT) {
        Some((idx, _)) => format!("{}…", &detail[..idx]),
        None => detail.to_string(),
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for PipelineError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::ArchiveInvalid(msg) => PipelineError::ArchiveInvalid(msg),
            ImportError::ArchiveEntryError { entry, message } => {
                PipelineError::ArchiveInvalid(format!("{}: {}", entry, message))
            }
            ImportError::StructureError(msg) => PipelineError::Structure(msg),
            ImportError::FileNotFound(_) => PipelineError::MissingInput,
            other => PipelineError::unexpected(other.to_string(), format!("{:?}", other)),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::unexpected(err.to_string(), format!("{:?}", err))
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for PipelineError {
    fn from(err: ExportError) -> Self {
        PipelineError::unexpected(err.to_string(), format!("{:?}", err))
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
