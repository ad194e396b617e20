// ==========================================
// Онтология ГРМ - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 文件无工作表: {0}")]
    EmptyWorkbook(String),

    // ===== 归档相关错误 =====
    #[error("归档无效或已损坏: {0}")]
    ArchiveInvalid(String),

    #[error("归档条目非法 ({entry}): {message}")]
    ArchiveEntryError { entry: String, message: String },

    // ===== 目录结构错误 =====
    #[error("归档中未找到有效的目录结构: {0}")]
    StructureError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<zip::result::ZipError>
impl From<zip::result::ZipError> for ImportError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => ImportError::FileReadError(io.to_string()),
            other => ImportError::ArchiveInvalid(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
