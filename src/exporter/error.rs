// ==========================================
// Онтология ГРМ - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel 写入失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("归档写入失败: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("目录遍历失败: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
