// ==========================================
// Онтология ГРМ - 导出层
// ==========================================
// 职责: 写出参考文件/汇总文件/缺失统计/README，并打包结果归档
// 支持: Excel (.xlsx), ZIP 归档
// ==========================================

pub mod archive_packer;
pub mod error;
pub mod output_writer;
pub mod sheet_writer;
pub mod summary;

// 重导出核心类型
pub use archive_packer::pack_directory;
pub use error::{ExportError, ExportResult};
pub use output_writer::{sanitize_file_name, OutputFile, OutputKind, OutputWriter};
pub use sheet_writer::{SheetTable, SheetWriter, XlsxSheetWriter};
pub use summary::{format_count, render_summary, TIMESTAMP_FORMAT};
