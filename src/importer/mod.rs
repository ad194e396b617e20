// ==========================================
// Онтология ГРМ - 导入层
// ==========================================
// 职责: 读取模板/记录电子表格，抽取并匹配属性
// 支持: Excel (.xlsx), ZIP 归档
// ==========================================

// 模块声明
pub mod archive_unpacker;
pub mod attribute_matcher;
pub mod column_reader;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod schema_extractor;
pub mod value_extractor;

// 重导出核心类型
pub use archive_unpacker::{unpack_archive, UnpackReport};
pub use attribute_matcher::match_attributes;
pub use column_reader::{ColumnReader, RecordsTable};
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::ExcelGridReader;
pub use schema_extractor::SchemaExtractor;
pub use value_extractor::{RowValues, ValueExtractor};

// 重导出 Trait 接口
pub use importer_trait::{CellGrid, GridReader};
