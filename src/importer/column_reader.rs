// ==========================================
// Онтология ГРМ - 记录文件表头读取器
// ==========================================
// 职责: 读取记录文件表头（首个非空行），列名 trim 后按原列序返回
// ==========================================

use crate::domain::RecordColumns;
use crate::importer::error::ImportResult;
use crate::importer::importer_trait::{CellGrid, GridReader};
use std::path::Path;
use tracing::warn;

// ==========================================
// RecordsTable - 表头 + 数据行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordsTable {
    pub columns: RecordColumns,
    pub rows: CellGrid,
}

impl RecordsTable {
    /// 拆分网格: 首个非空行为表头，其后为数据行
    pub fn from_grid(grid: CellGrid) -> Self {
        let mut iter = grid
            .into_iter()
            .skip_while(|row| row.iter().all(|c| c.trim().is_empty()));

        match iter.next() {
            Some(header) => Self {
                columns: RecordColumns::new(header),
                rows: iter.collect(),
            },
            None => Self::default(),
        }
    }
}

// ==========================================
// ColumnReader
// ==========================================
pub struct ColumnReader<'a> {
    reader: &'a dyn GridReader,
}

impl<'a> ColumnReader<'a> {
    pub fn new(reader: &'a dyn GridReader) -> Self {
        Self { reader }
    }

    /// 读取完整记录表
    pub fn read_table(&self, records_path: &Path) -> ImportResult<RecordsTable> {
        let grid = self.reader.read_grid(records_path, None)?;
        Ok(RecordsTable::from_grid(grid))
    }

    /// 仅返回表头列名；读取失败返回空列表
    pub fn read_columns(&self, records_path: &Path) -> RecordColumns {
        match self.read_table(records_path) {
            Ok(table) => table.columns,
            Err(e) => {
                warn!(path = %records_path.display(), error = %e, "记录文件表头读取失败");
                RecordColumns::default()
            }
        }
    }
}
