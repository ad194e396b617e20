// ==========================================
// Онтология ГРМ - 单表 Excel 写入
// ==========================================
// 工具: rust_xlsxwriter
// 格式: 首行表头（加粗），其后每行一条数据，全部按文本写入
// ==========================================

use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// 待写入的表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

// ==========================================
// SheetWriter Trait
// ==========================================
pub trait SheetWriter: Send + Sync {
    /// 将表格写成单工作表文件
    fn write_sheet(&self, path: &Path, sheet_name: &str, table: &SheetTable) -> ExportResult<()>;
}

/// xlsx 写入实现
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSheetWriter;

impl SheetWriter for XlsxSheetWriter {
    fn write_sheet(&self, path: &Path, sheet_name: &str, table: &SheetTable) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                worksheet.write_string(row_num, col as u16, value)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}
