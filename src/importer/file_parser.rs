// ==========================================
// Онтология ГРМ - 电子表格解析器实现
// ==========================================
// 支持: Excel (.xlsx)
// 说明: 只读取首个工作表的单元格值（不含公式）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{CellGrid, GridReader};
use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use std::path::Path;

// ==========================================
// Excel GridReader 实现
// ==========================================
pub struct ExcelGridReader;

impl GridReader for ExcelGridReader {
    fn read_grid(&self, file_path: &Path, max_rows: Option<usize>) -> ImportResult<CellGrid> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::EmptyWorkbook(path.display().to_string()))?
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        Ok(range_to_grid(&range, max_rows))
    }
}

/// Range 转网格
///
/// calamine 的 Range 从首个非空单元格开始，这里补齐前导空行/空列，
/// 使网格下标与工作表绝对行列一致
pub fn range_to_grid(range: &Range<Data>, max_rows: Option<usize>) -> CellGrid {
    let (start_row, start_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };

    let limit = max_rows.unwrap_or(usize::MAX);
    let mut grid: CellGrid = Vec::new();

    for _ in 0..start_row.min(limit) {
        grid.push(Vec::new());
    }

    for row in range.rows() {
        if grid.len() >= limit {
            break;
        }
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }

    grid
}

/// 单元格值转字符串
///
/// - 空值 / 错误值 → ""
/// - 整数值浮点数不带小数部分（1.0 → "1"）
/// - 日期时间 → "YYYY-MM-DD HH:MM:SS"
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(dt) => cell
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn test_cell_to_string_variants() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("АБВ".to_string())), "АБВ");
        assert_eq!(cell_to_string(&Data::Float(12.0)), "12");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "True");
    }

    #[test]
    fn test_excel_reader_file_not_found() {
        let reader = ExcelGridReader;
        let result = reader.read_grid(Path::new("non_existent.xlsx"), None);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_excel_reader_rejects_non_excel_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake шаблон.xlsx");
        std::fs::write(&path, "not an excel file").unwrap();

        let reader = ExcelGridReader;
        assert!(reader.read_grid(&path, None).is_err());
    }

    #[test]
    fn test_excel_reader_absolute_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.xlsx");

        // 第 1 行为空, 第 2 行从 B 列开始
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 1, "Объект данных").unwrap();
        sheet.write_string(1, 2, "Марка").unwrap();
        sheet.write_number(2, 1, 42.0).unwrap();
        workbook.save(&path).unwrap();

        let reader = ExcelGridReader;
        let grid = reader.read_grid(&path, None).unwrap();

        assert_eq!(grid.len(), 3);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1], vec!["", "Объект данных", "Марка"]);
        assert_eq!(grid[2][1], "42");
    }

    #[test]
    fn test_excel_reader_max_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("many_rows.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for row in 0..10u32 {
            sheet.write_string(row, 0, format!("r{}", row)).unwrap();
        }
        workbook.save(&path).unwrap();

        let reader = ExcelGridReader;
        let grid = reader.read_grid(&path, Some(3)).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2][0], "r2");
    }
}
