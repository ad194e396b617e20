// ==========================================
// Онтология ГРМ - 导入接口 Trait
// ==========================================
// 职责: 定义电子表格读取能力接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;

/// 二维单元格网格（仅值，空单元格为 ""）
pub type CellGrid = Vec<Vec<String>>;

// ==========================================
// GridReader Trait
// ==========================================
// 用途: 读取电子表格首个工作表为二维网格
// 实现者: ExcelGridReader
pub trait GridReader: Send + Sync {
    /// 读取工作表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - max_rows: 仅返回前 N 行（None 表示全部）
    ///
    /// # 返回
    /// - Ok(CellGrid): 以工作表第 1 行第 1 列为原点的网格
    /// - Err: 文件读取错误、格式错误
    fn read_grid(&self, file_path: &Path, max_rows: Option<usize>) -> ImportResult<CellGrid>;
}

impl<T: GridReader + ?Sized> GridReader for Box<T> {
    fn read_grid(&self, file_path: &Path, max_rows: Option<usize>) -> ImportResult<CellGrid> {
        (**self).read_grid(file_path, max_rows)
    }
}
