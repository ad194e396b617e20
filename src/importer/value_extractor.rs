// ==========================================
// Онтология ГРМ - 属性值抽取器
// ==========================================
// 职责: 按已匹配属性投影数据行，丢弃空值/占位值
// 说明: 不产生有效值的数据行整体丢弃
// ==========================================

use crate::domain::AttributeName;
use crate::importer::column_reader::{ColumnReader, RecordsTable};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::importer_trait::GridReader;
use std::path::Path;
use tracing::warn;

/// 单个数据行的 (属性, 值) 列表，按已匹配属性顺序排列
pub type RowValues = Vec<(AttributeName, String)>;

pub struct ValueExtractor<'a> {
    reader: &'a dyn GridReader,
    cleaner: &'a DataCleaner,
}

impl<'a> ValueExtractor<'a> {
    pub fn new(reader: &'a dyn GridReader, cleaner: &'a DataCleaner) -> Self {
        Self { reader, cleaner }
    }

    /// 从记录文件抽取；读取失败返回空列表
    pub fn extract(&self, records_path: &Path, matched: &[AttributeName]) -> Vec<RowValues> {
        match ColumnReader::new(self.reader).read_table(records_path) {
            Ok(table) => self.extract_from_table(&table, matched),
            Err(e) => {
                warn!(path = %records_path.display(), error = %e, "记录文件数据读取失败");
                Vec::new()
            }
        }
    }

    /// 从已读取的记录表抽取
    pub fn extract_from_table(&self, table: &RecordsTable, matched: &[AttributeName]) -> Vec<RowValues> {
        // 预先解析列下标；不在表头中的属性忽略
        let projection: Vec<(&AttributeName, usize)> = matched
            .iter()
            .filter_map(|attr| table.columns.position(attr).map(|idx| (attr, idx)))
            .collect();

        if projection.is_empty() {
            return Vec::new();
        }

        table
            .rows
            .iter()
            .filter_map(|row| {
                let values: RowValues = projection
                    .iter()
                    .filter_map(|(attr, idx)| {
                        let raw = row.get(*idx).map(String::as_str).unwrap_or("");
                        self.cleaner
                            .clean_value(raw)
                            .map(|value| ((*attr).clone(), value))
                    })
                    .collect();

                if values.is_empty() {
                    None
                } else {
                    Some(values)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::importer_trait::CellGrid;

    fn table(rows: &[&[&str]]) -> RecordsTable {
        let grid: CellGrid = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        RecordsTable::from_grid(grid)
    }

    struct NoReader;

    impl GridReader for NoReader {
        fn read_grid(&self, path: &Path, _: Option<usize>) -> crate::importer::ImportResult<CellGrid> {
            Err(crate::importer::ImportError::FileNotFound(path.display().to_string()))
        }
    }

    fn attrs(names: &[&str]) -> Vec<AttributeName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_extract_projects_matched_columns() {
        let cleaner = DataCleaner::default();
        let extractor = ValueExtractor::new(&NoReader, &cleaner);
        let table = table(&[&["Марка", "Другое"], &["АБВ", "x"]]);

        let rows = extractor.extract_from_table(&table, &attrs(&["Марка"]));
        assert_eq!(rows, vec![vec![("Марка".to_string(), "АБВ".to_string())]]);
    }

    #[test]
    fn test_extract_skips_sentinels_and_empty_rows() {
        let cleaner = DataCleaner::default();
        let extractor = ValueExtractor::new(&NoReader, &cleaner);
        let table = table(&[
            &["Марка", "Модель"],
            &["nan", "NULL"],
            &["  ", ""],
            &[" АБВ ", "None"],
            &["", "М-1"],
        ]);

        let rows = extractor.extract_from_table(&table, &attrs(&["Марка", "Модель"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![("Марка".to_string(), "АБВ".to_string())]);
        assert_eq!(rows[1], vec![("Модель".to_string(), "М-1".to_string())]);
    }

    #[test]
    fn test_extract_short_rows() {
        let cleaner = DataCleaner::default();
        let extractor = ValueExtractor::new(&NoReader, &cleaner);
        let table = table(&[&["A", "B"], &["1"]]);

        let rows = extractor.extract_from_table(&table, &attrs(&["A", "B"]));
        assert_eq!(rows, vec![vec![("A".to_string(), "1".to_string())]]);
    }

    #[test]
    fn test_extract_is_repeatable() {
        let cleaner = DataCleaner::default();
        let extractor = ValueExtractor::new(&NoReader, &cleaner);
        let table = table(&[&["A"], &["x"], &["y"], &["x"]]);
        let matched = attrs(&["A"]);

        assert_eq!(
            extractor.extract_from_table(&table, &matched),
            extractor.extract_from_table(&table, &matched)
        );
    }

    #[test]
    fn test_extract_read_failure_yields_empty() {
        let cleaner = DataCleaner::default();
        let extractor = ValueExtractor::new(&NoReader, &cleaner);
        assert!(extractor.extract(Path::new("missing.xlsx"), &attrs(&["A"])).is_empty());
    }
}
