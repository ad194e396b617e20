// ==========================================
// Онтология ГРМ - README 摘要文本
// ==========================================
// 职责: 生成结果目录中的纯文本说明（固定俄文内容）
// ==========================================

use crate::engine::RunStats;
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 千位分隔（1234567 → "1,234,567"）
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 生成 README 文本
///
/// # 参数
/// - `stats`: 运行统计
/// - `files`: 已生成文件（相对结果目录的名称）
/// - `generated_at`: 处理时间
pub fn render_summary(stats: &RunStats, files: &[String], generated_at: DateTime<Local>) -> String {
    let mut lines = vec![
        "РЕЗУЛЬТАТЫ ОБРАБОТКИ ОНТОЛОГИИ ГРМ".to_string(),
        "=".repeat(50),
        String::new(),
        format!("Дата обработки: {}", generated_at.format(TIMESTAMP_FORMAT)),
        String::new(),
    ];

    if stats.total_records > 0 {
        lines.push(format!("Обработано записей: {}", format_count(stats.total_records)));
        lines.push(format!("Уникальных атрибутов: {}", format_count(stats.distinct_attributes)));
    }

    if stats.total_missing > 0 {
        lines.push(format!(
            "Найдено отсутствующих атрибутов: {}",
            format_count(stats.total_missing)
        ));
        lines.push(format!(
            "Уникальных отсутствующих атрибутов: {}",
            format_count(stats.distinct_missing_attributes)
        ));
    }

    lines.push(String::new());
    lines.push("Созданные файлы:".to_string());
    lines.extend(files.iter().map(|name| format!("• {}", name)));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
