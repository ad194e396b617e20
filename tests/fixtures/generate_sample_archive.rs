// ==========================================
// 示例归档生成器
// ==========================================
// 用途: 生成用于手动验证的输入归档
// 输出: tests/fixtures/datasets/sample_ontology.zip（或命令行参数指定路径）
// 结构: Онтология ГРМ/<类别>/<模板>/{*_Шаблон.xlsx, *_ПредЗап.xlsx}
// ==========================================

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const ROOT: &str = "Онтология ГРМ";

// 模板定义: (类别, 模板, 属性, 记录表头, 记录行)
struct TemplateSample {
    class_name: &'static str,
    template: &'static str,
    attributes: &'static [&'static str],
    columns: &'static [&'static str],
    rows: &'static [&'static [&'static str]],
}

const SAMPLES: &[TemplateSample] = &[
    TemplateSample {
        class_name: "Оборудование",
        template: "Насос",
        attributes: &["Марка", "Модель", "Производитель", "Мощность, кВт"],
        columns: &["Марка", "Модель", "Мощность, кВт", "Комментарий"],
        rows: &[
            &["Grundfos", "CR 10", "5.5", ""],
            &["Grundfos", "CR 15", "7.5", "резерв"],
            &["Wilo", "nan", "5.5", ""],
        ],
    },
    TemplateSample {
        class_name: "Оборудование",
        template: "Двигатель",
        attributes: &["Марка", "Напряжение, В"],
        columns: &["Марка", "Напряжение, В"],
        rows: &[&["Siemens", "380"], &["ABB", "380"], &["Siemens", "6000"]],
    },
    TemplateSample {
        class_name: "Арматура",
        template: "Задвижка",
        attributes: &["Марка", "Диаметр/DN", "Давление PN"],
        columns: &["Марка", "Диаметр/DN"],
        rows: &[&["ЗКС", "50"], &["ЗКС", "80"], &["None", "100"]],
    },
];

fn template_workbook(attributes: &[&str]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Шаблон класса")?;
    sheet.write_string(1, 0, "Объект данных")?;
    // 系统属性，抽取时被排除
    sheet.write_string(1, 1, "Наименование")?;
    let mut col: u16 = 2;
    for attribute in attributes {
        sheet.write_string(1, col, *attribute)?;
        col += 1;
    }
    sheet.write_string(1, col, "Базовая единица измерения")?;
    sheet.write_string(1, col + 1, "шт")?;

    Ok(workbook.save_to_buffer()?)
}

fn records_workbook(columns: &[&str], rows: &[&[&str]]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string((idx + 1) as u32, col as u16, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/datasets/sample_ontology.zip"));
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut zip = ZipWriter::new(File::create(&output)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for sample in SAMPLES {
        let dir = format!("{}/{}/{}", ROOT, sample.class_name, sample.template);
        zip.add_directory(format!("{}/", dir), options)?;

        zip.start_file(format!("{}/{}_Шаблон.xlsx", dir, sample.template), options)?;
        zip.write_all(&template_workbook(sample.attributes)?)?;

        zip.start_file(format!("{}/{}_ПредЗап.xlsx", dir, sample.template), options)?;
        zip.write_all(&records_workbook(sample.columns, sample.rows)?)?;
    }

    // 缺少记录文件的模板目录（应被跳过）
    let incomplete = format!("{}/Арматура/Клапан", ROOT);
    zip.start_file(format!("{}/Клапан_Шаблон.xlsx", incomplete), options)?;
    zip.write_all(&template_workbook(&["Марка"])?)?;

    zip.finish()?;
    println!("✓ 示例归档已生成: {}", output.display());
    Ok(())
}
