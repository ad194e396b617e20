// ==========================================
// Онтология ГРМ - 结果归档打包
// ==========================================
// 职责: 将结果目录打包为 ZIP（Deflate）
// 条目名: 相对 base 目录的路径，`/` 分隔，按名称排序
// ==========================================

use crate::exporter::error::ExportResult;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 打包 `source_dir` 下全部文件
///
/// # 返回
/// 写入归档的条目数
#[instrument(skip_all, fields(source = %source_dir.display(), archive = %archive_path.display()))]
pub fn pack_directory(base: &Path, source_dir: &Path, archive_path: &Path) -> ExportResult<usize> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0;
    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(base, entry.path());
        zip.start_file(name.as_str(), options)?;
        let mut input = File::open(entry.path())?;
        io::copy(&mut input, &mut zip)?;
        entries += 1;
        debug!(entry = %name, "已加入归档");
    }

    zip.finish()?;
    info!(entries, "结果归档完成");
    Ok(entries)
}

/// 相对 base 的条目名；不在 base 下时退回文件名
fn entry_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
