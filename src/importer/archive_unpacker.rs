// ==========================================
// Онтология ГРМ - 输入归档解包
// ==========================================
// 职责: 将 ZIP 归档解包到工作区目录
// 说明: 非 UTF-8 文件名按 CP866 解码（Windows 俄文归档工具）
//       越出解包根目录的条目视为非法归档
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use zip::ZipArchive;

/// 解包统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackReport {
    pub files: usize,
    pub dirs: usize,
}

impl UnpackReport {
    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.dirs == 0
    }
}

/// 解包归档
///
/// # 返回
/// - Ok(UnpackReport): 解包的文件/目录数
/// - Err(ArchiveInvalid): 非 ZIP 或已损坏
/// - Err(ArchiveEntryError): 条目路径非法
#[instrument(skip_all, fields(archive = %archive_path.display()))]
pub fn unpack_archive(archive_path: &Path, dest: &Path) -> ImportResult<UnpackReport> {
    if !archive_path.exists() {
        return Err(ImportError::FileNotFound(archive_path.display().to_string()));
    }

    let file = File::open(archive_path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ImportError::ArchiveInvalid(e.to_string()))?;

    fs::create_dir_all(dest)?;
    let mut report = UnpackReport::default();

    for idx in 0..archive.len() {
        let mut entry = archive
            .by_index(idx)
            .map_err(|e| ImportError::ArchiveInvalid(e.to_string()))?;

        let name = decode_entry_name(entry.name_raw());
        let relative = sanitize_entry_path(&name)?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(&relative);

        if name.ends_with('/') || name.ends_with('\\') {
            fs::create_dir_all(&target)?;
            report.dirs += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)
            .map_err(|e| ImportError::ArchiveInvalid(format!("{}: {}", name, e)))?;
        report.files += 1;
        debug!(entry = %name, "已解包");
    }

    info!(files = report.files, dirs = report.dirs, "归档解包完成");
    Ok(report)
}

/// 解码条目名: 优先 UTF-8，否则按 CP866
pub fn decode_entry_name(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::IBM866.decode(raw);
            decoded.into_owned()
        }
    }
}

/// 规范化条目路径（统一分隔符，拒绝 `..` 与首段盘符）
///
/// 目录名中的冒号合法（如 `Насосы: центробежные`），仅 `C:` 形式的首段视为盘符
pub fn sanitize_entry_path(name: &str) -> ImportResult<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut path = PathBuf::new();

    for part in normalized.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." || (path.as_os_str().is_empty() && is_drive_prefix(part)) {
            return Err(ImportError::ArchiveEntryError {
                entry: name.to_string(),
                message: "路径越出解包目录".to_string(),
            });
        }
        path.push(part);
    }

    Ok(path)
}

fn is_drive_prefix(part: &str) -> bool {
    let bytes = part.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
