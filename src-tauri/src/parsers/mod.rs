mod builder;
mod csv;
mod excel;

use std::fs;
use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::models::ImportOutcome;

pub use builder::build_devices;
pub use self::csv::read_csv_rows;

/// CSVテキスト（リモート取得・アップロード共通）からデバイスを読み込む
pub fn parse_device_text(text: &str) -> IngestResult<ImportOutcome> {
    build_devices(read_csv_rows(text)?)
}

/// ファイルからデバイスを読み込む（拡張子で形式を判定）
pub fn parse_device_file(path: &Path) -> IngestResult<ImportOutcome> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| IngestError::UnsupportedFormat(path.display().to_string()))?;

    match ext.as_str() {
        "csv" | "txt" => {
            let text = fs::read_to_string(path)?;
            parse_device_text(&text)
        }
        "xlsx" | "xls" | "ods" => build_devices(excel::read_excel_rows(path)?),
        other => Err(IngestError::UnsupportedFormat(other.to_string())),
    }
}
