pub mod csv;

use crate::models::{AppError, Device};
use crate::storage::DeviceStore;

/// ストアの内容をエクスポート（カテゴリ→名称の順）
///
/// `format` は "csv" または "json"。
pub fn export_devices(store: &DeviceStore, format: &str) -> Result<String, AppError> {
    let mut devices: Vec<&Device> = store.devices().collect();
    devices.sort_by(|a, b| {
        a.category
            .as_key()
            .cmp(b.category.as_key())
            .then_with(|| a.name.cmp(&b.name))
    });

    match format.to_uppercase().as_str() {
        "CSV" => csv::export_devices_csv(&devices),
        "JSON" => serde_json::to_string_pretty(&devices)
            .map_err(|e| AppError::new(format!("JSON変換エラー: {}", e))),
        other => Err(AppError::new(format!(
            "未対応のエクスポート形式です: {}",
            other
        ))),
    }
}
