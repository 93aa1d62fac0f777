use csv::WriterBuilder;

use crate::models::{AppError, Device};

const EXPORT_HEADERS: [&str; 10] = [
    "id",
    "name",
    "category",
    "maker",
    "id_mm",
    "od_mm",
    "length_cm",
    "id_inch",
    "od_fr",
    "notes",
];

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// CSVエクスポート（正規の英語ヘッダー、UTF-8 BOM付き）
pub fn export_devices_csv(devices: &[&Device]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| AppError::new(format!("CSV書き込みエラー: {}", e)))?;

    for device in devices {
        let row = [
            device.id.clone(),
            device.name.clone(),
            device.category.as_key().to_string(),
            device.maker.clone().unwrap_or_default(),
            number_cell(device.id_mm),
            number_cell(device.od_mm),
            number_cell(device.length_cm),
            number_cell(device.id_inch),
            number_cell(device.od_fr),
            device.notes.clone().unwrap_or_default(),
        ];
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(format!("CSV書き込みエラー: {}", e)))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::new(format!("CSVバッファ取得エラー: {}", e)))?;

    let csv_string =
        String::from_utf8(data).map_err(|e| AppError::new(format!("UTF-8変換エラー: {}", e)))?;

    // UTF-8 BOMを先頭に追加
    Ok(format!("\u{FEFF}{}", csv_string))
}
