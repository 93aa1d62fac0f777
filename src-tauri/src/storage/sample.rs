use crate::error::IngestResult;
use crate::models::Device;
use crate::parsers::parse_device_text;

/// 同梱のサンプルデータ（値は説明用で、臨床的な正しさは保証しない）
const SAMPLE_DEVICES_CSV: &str = include_str!("../../resources/sample_devices.csv");

/// リモート取得に失敗したときのフォールバック用データ
pub fn sample_devices() -> IngestResult<Vec<Device>> {
    Ok(parse_device_text(SAMPLE_DEVICES_CSV)?.devices)
}
