use std::collections::HashMap;

use crate::models::Device;

/// 既存データに取り込みデータを重ねる
///
/// 同じキーのデバイスは取り込み側で上書きし、既存側にしかないものは残す。
/// 同じデータを2回マージしても結果は変わらない。
pub fn merge_devices(existing: Vec<Device>, incoming: Vec<Device>) -> Vec<Device> {
    let mut merged: HashMap<String, Device> = HashMap::new();
    for device in existing.into_iter().chain(incoming) {
        merged.insert(device.key(), device);
    }
    merged.into_values().collect()
}
