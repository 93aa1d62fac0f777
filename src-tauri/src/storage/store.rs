use std::collections::HashMap;

use crate::diff::{compare_devices, merge_devices, summarize};
use crate::models::{Device, DeviceCategory, DeviceLists, ImportSummary};

/// セッション中のデバイス一覧（キー → デバイス）
///
/// 取り込みのたびにキー単位で上書きマージする。縮むのは `reset` のみ。
#[derive(Clone, Debug, Default)]
pub struct DeviceStore {
    devices: HashMap<String, Device>,
}

impl DeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_devices(devices: Vec<Device>) -> Self {
        let mut store = Self::new();
        store.merge(devices);
        store
    }

    /// 取り込みデータをマージし、追加/更新/同一の件数を返す
    pub fn merge(&mut self, incoming: Vec<Device>) -> ImportSummary {
        let changes = compare_devices(&self.devices, &incoming);

        let existing: Vec<Device> = self.devices.drain().map(|(_, device)| device).collect();
        self.devices = merge_devices(existing, incoming)
            .into_iter()
            .map(|device| (device.key(), device))
            .collect();

        summarize(&changes, self.devices.len())
    }

    pub fn get(&self, key: &str) -> Option<&Device> {
        self.devices.get(key)
    }

    /// カテゴリで絞り込んだ一覧（メーカー、名称の順で並べる）
    pub fn by_category(&self, category: DeviceCategory) -> Vec<&Device> {
        let mut devices: Vec<&Device> = self
            .devices
            .values()
            .filter(|device| device.category == category)
            .collect();
        devices.sort_by(|a, b| {
            a.maker
                .as_deref()
                .unwrap_or_default()
                .cmp(b.maker.as_deref().unwrap_or_default())
                .then_with(|| a.name.cmp(&b.name))
        });
        devices
    }

    pub fn lists(&self) -> DeviceLists {
        let owned = |category: DeviceCategory| -> Vec<Device> {
            self.by_category(category).into_iter().cloned().collect()
        };
        DeviceLists {
            guiding: owned(DeviceCategory::Guiding),
            intermediate: owned(DeviceCategory::Intermediate),
            micro: owned(DeviceCategory::Micro),
        }
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn reset(&mut self) {
        self.devices.clear();
    }
}
