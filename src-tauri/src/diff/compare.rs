use std::collections::HashMap;

use crate::models::{ChangeStatus, Device, DeviceChange, ImportSummary};

/// 取り込みデータを既存データと比較して、キーごとの変化を分類する
///
/// # 差分ステータス
/// - `Added`: 既存にないキー
/// - `Updated`: 既存にあり内容が異なる
/// - `Unchanged`: 既存にあり内容が同一
///
/// 取り込み側で同じキーが重複している場合は、後の行だけを数える（マージと同じ扱い）。
pub fn compare_devices(existing: &HashMap<String, Device>, incoming: &[Device]) -> Vec<DeviceChange> {
    let mut last_by_key: HashMap<String, &Device> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for device in incoming {
        let key = device.key();
        if last_by_key.insert(key.clone(), device).is_none() {
            order.push(key);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let status = match (existing.get(&key), last_by_key.get(&key)) {
                (Some(old), Some(new)) if old == *new => ChangeStatus::Unchanged,
                (Some(_), _) => ChangeStatus::Updated,
                (None, _) => ChangeStatus::Added,
            };
            DeviceChange { key, status }
        })
        .collect()
}

pub fn summarize(changes: &[DeviceChange], total: usize) -> ImportSummary {
    let count = |status: ChangeStatus| changes.iter().filter(|c| c.status == status).count();
    ImportSummary {
        added: count(ChangeStatus::Added),
        updated: count(ChangeStatus::Updated),
        unchanged: count(ChangeStatus::Unchanged),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceCategory;

    fn device(id: &str, od_mm: f64) -> Device {
        Device {
            id: id.to_string(),
            name: id.to_string(),
            maker: Some("Acme".to_string()),
            category: DeviceCategory::Intermediate,
            id_mm: None,
            od_mm: Some(od_mm),
            length_cm: None,
            id_inch: None,
            od_fr: None,
            notes: None,
        }
    }

    #[test]
    fn test_compare_classifies_changes() {
        let mut existing = HashMap::new();
        existing.insert("A".to_string(), device("A", 1.0));
        existing.insert("B".to_string(), device("B", 2.0));

        let changes = compare_devices(&existing, &[device("A", 1.0), device("B", 2.1), device("C", 3.0)]);
        let statuses: Vec<ChangeStatus> = changes.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![ChangeStatus::Unchanged, ChangeStatus::Updated, ChangeStatus::Added]
        );

        let summary = summarize(&changes, 3);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.unchanged, 1);
    }

    #[test]
    fn test_duplicate_incoming_key_counts_once() {
        let changes = compare_devices(&HashMap::new(), &[device("A", 1.0), device("A", 1.5)]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, ChangeStatus::Added);
    }
}
