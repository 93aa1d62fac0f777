use std::collections::HashMap;

use crate::error::{IngestError, IngestResult};
use crate::models::{synthesize_id, Device, ImportOutcome, ParseIssue, Severity};
use crate::utils::category::classify_category;
use crate::utils::header::{resolve_columns, Field};
use crate::utils::text::{optional_text, parse_measurement, CellValue};
use crate::utils::units::{fr_to_mm, inch_to_mm};

/// 表形式の行データからデバイス一覧を組み立てる
///
/// 1行目をヘッダーとして扱う。ヘッダーとデータ行が揃っていない場合は
/// `IngestError::EmptyData` を返す。有効な行が0件でもエラーにはせず、
/// 空の `ImportOutcome` を返す。
pub fn build_devices(rows: Vec<Vec<String>>) -> IngestResult<ImportOutcome> {
    if rows.len() < 2 {
        return Err(IngestError::EmptyData);
    }

    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();
    let columns = resolve_columns(&header);

    let mut outcome = ImportOutcome {
        headers: header,
        ..ImportOutcome::default()
    };

    if !columns.contains_key(&Field::Name) {
        outcome.issues.push(ParseIssue {
            message: "名称列（name / 名称 / 製品名）が見つかりませんでした。".to_string(),
            row: None,
            column: None,
            severity: Severity::Warning,
        });
    }

    for (row_index, row) in rows.enumerate() {
        // ヘッダーが1行目なので、データ行は2行目から
        let line_number = row_index + 2;
        let mut reader = RowReader {
            row: &row,
            columns: &columns,
            line_number,
            issues: &mut outcome.issues,
        };

        match reader.build_device() {
            Some(device) => outcome.devices.push(device),
            None => {
                outcome.skipped_rows.push(line_number);
                outcome.issues.push(ParseIssue {
                    message: format!("{line_number}行目: 名称が空のためスキップしました。"),
                    row: Some(line_number),
                    column: columns.get(&Field::Name).copied(),
                    severity: Severity::Info,
                });
            }
        }
    }

    log::debug!(
        "built {} devices, skipped {} rows, {} issues",
        outcome.devices.len(),
        outcome.skipped_rows.len(),
        outcome.issues.len()
    );

    Ok(outcome)
}

struct RowReader<'a> {
    row: &'a [String],
    columns: &'a HashMap<Field, usize>,
    line_number: usize,
    issues: &'a mut Vec<ParseIssue>,
}

impl RowReader<'_> {
    fn cell(&self, field: Field) -> Option<&str> {
        self.columns
            .get(&field)
            .and_then(|idx| self.row.get(*idx))
            .map(|value| value.as_str())
    }

    fn text(&self, field: Field) -> Option<String> {
        optional_text(self.cell(field))
    }

    /// 数値セルを読む。読めない値は警告を残して「値なし」にする
    fn number(&mut self, field: Field) -> Option<f64> {
        match parse_measurement(self.cell(field)) {
            CellValue::Valid(v) => Some(v),
            CellValue::Absent => None,
            CellValue::Invalid(raw) => {
                let line_number = self.line_number;
                self.issues.push(ParseIssue {
                    message: format!("{line_number}行目: 数値として扱えない値 '{raw}' を無視しました。"),
                    row: Some(line_number),
                    column: self.columns.get(&field).copied(),
                    severity: Severity::Warning,
                });
                None
            }
        }
    }

    fn build_device(&mut self) -> Option<Device> {
        let name = self.text(Field::Name)?;
        let category = classify_category(self.cell(Field::Category).unwrap_or_default());

        let id_inch = self.number(Field::IdInch);
        let od_fr = self.number(Field::OdFr);
        // mm列が有効ならそれを優先し、なければ別単位から補完する
        let id_mm = self.number(Field::IdMm).or_else(|| id_inch.map(inch_to_mm));
        let od_mm = self.number(Field::OdMm).or_else(|| od_fr.map(fr_to_mm));
        let length_cm = self.number(Field::LengthCm);

        let id = self
            .text(Field::Id)
            .unwrap_or_else(|| synthesize_id(category, &name));

        Some(Device {
            id,
            maker: self.text(Field::Maker),
            notes: self.text(Field::Notes),
            name,
            category,
            id_mm,
            od_mm,
            length_cm,
            id_inch,
            od_fr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceCategory;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let err = build_devices(table(&[&["name", "category"]])).unwrap_err();
        assert!(matches!(err, IngestError::EmptyData));
        assert!(matches!(build_devices(Vec::new()), Err(IngestError::EmptyData)));
    }

    #[test]
    fn test_japanese_headers() {
        let outcome = build_devices(table(&[
            &["名称", "カテゴリ", "内径_mm", "外径_mm", "長さ_cm"],
            &["Guider 8F", "ガイディング", "2.29", "2.67", "90"],
        ]))
        .unwrap();

        let device = &outcome.devices[0];
        assert_eq!(device.name, "Guider 8F");
        assert_eq!(device.category, DeviceCategory::Guiding);
        assert_eq!(device.id_mm, Some(2.29));
        assert_eq!(device.od_mm, Some(2.67));
        assert_eq!(device.length_cm, Some(90.0));
        assert_eq!(device.id, "guiding::Guider 8F");
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_metric_wins_over_inch() {
        let outcome = build_devices(table(&[
            &["name", "id_mm", "id_inch"],
            &["both", "2.0", "0.1"],
            &["inch only", "", "0.1"],
        ]))
        .unwrap();

        assert_eq!(outcome.devices[0].id_mm, Some(2.0));
        assert_eq!(outcome.devices[0].id_inch, Some(0.1));
        let backfilled = outcome.devices[1].id_mm.unwrap();
        assert!((backfilled - 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_french_backfills_outer_diameter() {
        let outcome = build_devices(table(&[&["name", "od_fr"], &["6F", "6"]])).unwrap();
        let od = outcome.devices[0].od_mm.unwrap();
        assert!((od - 1.98).abs() < 1e-9);
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let outcome = build_devices(table(&[
            &["name", "category"],
            &["", "Micro"],
            &["Keep", "Micro"],
        ]))
        .unwrap();

        assert_eq!(outcome.devices.len(), 1);
        assert_eq!(outcome.skipped_rows, vec![2]);
    }

    #[test]
    fn test_zero_valid_rows_is_soft_empty() {
        let outcome = build_devices(table(&[&["maker", "od_mm"], &["Acme", "1.0"]])).unwrap();
        assert!(outcome.is_empty());
        assert!(outcome
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Warning && issue.row.is_none()));
    }

    #[test]
    fn test_bad_cell_does_not_fail_import() {
        let outcome = build_devices(table(&[
            &["name", "od_mm", "length_cm"],
            &["X", "n/a", "-5"],
        ]))
        .unwrap();

        let device = &outcome.devices[0];
        assert_eq!(device.od_mm, None);
        assert_eq!(device.length_cm, None);
        assert_eq!(outcome.issues.len(), 2);
    }

    #[test]
    fn test_explicit_id_and_unknown_category() {
        let outcome = build_devices(table(&[
            &["id", "name", "category", "extra"],
            &["mc-7", "Odd", "unknown-xyz", "ignored"],
        ]))
        .unwrap();

        let device = &outcome.devices[0];
        assert_eq!(device.id, "mc-7");
        assert_eq!(device.category, DeviceCategory::Micro);
    }
}
