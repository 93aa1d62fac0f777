/// 数値セルの解釈結果
///
/// `Absent`（列なし・空欄）と `Invalid`（数値として読めない、非有限、0以下）は
/// 判定上どちらも「値なし」として扱う。
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Absent,
    Invalid(String),
    Valid(f64),
}

impl CellValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            CellValue::Valid(v) => Some(*v),
            _ => None,
        }
    }
}

/// セル文字列を寸法値として解釈する（全角数字にも対応）
pub fn parse_measurement(cell: Option<&str>) -> CellValue {
    let raw = match cell.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return CellValue::Absent,
    };

    let normalized: String = raw.chars().map(fullwidth_to_halfwidth).collect();
    match normalized.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => CellValue::Valid(v),
        _ => CellValue::Invalid(raw.to_string()),
    }
}

/// 前後の空白を除いた文字列（空なら `None`）
pub fn optional_text(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

/// 全角文字を半角に変換
pub fn fullwidth_to_halfwidth(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32((c as u32) - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
