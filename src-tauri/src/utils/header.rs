use std::collections::HashMap;

/// CSVの列が対応する正規フィールド
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Category,
    Maker,
    IdMm,
    OdMm,
    LengthCm,
    IdInch,
    OdFr,
    Notes,
}

/// 正規フィールドごとの別名（正規化済みの文字列で比較する）
const HEADER_ALIASES: &[(Field, &[&str])] = &[
    (Field::Name, &["name", "名称", "製品名"]),
    (Field::Category, &["category", "カテゴリ", "カテゴリー"]),
    (Field::Maker, &["maker", "メーカー"]),
    (Field::IdMm, &["id_mm", "内径_mm"]),
    (Field::OdMm, &["od_mm", "外径_mm"]),
    (Field::LengthCm, &["length_cm", "長さ_cm"]),
    (Field::IdInch, &["id_inch", "内径_inch"]),
    (Field::OdFr, &["od_fr", "外径_fr"]),
    (Field::Notes, &["notes", "備考"]),
    (Field::Id, &["id"]),
];

/// ヘッダー文字列を正規化（BOM・前後空白除去、小文字化）
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{FEFF}').trim().to_lowercase()
}

pub fn match_header(normalized: &str) -> Option<Field> {
    HEADER_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized))
        .map(|(field, _)| *field)
}

/// ヘッダー行から フィールド → 列番号 の対応を作る
///
/// 同じフィールドに複数の列が一致した場合は最初の列を使う。未知の列は無視する。
pub fn resolve_columns(header: &[String]) -> HashMap<Field, usize> {
    let mut columns = HashMap::new();
    for (idx, raw) in header.iter().enumerate() {
        if let Some(field) = match_header(&normalize_header(raw)) {
            columns.entry(field).or_insert(idx);
        }
    }
    columns
}
