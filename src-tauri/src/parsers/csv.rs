use std::io::Read;

use csv::ReaderBuilder;

use crate::error::IngestResult;
use crate::utils::text::is_blank_row;

/// CSVテキストを行×セルの表に分解する
///
/// 引用符内の区切り文字・改行、`""` による引用符のエスケープ、
/// `\r\n` / `\r` / `\n` の改行に対応する。空白のみの行は取り除く。
pub fn read_csv_rows(text: &str) -> IngestResult<Vec<Vec<String>>> {
    read_csv_from(text.trim_start_matches('\u{FEFF}').as_bytes())
}

fn read_csv_from<R: Read>(source: R) -> IngestResult<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    for record in reader.records() {
        let row: Vec<String> = record?.iter().map(|cell| cell.to_string()).collect();
        if row.is_empty() || is_blank_row(&row) {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}
