use std::path::Path;

use calamine::{open_workbook_auto, Data as DataType, Reader};

use crate::error::{IngestError, IngestResult};
use crate::utils::text::is_blank_row;

/// 先頭ワークシートを行×セルの表として読み込む
pub fn read_excel_rows(path: &Path) -> IngestResult<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|err| IngestError::Spreadsheet(err.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Spreadsheet("ワークシートが見つかりませんでした。".into()))?
        .map_err(|err| IngestError::Spreadsheet(err.to_string()))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(data_type_to_string).collect::<Vec<String>>())
        .filter(|row| !is_blank_row(row))
        .collect();

    Ok(rows)
}

fn data_type_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        DataType::Int(v) => v.to_string(),
        DataType::Bool(v) => v.to_string(),
        DataType::Error(_) => String::new(),
        _ => cell.to_string(),
    }
}
