use thiserror::Error;

/// デバイスデータ取り込み（CSV/Excel/リモート）のエラー
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("データが空です（ヘッダー行とデータ行が必要です）")]
    EmptyData,

    #[error("CSVの解析に失敗しました: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excelファイルの読み込みに失敗しました: {0}")]
    Spreadsheet(String),

    #[error("ファイルの読み込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("サポートされていないファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("リモートCSVの取得に失敗しました: {0}")]
    Http(#[from] reqwest::Error),

    #[error("リモートCSVの取得に失敗しました (HTTP {0})")]
    HttpStatus(u16),

    #[error("URLが不正です: {0}")]
    InvalidUrl(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
