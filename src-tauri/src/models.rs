use serde::{Deserialize, Serialize};
use std::fmt;

/// デバイスの役割カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Guiding,
    Intermediate,
    Micro,
}

impl DeviceCategory {
    pub const ALL: [DeviceCategory; 3] = [
        DeviceCategory::Guiding,
        DeviceCategory::Intermediate,
        DeviceCategory::Micro,
    ];

    /// 合成キーやエクスポートで使う安定した名前
    pub fn as_key(&self) -> &'static str {
        match self {
            DeviceCategory::Guiding => "guiding",
            DeviceCategory::Intermediate => "intermediate",
            DeviceCategory::Micro => "micro",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// カテーテル製品1件分のデータ
///
/// 寸法は `None` が「不明」を表す（0として扱わない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub maker: Option<String>,
    pub category: DeviceCategory,
    pub id_mm: Option<f64>,
    pub od_mm: Option<f64>,
    pub length_cm: Option<f64>,
    pub id_inch: Option<f64>,
    pub od_fr: Option<f64>,
    pub notes: Option<String>,
}

impl Device {
    /// ストア上のキー（idが空なら `category::name`）
    pub fn key(&self) -> String {
        if self.id.trim().is_empty() {
            synthesize_id(self.category, &self.name)
        } else {
            self.id.clone()
        }
    }
}

pub fn synthesize_id(category: DeviceCategory, name: &str) -> String {
    format!("{}::{}", category.as_key(), name.trim())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Info,
}

/// 取り込み時のセル/行単位の問題（致命的ではない）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParseIssue {
    pub message: String,
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub severity: Severity,
}

/// CSV/Excel取り込みの結果
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub devices: Vec<Device>,
    pub headers: Vec<String>,
    pub issues: Vec<ParseIssue>,
    pub skipped_rows: Vec<usize>,
}

impl ImportOutcome {
    /// 構造は正しいが有効な行が1件もなかった場合
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// リモート取得1回分の結果（マージ件数と取り込み時の問題）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub summary: ImportSummary,
    pub issues: Vec<ParseIssue>,
    pub skipped_rows: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Added,
    Updated,
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceChange {
    pub key: String,
    pub status: ChangeStatus,
}

/// マージ結果の件数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// 選択枠（ガイディング/中間/マイクロA/マイクロB）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRole {
    Guiding,
    Intermediate,
    MicroA,
    MicroB,
}

/// 各枠が保持するのはストアのキーのみ
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub guiding: Option<String>,
    pub intermediate: Option<String>,
    pub micro_a: Option<String>,
    pub micro_b: Option<String>,
}

impl Selection {
    pub fn slot_mut(&mut self, role: SelectionRole) -> &mut Option<String> {
        match role {
            SelectionRole::Guiding => &mut self.guiding,
            SelectionRole::Intermediate => &mut self.intermediate,
            SelectionRole::MicroA => &mut self.micro_a,
            SelectionRole::MicroB => &mut self.micro_b,
        }
    }
}

/// カテゴリ別のデバイス一覧（表示用）
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeviceLists {
    pub guiding: Vec<Device>,
    pub intermediate: Vec<Device>,
    pub micro: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub message: String,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<crate::error::IngestError> for AppError {
    fn from(err: crate::error::IngestError) -> Self {
        AppError::new(err.to_string())
    }
}
