use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compat::{evaluate, is_valid_clearance, Combination, Evaluation};
use crate::config::CheckerConfig;
use crate::error::IngestResult;
use crate::models::{
    AppError, Device, DeviceLists, ImportOutcome, ImportReport, ImportSummary, Selection,
    SelectionRole,
};
use crate::parsers::{parse_device_file, parse_device_text};

use super::sample::sample_devices;
use super::store::DeviceStore;

/// 現在のデータの出どころ
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Empty,
    Sample,
    Remote,
    Manual,
}

/// 画面に表示するためのデータ状態（最後の失敗理由を含む）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSourceStatus {
    pub source: DataSource,
    pub device_count: usize,
    pub last_error: Option<String>,
    /// 取り込み自体は成功したが有効な行がなかった場合の理由
    pub last_warning: Option<String>,
    pub last_summary: Option<ImportSummary>,
}

/// 1ユーザー分のメモリ上の状態（ストア・選択・設定）
#[derive(Debug, Default)]
pub struct CheckerSession {
    store: DeviceStore,
    selection: Selection,
    config: CheckerConfig,
    status: DataSourceStatus,
}

impl CheckerSession {
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &DeviceStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn status(&self) -> &DataSourceStatus {
        &self.status
    }

    pub fn lists(&self) -> DeviceLists {
        self.store.lists()
    }

    /// リモート取得の結果を反映する
    ///
    /// 成功時はマージ（後から届いた結果が優先）。失敗時や有効な行が0件の場合は
    /// 現在のデータを残し、データが空なら同梱サンプルを読み込む。理由は状態に記録する。
    pub fn apply_remote(&mut self, fetched: IngestResult<String>) -> Result<ImportReport, AppError> {
        let result = fetched.and_then(|text| parse_device_text(&text));
        match result {
            Ok(outcome) if outcome.is_empty() => {
                let reason = outcome
                    .issues
                    .first()
                    .map(|issue| issue.message.clone())
                    .unwrap_or_else(|| "有効なデバイス行がありませんでした。".to_string());
                log::warn!("remote CSV contained no valid rows: {reason}");
                for issue in &outcome.issues {
                    log::debug!("{}", issue.message);
                }

                let summary = if self.store.is_empty() {
                    self.load_sample()?
                } else {
                    ImportSummary {
                        total: self.store.len(),
                        ..ImportSummary::default()
                    }
                };
                self.status.last_warning = Some(reason);
                Ok(ImportReport {
                    summary,
                    issues: outcome.issues,
                    skipped_rows: outcome.skipped_rows,
                })
            }
            Ok(outcome) => {
                let ImportOutcome {
                    devices,
                    issues,
                    skipped_rows,
                    ..
                } = outcome;
                let summary = self.merge_devices(devices, DataSource::Remote);
                Ok(ImportReport {
                    summary,
                    issues,
                    skipped_rows,
                })
            }
            Err(err) => {
                log::warn!("remote device load failed: {err}");
                if self.store.is_empty() {
                    self.load_sample()?;
                }
                self.status.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// 手動で読み込んだCSVテキストをマージする
    pub fn import_text(&mut self, text: &str) -> Result<ImportOutcome, AppError> {
        self.import_with(parse_device_text(text))
    }

    /// ファイル（CSV/Excel）をマージする
    pub fn import_file(&mut self, path: &Path) -> Result<ImportOutcome, AppError> {
        self.import_with(parse_device_file(path))
    }

    fn import_with(&mut self, parsed: IngestResult<ImportOutcome>) -> Result<ImportOutcome, AppError> {
        match parsed {
            Ok(outcome) => {
                if outcome.is_empty() {
                    log::info!("import contained no valid rows");
                } else {
                    self.merge_devices(outcome.devices.clone(), DataSource::Manual);
                }
                Ok(outcome)
            }
            Err(err) => {
                self.status.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    fn merge_devices(&mut self, devices: Vec<Device>, source: DataSource) -> ImportSummary {
        let summary = self.store.merge(devices);
        log::info!(
            "merged devices from {source:?}: {} added, {} updated, {} unchanged ({} total)",
            summary.added,
            summary.updated,
            summary.unchanged,
            summary.total
        );
        self.status = DataSourceStatus {
            source,
            device_count: self.store.len(),
            last_error: None,
            last_warning: None,
            last_summary: Some(summary),
        };
        summary
    }

    pub fn load_sample(&mut self) -> IngestResult<ImportSummary> {
        let devices = sample_devices()?;
        log::info!("loading {} bundled sample devices", devices.len());
        let summary = self.store.merge(devices);
        self.status.source = DataSource::Sample;
        self.status.device_count = self.store.len();
        self.status.last_summary = Some(summary);
        Ok(summary)
    }

    /// データが空のときだけ同梱サンプルを読み込む（手動取り込み分を上書きしない）
    pub fn load_sample_if_empty(&mut self) -> IngestResult<ImportSummary> {
        if self.store.is_empty() {
            return self.load_sample();
        }
        Ok(ImportSummary {
            total: self.store.len(),
            ..ImportSummary::default()
        })
    }

    /// ストアと選択を空にする（ストアが縮む唯一の操作）
    pub fn reset(&mut self) {
        self.store.reset();
        self.selection = Selection::default();
        self.status = DataSourceStatus::default();
    }

    pub fn select(&mut self, role: SelectionRole, key: Option<String>) {
        *self.selection.slot_mut(role) = key.filter(|k| !k.trim().is_empty());
    }

    pub fn set_clearance(&mut self, clearance_mm: f64) -> Result<(), AppError> {
        if !is_valid_clearance(clearance_mm) {
            return Err(AppError::new(format!(
                "クリアランスは0以上の数値で指定してください: {clearance_mm}"
            )));
        }
        self.config.eval.clearance_mm = clearance_mm;
        Ok(())
    }

    /// 現在の選択を判定する。ストアにないキーは未選択として扱う
    pub fn evaluate(&self) -> Evaluation {
        let lookup = |key: &Option<String>| key.as_deref().and_then(|k| self.store.get(k));
        let combo = Combination {
            guiding: lookup(&self.selection.guiding),
            intermediate: lookup(&self.selection.intermediate),
            micro_a: lookup(&self.selection.micro_a),
            micro_b: lookup(&self.selection.micro_b),
        };
        evaluate(&combo, &self.config.eval)
    }
}
