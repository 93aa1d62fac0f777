pub mod compat;
pub mod config;
pub mod error;
pub mod exporters;
pub mod models;
pub mod parsers;
pub mod remote;
pub mod storage;
pub mod utils;

mod diff;

pub use compat::{evaluate, Combination, EvalConfig, Evaluation, OverallVerdict};
pub use diff::merge_devices;
pub use storage::{CheckerSession, DeviceStore};

#[cfg(feature = "desktop")]
mod commands {
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    use serde::Serialize;

    use crate::compat::{Evaluation, OverallVerdict};
    use crate::exporters;
    use crate::models::{AppError, DeviceLists, ImportOutcome, ImportReport, SelectionRole};
    use crate::remote::RemoteSource;
    use crate::storage::{CheckerSession, DataSourceStatus};

    pub struct AppState {
        pub session: Mutex<CheckerSession>,
    }

    fn lock(state: &AppState) -> Result<MutexGuard<'_, CheckerSession>, AppError> {
        state
            .session
            .lock()
            .map_err(|_| AppError::new("セッション状態を取得できませんでした。"))
    }

    #[derive(Serialize)]
    pub struct EvaluationView {
        #[serde(flatten)]
        pub evaluation: Evaluation,
        pub overall: OverallVerdict,
    }

    /// 公開CSVを再取得してマージする
    ///
    /// URL未設定の場合は、データが空のときだけ同梱サンプルを読み込む。
    #[tauri::command]
    pub async fn refresh_remote_devices(
        state: tauri::State<'_, AppState>,
    ) -> Result<ImportReport, AppError> {
        let url = lock(&state)?.config().csv_url.clone();
        let Some(url) = url else {
            let summary = lock(&state)?.load_sample_if_empty()?;
            return Ok(ImportReport {
                summary,
                ..ImportReport::default()
            });
        };

        // 取得中はロックを保持しない。後から届いた結果がそのまま上書きする
        let fetched = RemoteSource::new(url).fetch_csv().await;
        lock(&state)?.apply_remote(fetched)
    }

    /// CSV/Excelファイルを読み込んでマージする
    #[tauri::command]
    pub fn import_device_file(
        state: tauri::State<'_, AppState>,
        path: String,
    ) -> Result<ImportOutcome, AppError> {
        lock(&state)?.import_file(&PathBuf::from(path))
    }

    /// アップロードされたCSVテキストを読み込んでマージする
    #[tauri::command]
    pub fn import_device_text(
        state: tauri::State<'_, AppState>,
        text: String,
    ) -> Result<ImportOutcome, AppError> {
        lock(&state)?.import_text(&text)
    }

    #[tauri::command]
    pub fn list_devices(state: tauri::State<'_, AppState>) -> Result<DeviceLists, AppError> {
        Ok(lock(&state)?.lists())
    }

    #[tauri::command]
    pub fn select_device(
        state: tauri::State<'_, AppState>,
        role: SelectionRole,
        id: Option<String>,
    ) -> Result<EvaluationView, AppError> {
        let mut session = lock(&state)?;
        session.select(role, id);
        Ok(view(session.evaluate()))
    }

    #[tauri::command]
    pub fn evaluate_selection(state: tauri::State<'_, AppState>) -> Result<EvaluationView, AppError> {
        Ok(view(lock(&state)?.evaluate()))
    }

    #[tauri::command]
    pub fn set_clearance(
        state: tauri::State<'_, AppState>,
        clearance_mm: f64,
    ) -> Result<EvaluationView, AppError> {
        let mut session = lock(&state)?;
        session.set_clearance(clearance_mm)?;
        Ok(view(session.evaluate()))
    }

    /// デバイス一覧をエクスポート（"csv" / "json"）
    #[tauri::command]
    pub fn export_devices(
        state: tauri::State<'_, AppState>,
        format: String,
    ) -> Result<String, AppError> {
        exporters::export_devices(lock(&state)?.store(), &format)
    }

    #[tauri::command]
    pub fn reset_devices(state: tauri::State<'_, AppState>) -> Result<(), AppError> {
        lock(&state)?.reset();
        Ok(())
    }

    #[tauri::command]
    pub fn data_source_status(
        state: tauri::State<'_, AppState>,
    ) -> Result<DataSourceStatus, AppError> {
        Ok(lock(&state)?.status().clone())
    }

    fn view(evaluation: Evaluation) -> EvaluationView {
        EvaluationView {
            overall: evaluation.overall(),
            evaluation,
        }
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Emitter, Manager};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::CheckerConfig::from_env();
    log::info!(
        "clearance {} mm, dual micro clearance {:?}",
        config.eval.clearance_mm,
        config.eval.dual_micro_clearance
    );

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .manage(commands::AppState {
            session: std::sync::Mutex::new(CheckerSession::new(config)),
        })
        .setup(|app| {
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let state = handle.state::<commands::AppState>();
                let result = commands::refresh_remote_devices(state).await;
                if let Err(err) = &result {
                    log::warn!("initial device load: {err}");
                }
                let _ = handle.emit("devices-loaded", result.is_ok());
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::refresh_remote_devices,
            commands::import_device_file,
            commands::import_device_text,
            commands::list_devices,
            commands::select_device,
            commands::evaluate_selection,
            commands::set_clearance,
            commands::export_devices,
            commands::reset_devices,
            commands::data_source_status
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
