use serde::{Deserialize, Serialize};

use crate::compat::{is_valid_clearance, DualMicroClearance, EvalConfig};

/// 公開CSVのURL。未設定ならリモート取得は行わず、同梱サンプルを使う。
pub const ENV_CSV_URL: &str = "CATHCHECK_CSV_URL";
/// クリアランス（mm、既定 0.10）
pub const ENV_CLEARANCE_MM: &str = "CATHCHECK_CLEARANCE_MM";
/// マイクロ2本並列時のクリアランス計上（`single` または `per_device`、既定 `per_device`）
pub const ENV_DUAL_MICRO_CLEARANCE: &str = "CATHCHECK_DUAL_MICRO_CLEARANCE";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    pub csv_url: Option<String>,
    pub eval: EvalConfig,
}

impl CheckerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 環境変数風の設定から読み込む。不正な値は警告を出して既定値のままにする
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            csv_url: lookup(ENV_CSV_URL)
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            ..Self::default()
        };

        if let Some(raw) = lookup(ENV_CLEARANCE_MM) {
            match raw.trim().parse::<f64>() {
                Ok(value) if is_valid_clearance(value) => config.eval.clearance_mm = value,
                _ => log::warn!(
                    "{ENV_CLEARANCE_MM}={raw:?} is not a non-negative number, using {}",
                    config.eval.clearance_mm
                ),
            }
        }

        if let Some(raw) = lookup(ENV_DUAL_MICRO_CLEARANCE) {
            match DualMicroClearance::parse(&raw) {
                Some(policy) => config.eval.dual_micro_clearance = policy,
                None => log::warn!(
                    "{ENV_DUAL_MICRO_CLEARANCE}={raw:?} is not recognized, using {:?}",
                    config.eval.dual_micro_clearance
                ),
            }
        }

        config
    }
}
