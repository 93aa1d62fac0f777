//! カテーテルの組み合わせ適合判定
//!
//! ガイディング ⊃ 中間 ⊃ マイクロ(A/B) の入れ子について、外径＋クリアランスが
//! 内径に収まるか、有効長の差が十分かを判定する。寸法が欠けている判定は
//! `None`（判定不能）となり、`false` とは区別する。

pub mod fit;
pub mod length;

use serde::{Deserialize, Serialize};

use crate::models::Device;

pub use fit::FitCheck;
pub use length::{LengthCheck, LENGTH_MARGIN_CM};

/// 有限かつ0より大きい値のみを有効な寸法とみなす
pub fn has_positive_measurement(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// マイクロ2本並列時のクリアランスの数え方
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualMicroClearance {
    /// クリアランスを1回だけ加える（k = 1）
    Single,
    /// マイクロ1本ごとに加える（k = 2）
    #[default]
    PerDevice,
}

impl DualMicroClearance {
    pub fn multiplier(&self) -> f64 {
        match self {
            DualMicroClearance::Single => 1.0,
            DualMicroClearance::PerDevice => 2.0,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "single" | "1" => Some(DualMicroClearance::Single),
            "per_device" | "double" | "2" => Some(DualMicroClearance::PerDevice),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    pub clearance_mm: f64,
    pub dual_micro_clearance: DualMicroClearance,
}

pub const DEFAULT_CLEARANCE_MM: f64 = 0.10;

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            clearance_mm: DEFAULT_CLEARANCE_MM,
            dual_micro_clearance: DualMicroClearance::default(),
        }
    }
}

/// クリアランスは0以上の有限値のみ受け付ける
pub fn is_valid_clearance(clearance_mm: f64) -> bool {
    clearance_mm.is_finite() && clearance_mm >= 0.0
}

/// 評価対象の4枠
#[derive(Clone, Copy, Debug, Default)]
pub struct Combination<'a> {
    pub guiding: Option<&'a Device>,
    pub intermediate: Option<&'a Device>,
    pub micro_a: Option<&'a Device>,
    pub micro_b: Option<&'a Device>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVerdict {
    /// 1つ以上の判定が明示的に不適合
    Issue,
    /// 判定できたものがすべて適合
    AllGood,
    /// 判定できたものが1つもない
    NoVerdict,
}

/// 判定結果一式（保存せず、選択やクリアランスが変わるたびに再計算する）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub clearance_mm: f64,
    pub intermediate_in_guiding: FitCheck,
    pub micro_a_in_intermediate: FitCheck,
    pub micro_b_in_intermediate: FitCheck,
    pub both_micros_in_intermediate: FitCheck,
    pub guiding_intermediate_length: LengthCheck,
    pub intermediate_micro_a_length: LengthCheck,
    pub intermediate_micro_b_length: LengthCheck,
}

impl Evaluation {
    pub fn judgments(&self) -> [Option<bool>; 7] {
        [
            self.intermediate_in_guiding.fits,
            self.micro_a_in_intermediate.fits,
            self.micro_b_in_intermediate.fits,
            self.both_micros_in_intermediate.fits,
            self.guiding_intermediate_length.meets_margin,
            self.intermediate_micro_a_length.meets_margin,
            self.intermediate_micro_b_length.meets_margin,
        ]
    }

    pub fn any_issue(&self) -> bool {
        self.judgments().contains(&Some(false))
    }

    pub fn all_good(&self) -> bool {
        let judgments = self.judgments();
        !self.any_issue() && judgments.contains(&Some(true))
    }

    pub fn overall(&self) -> OverallVerdict {
        if self.any_issue() {
            OverallVerdict::Issue
        } else if self.all_good() {
            OverallVerdict::AllGood
        } else {
            OverallVerdict::NoVerdict
        }
    }
}

fn id_mm(device: Option<&Device>) -> Option<f64> {
    device.and_then(|d| d.id_mm)
}

fn od_mm(device: Option<&Device>) -> Option<f64> {
    device.and_then(|d| d.od_mm)
}

fn length_cm(device: Option<&Device>) -> Option<f64> {
    device.and_then(|d| d.length_cm)
}

/// 選択された組み合わせを判定する（副作用なし）
pub fn evaluate(combo: &Combination<'_>, config: &EvalConfig) -> Evaluation {
    let clearance = config.clearance_mm;
    let Combination {
        guiding,
        intermediate,
        micro_a,
        micro_b,
    } = *combo;

    // 2本並列は両マイクロと中間の寸法が揃ったときだけ判定する
    let both_micros_in_intermediate = if micro_a.is_some() && micro_b.is_some() {
        fit::side_by_side_fit(
            od_mm(micro_a),
            od_mm(micro_b),
            id_mm(intermediate),
            clearance,
            config.dual_micro_clearance.multiplier(),
        )
    } else {
        FitCheck::default()
    };

    Evaluation {
        clearance_mm: clearance,
        intermediate_in_guiding: fit::single_fit(od_mm(intermediate), id_mm(guiding), clearance),
        micro_a_in_intermediate: fit::single_fit(od_mm(micro_a), id_mm(intermediate), clearance),
        micro_b_in_intermediate: fit::single_fit(od_mm(micro_b), id_mm(intermediate), clearance),
        both_micros_in_intermediate,
        guiding_intermediate_length: length::length_margin(length_cm(guiding), length_cm(intermediate)),
        intermediate_micro_a_length: length::length_margin(length_cm(intermediate), length_cm(micro_a)),
        intermediate_micro_b_length: length::length_margin(length_cm(intermediate), length_cm(micro_b)),
    }
}
