use serde::{Deserialize, Serialize};

use super::has_positive_measurement;

/// 内腔に外側の寸法が収まるかの判定結果
///
/// `fits` が `None` なら寸法不足で判定できない（`false` とは区別する）。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitCheck {
    pub required_mm: Option<f64>,
    pub available_mm: Option<f64>,
    pub fits: Option<bool>,
}

/// 単体の入れ子判定: `od + clearance <= id`
pub fn single_fit(inner_od_mm: Option<f64>, outer_id_mm: Option<f64>, clearance_mm: f64) -> FitCheck {
    let required_mm = inner_od_mm
        .filter(|od| has_positive_measurement(*od))
        .map(|od| od + clearance_mm);
    let available_mm = outer_id_mm.filter(|id| has_positive_measurement(*id));

    FitCheck {
        required_mm,
        available_mm,
        fits: compare(required_mm, available_mm),
    }
}

/// マイクロカテーテル2本を並べた判定: `od_a + od_b + k * clearance <= id`
pub fn side_by_side_fit(
    od_a_mm: Option<f64>,
    od_b_mm: Option<f64>,
    outer_id_mm: Option<f64>,
    clearance_mm: f64,
    multiplier: f64,
) -> FitCheck {
    let od_a = od_a_mm.filter(|od| has_positive_measurement(*od));
    let od_b = od_b_mm.filter(|od| has_positive_measurement(*od));
    let required_mm = match (od_a, od_b) {
        (Some(a), Some(b)) => Some(a + b + multiplier * clearance_mm),
        _ => None,
    };
    let available_mm = outer_id_mm.filter(|id| has_positive_measurement(*id));

    FitCheck {
        required_mm,
        available_mm,
        fits: compare(required_mm, available_mm),
    }
}

fn compare(required_mm: Option<f64>, available_mm: Option<f64>) -> Option<bool> {
    Some(required_mm? <= available_mm?)
}
