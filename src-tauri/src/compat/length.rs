use serde::{Deserialize, Serialize};

use super::has_positive_measurement;

/// 隣り合うデバイス間に必要な有効長の差（cm）。変更不可。
pub const LENGTH_MARGIN_CM: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthCheck {
    pub delta_cm: Option<f64>,
    pub meets_margin: Option<bool>,
}

/// 有効長の差の絶対値が `LENGTH_MARGIN_CM` 以上あるか
pub fn length_margin(outer_cm: Option<f64>, inner_cm: Option<f64>) -> LengthCheck {
    let outer = outer_cm.filter(|v| has_positive_measurement(*v));
    let inner = inner_cm.filter(|v| has_positive_measurement(*v));

    let delta_cm = match (outer, inner) {
        (Some(outer), Some(inner)) => Some((outer - inner).abs()),
        _ => None,
    };

    LengthCheck {
        delta_cm,
        meets_margin: delta_cm.map(|delta| delta >= LENGTH_MARGIN_CM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_boundary_is_inclusive() {
        let check = length_margin(Some(100.0), Some(80.0));
        assert_eq!(check.delta_cm, Some(20.0));
        assert_eq!(check.meets_margin, Some(true));

        let check = length_margin(Some(100.0), Some(81.0));
        assert_eq!(check.delta_cm, Some(19.0));
        assert_eq!(check.meets_margin, Some(false));
    }

    #[test]
    fn test_margin_uses_absolute_difference() {
        assert_eq!(length_margin(Some(90.0), Some(125.0)).meets_margin, Some(true));
    }

    #[test]
    fn test_missing_length_is_undefined() {
        assert_eq!(length_margin(None, Some(80.0)), LengthCheck::default());
        assert_eq!(length_margin(Some(100.0), None).meets_margin, None);
    }
}
