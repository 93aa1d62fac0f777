//! mm / inch / French の換算
//!
//! Fr→mm の係数 0.33 は近似値であり、臨床的に保証された定数ではない。

pub const MM_PER_INCH: f64 = 25.4;
pub const MM_PER_FR: f64 = 0.33;

pub fn inch_to_mm(inch: f64) -> f64 {
    inch * MM_PER_INCH
}

pub fn fr_to_mm(fr: f64) -> f64 {
    fr * MM_PER_FR
}

/// 表示専用（適合判定には使わない）
pub fn mm_to_inch(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// 表示専用（適合判定には使わない）
pub fn mm_to_fr(mm: f64) -> f64 {
    mm / MM_PER_FR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_inch_to_mm() {
        assert!(approx(inch_to_mm(0.1), 2.54));
        assert!(approx(inch_to_mm(0.021), 0.5334));
    }

    #[test]
    fn test_fr_to_mm() {
        assert!(approx(fr_to_mm(6.0), 1.98));
    }

    #[test]
    fn test_inverse_conversions_round_trip() {
        for x in [0.001, 0.017, 0.5, 1.0, 6.0, 8.5, 120.0] {
            assert!(approx(mm_to_inch(inch_to_mm(x)), x), "inch {x}");
            assert!(approx(mm_to_fr(fr_to_mm(x)), x), "fr {x}");
        }
    }
}
