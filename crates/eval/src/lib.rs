//! Heuristic run scoring. Scores are rough signals for comparing prompt or
//! pipeline changes on a fixed sample set, not a substitute for review.

mod community;
mod podcast;

pub use community::*;
pub use podcast::*;

/// Round and clamp into `[0, 100]`. NaN scores 0.
pub fn normalize(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rounds_and_clamps() {
        assert_eq!(normalize(84.5), 85);
        assert_eq!(normalize(-3.0), 0);
        assert_eq!(normalize(140.0), 100);
        assert_eq!(normalize(f64::NAN), 0);
        assert_eq!(normalize(f64::INFINITY), 100);
    }
}
