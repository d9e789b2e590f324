//! Entrance delays and button ripple geometry

use std::time::Duration;

/// Staggered delay for scroll-reveal targets
pub fn reveal_delay(index: usize) -> Duration {
    Duration::from_millis((index as u64).saturating_mul(45).min(380))
}

/// Staggered delay for table row entrance
pub fn row_delay(index: usize) -> Duration {
    Duration::from_millis((index as u64).saturating_mul(38).min(300))
}

/// Square ripple placed in the control's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Ripple for a pointer at (`x`, `y`) relative to the control's top-left corner
    pub fn at(width: f64, height: f64, x: f64, y: f64) -> Self {
        let size = width.max(height) * 1.25;
        Self {
            size,
            left: x - size / 2.0,
            top: y - size / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_are_capped() {
        assert_eq!(reveal_delay(0), Duration::ZERO);
        assert_eq!(reveal_delay(2), Duration::from_millis(90));
        assert_eq!(reveal_delay(50), Duration::from_millis(380));
        assert_eq!(row_delay(3), Duration::from_millis(114));
        assert_eq!(row_delay(20), Duration::from_millis(300));
    }

    #[test]
    fn ripple_is_centered_on_pointer() {
        let ripple = Ripple::at(80.0, 40.0, 20.0, 10.0);
        assert_eq!(ripple.size, 100.0);
        assert_eq!(ripple.left, -30.0);
        assert_eq!(ripple.top, -40.0);
    }
}
