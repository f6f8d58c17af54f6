//! Proximity-to-heat mapping for the indicator UI.

use serde::{Deserialize, Serialize};

/// Normalized proximity in [0, 1]: 0 at or beyond the heat scale
/// distance, 1 on top of the target.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Heat(f64);

/// Coarse buckets for text UIs and haptic cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatBand {
    Cold,
    Warm,
    Hot,
    Burning,
}

impl Heat {
    /// Heat at `distance_m` from the target, saturating to fully cold at
    /// `scale_m`. `scale_m` must be positive; sessions validate it.
    pub fn from_distance(distance_m: f64, scale_m: f64) -> Self {
        let clamped = distance_m.clamp(0.0, scale_m);
        Heat(1.0 - clamped / scale_m)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// HSL hue for the radial indicator: 120° (green) fully cold down to
    /// 0° (red) on the target.
    pub fn hue_degrees(&self) -> f64 {
        120.0 * (1.0 - self.0)
    }

    pub fn band(&self) -> HeatBand {
        if self.0 >= 0.9 {
            HeatBand::Burning
        } else if self.0 >= 0.6 {
            HeatBand::Hot
        } else if self.0 >= 0.3 {
            HeatBand::Warm
        } else {
            HeatBand::Cold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_saturates_at_scale() {
        assert_eq!(Heat::from_distance(20.0, 20.0).value(), 0.0);
        assert_eq!(Heat::from_distance(500.0, 20.0).value(), 0.0);
        assert_eq!(Heat::from_distance(0.0, 20.0).value(), 1.0);
    }

    #[test]
    fn test_linear_in_between() {
        assert_relative_eq!(Heat::from_distance(10.0, 20.0).value(), 0.5);
        assert_relative_eq!(Heat::from_distance(5.0, 20.0).value(), 0.75);
    }

    #[test]
    fn test_hue_ramp() {
        assert_relative_eq!(Heat::from_distance(20.0, 20.0).hue_degrees(), 120.0);
        assert_relative_eq!(Heat::from_distance(0.0, 20.0).hue_degrees(), 0.0);
    }

    #[test]
    fn test_bands() {
        assert_eq!(Heat::from_distance(1.0, 20.0).band(), HeatBand::Burning);
        assert_eq!(Heat::from_distance(6.0, 20.0).band(), HeatBand::Hot);
        assert_eq!(Heat::from_distance(12.0, 20.0).band(), HeatBand::Warm);
        assert_eq!(Heat::from_distance(19.0, 20.0).band(), HeatBand::Cold);
    }
}
