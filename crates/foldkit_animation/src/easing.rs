//! Easing curves
//!
//! Map linear progress `t` in `0.0..=1.0` to eased progress. Every curve
//! fixes both endpoints: `apply(0.0) == 0.0` and `apply(1.0) == 1.0`.

/// Easing function applied to a primitive's normalized time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    /// Starts fast and slows down: `1 - (1 - t)^2`
    #[default]
    Decelerate,
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 2] = [Easing::Linear, Easing::Decelerate];

    #[test]
    fn test_endpoints_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", easing);
        }
    }

    #[test]
    fn test_decelerate_leads_linear() {
        assert!(Easing::Decelerate.apply(0.5) > 0.5);
        assert!((Easing::Decelerate.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(1.7), 1.0);
        assert_eq!(Easing::Decelerate.apply(-0.2), 0.0);
    }
}
