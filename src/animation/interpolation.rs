use crate::core::geo::LngLat;

/// Interpolation trait for values that can be smoothly transitioned
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * t
    }
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Interpolation::linear(*self, *other, t)
    }
}

impl Interpolatable for LngLat {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LngLat::new(
            Interpolation::linear(self.lng, other.lng, t),
            Interpolation::linear(self.lat, other.lat, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_interpolation() {
        assert_eq!(Interpolation::linear(0.0, 10.0, 0.5), 5.0);
        assert_eq!(Interpolation::linear(0.0, 10.0, 0.0), 0.0);
        assert_eq!(Interpolation::linear(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_lng_lat_interpolation() {
        let start = LngLat::new(0.0, 0.0);
        let end = LngLat::new(10.0, 10.0);
        let mid = start.lerp(&end, 0.5);
        assert_eq!(mid, LngLat::new(5.0, 5.0));
    }
}
