use nalgebra::Vector3;

/// Helpers nalgebra does not provide with the zero-vector policy we need.
pub trait VectorExt {
    /// Unit vector in the same direction, or the vector itself when its
    /// magnitude is zero (nalgebra's `normalize` would yield NaN).
    fn unit_or_self(&self) -> Self;
}

impl VectorExt for Vector3<f64> {
    fn unit_or_self(&self) -> Self {
        let mag = self.norm();
        if mag <= 0.0 {
            *self
        } else {
            self / mag
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vector_has_unit_length() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        let u = v.unit_or_self();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 3.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_is_returned_unchanged() {
        let z = Vector3::<f64>::zeros();
        assert_eq!(z.unit_or_self(), z);
    }

    #[test]
    fn cross_and_dot_follow_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(&y), 0.0);
    }
}
