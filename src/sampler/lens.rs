use crate::core::rng::Rng;

/// Offset on a thin lens of radius `radius`, expressed in the plane perpendicular to
/// `direction`. Uses rejection sampling on the unit disk.
pub fn sample_lens_offset(direction: glam::Vec3A, radius: f32, rng: &mut Rng) -> glam::Vec3A {
    let (x, y) = rng.uniform_in_disk();
    let (right, true_up) = lens_basis(direction);
    right * (x * radius) + true_up * (y * radius)
}

/// `right = direction x up`, `true_up = right x direction`. `up` switches from Y to X when the
/// direction is nearly vertical.
pub fn lens_basis(direction: glam::Vec3A) -> (glam::Vec3A, glam::Vec3A) {
    let up = if direction.y.abs() > 0.99 {
        glam::Vec3A::X
    } else {
        glam::Vec3A::Y
    };
    let right = direction.cross(up).normalize();
    let true_up = right.cross(direction).normalize();
    (right, true_up)
}

/// Uniform time in the shutter interval `[0, 1]`.
pub fn sample_shutter_time(rng: &mut Rng) -> f32 {
    rng.uniform_1d()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal_even_when_vertical() {
        for dir in [
            glam::Vec3A::new(0.0, 0.0, -1.0),
            glam::Vec3A::new(0.0, 1.0, 0.0),
            glam::Vec3A::new(0.01, -0.999, 0.0).normalize(),
        ] {
            let (right, true_up) = lens_basis(dir);
            assert!(right.is_finite() && true_up.is_finite());
            assert!(right.dot(dir).abs() < 1e-5);
            assert!(true_up.dot(dir).abs() < 1e-5);
            assert!(right.dot(true_up).abs() < 1e-5);
            assert!((right.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn lens_offsets_stay_within_radius() {
        let mut rng = Rng::with_seed(21);
        let dir = glam::Vec3A::new(0.2, 0.1, -1.0).normalize();
        for _ in 0..1000 {
            let offset = sample_lens_offset(dir, 0.5, &mut rng);
            assert!(offset.length() <= 0.5 + 1e-5);
            assert!(offset.dot(dir).abs() < 1e-4);
        }
        assert_eq!(sample_lens_offset(dir, 0.0, &mut rng), glam::Vec3A::ZERO);
    }

    #[test]
    fn shutter_time_in_unit_interval() {
        let mut rng = Rng::with_seed(8);
        for _ in 0..1000 {
            let t = sample_shutter_time(&mut rng);
            assert!((0.0..=1.0).contains(&t));
        }
    }
}
