#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
    /// bounce count, 0 for camera rays
    pub depth: u32,
    pub t_min: f32,
    pub t_max: f32,
}

impl Ray {
    pub const T_MIN_EPS: f32 = 0.0001;

    /// `direction` is normalized here, every ray in the crate carries a unit direction.
    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A, depth: u32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            depth,
            t_min: Self::T_MIN_EPS,
            t_max: f32::INFINITY,
        }
    }

    pub fn primary(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self::new(origin, direction, 0)
    }

    /// Occlusion query between `origin` and a point `dist` away along `direction`.
    /// Both ends are shrunk by the epsilon so neither the shading point nor the light surface
    /// occludes the segment.
    pub fn shadow(origin: glam::Vec3A, direction: glam::Vec3A, dist: f32, depth: u32) -> Self {
        Self {
            t_max: dist - Self::T_MIN_EPS,
            ..Self::new(origin, direction, depth)
        }
    }

    /// A secondary ray one bounce deeper than `self`.
    pub fn bounce(&self, origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self::new(origin, direction, self.depth + 1)
    }

    /// Same depth, new origin and direction: lens and shutter samples.
    pub fn resampled(&self, origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self::new(origin, direction, self.depth)
    }

    pub fn point_at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }

    pub fn contains(&self, t: f32) -> bool {
        self.t_min < t && t < self.t_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_increments_depth_and_keeps_parent() {
        let ray = Ray::primary(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, 0.0, 2.0));
        assert_eq!(ray.direction, glam::Vec3A::Z);

        let child = ray.bounce(glam::Vec3A::ONE, glam::Vec3A::X);
        assert_eq!(child.depth, 1);
        assert_eq!(ray.depth, 0);
        assert_eq!(child.resampled(glam::Vec3A::ZERO, glam::Vec3A::Y).depth, 1);
    }

    #[test]
    fn shadow_interval_excludes_both_ends() {
        let ray = Ray::shadow(glam::Vec3A::ZERO, glam::Vec3A::X, 2.0, 3);
        assert_eq!(ray.depth, 3);
        assert!(!ray.contains(0.0));
        assert!(!ray.contains(2.0));
        assert!(ray.contains(1.0));
    }
}
