use crate::core::{loader::InputParams, ray::Ray};

use super::CameraT;

/// Pinhole camera.
pub struct PerspectiveCamera {
    eye: glam::Vec3A,
    forward: glam::Vec3A,
    up: glam::Vec3A,
    right: glam::Vec3A,
    half_cot_half_fov: f32,
}

impl PerspectiveCamera {
    /// `fov` is the vertical field of view in radians.
    pub fn new(eye: glam::Vec3A, forward: glam::Vec3A, up: glam::Vec3A, fov: f32) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self {
            eye,
            forward,
            up,
            right,
            half_cot_half_fov: 0.5 / (fov * 0.5).tan(),
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let eye = params.get_float3_or("eye", [0.0, 0.0, 0.0])?.into();
        let forward: glam::Vec3A = params.get_float3_or("forward", [0.0, 0.0, -1.0])?.into();
        let up: glam::Vec3A = params.get_float3_or("up", [0.0, 1.0, 0.0])?.into();
        let fov_deg = params.get_float_or("fov", 60.0)?;
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            anyhow::bail!(format!("{} - 'fov' should be in (0, 180)", params.name()));
        }
        if forward.cross(up).length_squared() == 0.0 {
            anyhow::bail!(format!("{} - 'forward' and 'up' are parallel", params.name()));
        }
        let fov = fov_deg.to_radians();

        Ok(Self::new(eye, forward, up, fov))
    }
}

impl CameraT for PerspectiveCamera {
    fn generate_ray(&self, point: (f32, f32)) -> Ray {
        let direction =
            self.forward * self.half_cot_half_fov + self.right * point.0 + self.up * point.1;
        Ray::primary(self.eye, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_looks_forward() {
        let camera = PerspectiveCamera::new(
            glam::Vec3A::new(1.0, 2.0, 3.0),
            glam::Vec3A::new(0.0, 0.0, -2.0),
            glam::Vec3A::Y,
            std::f32::consts::FRAC_PI_2,
        );
        let ray = camera.generate_ray((0.0, 0.0));
        assert_eq!(ray.depth, 0);
        assert_eq!(ray.origin, glam::Vec3A::new(1.0, 2.0, 3.0));
        assert!(ray.direction.abs_diff_eq(-glam::Vec3A::Z, 1e-6));

        // 90 degree fov: the top edge is 45 degrees up
        let top = camera.generate_ray((0.0, 0.5));
        assert!((top.direction.y - top.direction.z.abs()).abs() < 1e-5);
        let right = camera.generate_ray((0.5, 0.0));
        assert!(right.direction.x > 0.0);
    }
}
