/// Orthonormal frame around a surface normal (local +z).
#[derive(Copy, Clone)]
pub struct Coordinate {
    local_to_world: glam::Mat3A,
    world_to_local: glam::Mat3A,
}

impl Coordinate {
    pub fn from_z(z_world: glam::Vec3A) -> Self {
        let sign = if z_world.z >= 0.0 { 1.0 } else { -1.0 };
        let a = -1.0 / (sign + z_world.z);
        let b = z_world.x * z_world.y * a;
        let x_world = glam::Vec3A::new(
            1.0 + sign * z_world.x * z_world.x * a,
            sign * b,
            -sign * z_world.x,
        );
        let y_world = glam::Vec3A::new(b, sign + z_world.y * z_world.y * a, -z_world.y);

        let local_to_world = glam::Mat3A::from_cols(x_world, y_world, z_world);
        let world_to_local = local_to_world.transpose();
        Self {
            local_to_world,
            world_to_local,
        }
    }

    pub fn to_local(&self, world: glam::Vec3A) -> glam::Vec3A {
        self.world_to_local * world
    }

    pub fn to_world(&self, local: glam::Vec3A) -> glam::Vec3A {
        self.local_to_world * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_z_maps_to_normal() {
        for n in [
            glam::Vec3A::new(0.0, 0.0, 1.0),
            glam::Vec3A::new(0.0, 0.0, -1.0),
            glam::Vec3A::new(1.0, 2.0, -0.5).normalize(),
        ] {
            let coord = Coordinate::from_z(n);
            assert!(coord.to_world(glam::Vec3A::Z).abs_diff_eq(n, 1e-5));
            let v = glam::Vec3A::new(0.3, -0.2, 0.9);
            assert!(coord.to_local(coord.to_world(v)).abs_diff_eq(v, 1e-5));
        }
    }
}
