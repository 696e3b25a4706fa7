use crate::{
    core::{color::Color, loader::InputParams, rng::Rng},
    material::MaterialT,
    shape::{ShapeT, Square},
};

use super::LightT;

/// Parallelogram emitter `corner + u * edge1 + v * edge2`, `u, v` in `[0, 1]`.
pub struct AreaLight {
    corner: glam::Vec3A,
    edge1: glam::Vec3A,
    edge2: glam::Vec3A,
    normal: glam::Vec3A,
    radiance: Color,
    area: f32,
}

impl AreaLight {
    pub fn new(
        corner: glam::Vec3A,
        edge1: glam::Vec3A,
        edge2: glam::Vec3A,
        normal: glam::Vec3A,
        radiance: Color,
    ) -> Self {
        let area = edge1.cross(edge2).length();
        Self {
            corner,
            edge1,
            edge2,
            normal: normal.normalize(),
            radiance,
            area,
        }
    }

    /// Light for an emissive square. Radiance comes from the square's material.
    pub fn from_square(square: &Square) -> Self {
        Self::new(
            square.corner(),
            square.edge1(),
            square.edge2(),
            square.normal(),
            square.material().emissive_radiance(),
        )
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let corner: glam::Vec3A = params.get_float3("corner")?.into();
        let edge1: glam::Vec3A = params.get_float3("edge1")?.into();
        let edge2: glam::Vec3A = params.get_float3("edge2")?.into();
        let default_normal = edge1.cross(edge2).normalize_or_zero();
        let normal = params.get_float3_or("normal", default_normal.into())?;
        let radiance = params.get_float3("radiance")?;

        let light = Self::new(corner, edge1, edge2, normal.into(), radiance.into());
        if light.area <= 0.0 {
            anyhow::bail!(format!("{} - edges span no area", params.name()));
        }
        Ok(light)
    }
}

impl LightT for AreaLight {
    fn sample_position(&self, rng: &mut Rng) -> glam::Vec3A {
        let (u, v) = rng.uniform_2d();
        self.corner + u * self.edge1 + v * self.edge2
    }

    fn position(&self) -> glam::Vec3A {
        self.corner + 0.5 * (self.edge1 + self.edge2)
    }

    fn intensity(&self) -> Color {
        self.radiance
    }

    fn normal(&self) -> glam::Vec3A {
        self.normal
    }

    fn area(&self) -> f32 {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch() -> AreaLight {
        AreaLight::new(
            glam::Vec3A::new(-1.0, 3.0, 2.0),
            glam::Vec3A::new(2.0, 0.0, 0.0),
            glam::Vec3A::new(0.0, 0.0, 4.0),
            glam::Vec3A::new(0.0, -1.0, 0.0),
            Color::gray(5.0),
        )
    }

    #[test]
    fn area_is_edge_cross_length() {
        let light = patch();
        assert!((light.area() - 8.0).abs() < 1e-6);
        assert!(!light.is_delta());
    }

    #[test]
    fn samples_lie_on_patch() {
        let light = patch();
        let mut rng = Rng::with_seed(5);
        for _ in 0..2000 {
            let p = light.sample_position(&mut rng);
            let d = p - glam::Vec3A::new(-1.0, 3.0, 2.0);
            let u = d.dot(glam::Vec3A::new(2.0, 0.0, 0.0)) / 4.0;
            let v = d.dot(glam::Vec3A::new(0.0, 0.0, 4.0)) / 16.0;
            assert!((0.0..=1.0).contains(&u));
            assert!((0.0..=1.0).contains(&v));
            assert!((p.y - 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn samples_are_uniform_over_patch() {
        const GRID: usize = 4;
        const DRAWS: usize = 16_000;
        let light = patch();
        let mut rng = Rng::with_seed(1234);
        let mut bins = [0usize; GRID * GRID];
        for _ in 0..DRAWS {
            let p = light.sample_position(&mut rng);
            let d = p - glam::Vec3A::new(-1.0, 3.0, 2.0);
            let u = (d.x / 2.0).clamp(0.0, 0.999_999);
            let v = (d.z / 4.0).clamp(0.0, 0.999_999);
            let i = (u * GRID as f32) as usize;
            let j = (v * GRID as f32) as usize;
            bins[j * GRID + i] += 1;
        }

        let expected = DRAWS as f64 / (GRID * GRID) as f64;
        let chi_square: f64 = bins
            .iter()
            .map(|&count| {
                let diff = count as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 15 degrees of freedom, p = 0.001 critical value is 37.7
        assert!(chi_square < 37.7, "chi-square {}", chi_square);
    }

    #[test]
    fn light_from_emissive_square_takes_its_radiance() {
        use crate::material::{Emissive, Material};
        use std::sync::Arc;

        let material: Arc<Material> = Arc::new(Emissive::new(Color::new(1.0, 2.0, 3.0)).into());
        let square = Square::new(
            glam::Vec3A::ZERO,
            glam::Vec3A::X,
            glam::Vec3A::Y,
            None,
            material,
        );
        let light = AreaLight::from_square(&square);
        assert_eq!(light.intensity(), Color::new(1.0, 2.0, 3.0));
        assert!((light.area() - 1.0).abs() < 1e-6);
        assert!(light.normal().abs_diff_eq(glam::Vec3A::Z, 1e-6));
        assert!(light
            .position()
            .abs_diff_eq(glam::Vec3A::new(0.5, 0.5, 0.0), 1e-6));
    }
}
